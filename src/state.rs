use crate::counter::CounterEngine;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Mutex<CounterEngine>>,
}

impl AppState {
    pub fn new(engine: CounterEngine) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(CounterEngine::new())
    }
}

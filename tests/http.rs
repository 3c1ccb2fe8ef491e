use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct HistoryLine {
    action: String,
    total: String,
    time: String,
}

#[derive(Debug, Deserialize)]
struct CounterView {
    count: i64,
    sign: String,
    undo_available: bool,
    history: Vec<HistoryLine>,
}

#[derive(Debug, Deserialize)]
struct CommandResponse {
    outcome: String,
    view: CounterView,
}

#[derive(Debug, Deserialize)]
struct KeyResponse {
    handled: bool,
    outcome: Option<String>,
    view: CounterView,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/state")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_tally_counter"))
        .env("HOST", "127.0.0.1")
        .env("PORT", port.to_string())
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn send_command(client: &Client, base_url: &str, command: &str) -> CommandResponse {
    client
        .post(format!("{base_url}/api/command"))
        .json(&serde_json::json!({ "command": command }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn send_key(client: &Client, base_url: &str, body: serde_json::Value) -> KeyResponse {
    client
        .post(format!("{base_url}/api/key"))
        .json(&body)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn current_view(client: &Client, base_url: &str) -> CounterView {
    client
        .get(format!("{base_url}/api/state"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_command_sequence_with_undo_and_reset() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let base = server.base_url.as_str();

    send_command(&client, base, "reset").await;
    send_command(&client, base, "increment").await;
    send_command(&client, base, "increment").await;
    let after = send_command(&client, base, "decrement").await;
    assert_eq!(after.outcome, "applied");
    assert_eq!(after.view.count, 1);
    assert_eq!(after.view.sign, "positive");
    assert_eq!(after.view.history.len(), 4);
    assert_eq!(after.view.history[0].action, "-1");
    assert_eq!(after.view.history[0].total, "Total: 1");
    assert_eq!(after.view.history[0].time, "just now");

    let undone = send_command(&client, base, "undo").await;
    assert_eq!(undone.outcome, "applied");
    assert_eq!(undone.view.count, 2);
    assert_eq!(undone.view.history.len(), 3);

    let undone = send_command(&client, base, "undo").await;
    assert_eq!(undone.view.count, 1);

    let reset = send_command(&client, base, "reset").await;
    assert_eq!(reset.view.count, 0);
    assert_eq!(reset.view.sign, "neutral");
    assert_eq!(reset.view.history.len(), 1);
    assert_eq!(reset.view.history[0].action, "Reset");
    assert_eq!(reset.view.history[0].total, "Cleared");

    let blocked = send_command(&client, base, "undo").await;
    assert_eq!(blocked.outcome, "blocked_by_reset");
    assert_eq!(blocked.view.count, 0);
    assert_eq!(blocked.view.history.len(), 1);
    assert!(blocked.view.undo_available);
}

#[tokio::test]
async fn http_neutral_marker_keeps_count() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let base = server.base_url.as_str();

    send_command(&client, base, "reset").await;
    send_command(&client, base, "decrement").await;
    let marked = send_command(&client, base, "neutral").await;

    assert_eq!(marked.view.count, -1);
    assert_eq!(marked.view.sign, "negative");
    assert_eq!(marked.view.history[0].action, "0");
    assert_eq!(marked.view.history[0].total, "Total: -1");
}

#[tokio::test]
async fn http_unknown_command_is_rejected() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = current_view(&client, &server.base_url).await;
    let response = client
        .post(format!("{}/api/command", server.base_url))
        .json(&serde_json::json!({ "command": "double" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(response.text().await.unwrap(), "unknown command 'double'");

    let after = current_view(&client, &server.base_url).await;
    assert_eq!(after.count, before.count);
    assert_eq!(after.history.len(), before.history.len());
}

#[tokio::test]
async fn http_keyboard_shortcuts() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let base = server.base_url.as_str();

    send_command(&client, base, "reset").await;

    let plus = send_key(&client, base, serde_json::json!({ "key": "=" })).await;
    assert!(plus.handled);
    assert_eq!(plus.outcome.as_deref(), Some("applied"));
    assert_eq!(plus.view.count, 1);

    let typing = send_key(
        &client,
        base,
        serde_json::json!({ "key": "+", "target_tag": "INPUT" }),
    )
    .await;
    assert!(!typing.handled);
    assert_eq!(typing.outcome, None);
    assert_eq!(typing.view.count, 1);

    let bare_z = send_key(&client, base, serde_json::json!({ "key": "z" })).await;
    assert!(!bare_z.handled);

    let undo = send_key(
        &client,
        base,
        serde_json::json!({ "key": "z", "ctrl_key": true }),
    )
    .await;
    assert!(undo.handled);
    assert_eq!(undo.view.count, 0);

    let reset = send_key(&client, base, serde_json::json!({ "key": "R" })).await;
    assert_eq!(reset.view.history.len(), 1);
    let blocked = send_key(&client, base, serde_json::json!({ "key": "Backspace" })).await;
    assert_eq!(blocked.outcome.as_deref(), Some("blocked_by_reset"));
}

#[tokio::test]
async fn http_form_command_redirects_to_page() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let base = server.base_url.as_str();

    send_command(&client, base, "reset").await;
    let response = client
        .post(format!("{base}/command/increment"))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let html = response.text().await.unwrap();
    assert!(html.contains("Tally Counter"));
    assert!(html.contains(r#"class="count-value positive">1</div>"#));

    let view = current_view(&client, base).await;
    assert_eq!(view.count, 1);
    assert_eq!(view.history[0].action, "+1");
}

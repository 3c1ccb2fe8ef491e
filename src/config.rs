use std::{
    env,
    net::{IpAddr, Ipv4Addr, SocketAddr},
};

pub const DEFAULT_PORT: u16 = 8080;

/// Listen address from `HOST` and `PORT`, falling back to `0.0.0.0:8080`.
pub fn resolve_addr() -> SocketAddr {
    addr_from(env::var("HOST").ok().as_deref(), env::var("PORT").ok().as_deref())
}

fn addr_from(host: Option<&str>, port: Option<&str>) -> SocketAddr {
    let ip = host
        .and_then(|value| value.trim().parse::<IpAddr>().ok())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    let port = port
        .and_then(|value| value.trim().parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);
    SocketAddr::new(ip, port)
}

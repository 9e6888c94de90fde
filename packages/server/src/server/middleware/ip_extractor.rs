use axum::{
    extract::{ConnectInfo, Request},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::net::{IpAddr, SocketAddr};

/// Extension key for storing extracted IP address
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClientIp(pub IpAddr);

/// Middleware to extract client IP address from request
///
/// Priority:
/// 1. X-Forwarded-For header (for requests through proxies)
/// 2. X-Real-IP header (for Nginx)
/// 3. ConnectInfo socket address (direct connection)
///
/// Requests with none of these (in-process tests) simply carry no `ClientIp`.
pub async fn extract_client_ip(
    connect_info: Option<ConnectInfo<SocketAddr>>,
    mut request: Request,
    next: Next,
) -> Response {
    let socket_ip = connect_info.map(|ConnectInfo(addr)| addr.ip());

    if let Some(ip) = client_ip(request.headers(), socket_ip) {
        request.extensions_mut().insert(ClientIp(ip));
    }

    next.run(request).await
}

fn client_ip(headers: &HeaderMap, socket_ip: Option<IpAddr>) -> Option<IpAddr> {
    if let Some(forwarded) = headers.get("x-forwarded-for") {
        // Comma-separated list, take first
        forwarded
            .to_str()
            .ok()
            .and_then(|s| s.split(',').next())
            .and_then(|s| s.trim().parse::<IpAddr>().ok())
    } else if let Some(real_ip) = headers.get("x-real-ip") {
        real_ip.to_str().ok().and_then(|s| s.trim().parse::<IpAddr>().ok())
    } else {
        socket_ip
    }
}

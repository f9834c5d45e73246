use crate::common::error::{AppError, ServiceResult};
use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::HeaderValue;
use axum::http::request::Parts;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

#[derive(Debug, Clone, Copy)]
pub struct IpAddrInfo {
    pub ip_addr: IpAddr,
}

/// Accepts a bare address or `ip:port`; proxies send both.
fn parse_ip(value: &str) -> Option<IpAddr> {
    let value = value.trim();
    IpAddr::from_str(value)
        .ok()
        .or_else(|| SocketAddr::from_str(value).ok().map(|addr| addr.ip()))
}

fn header_ip(value: &HeaderValue) -> Option<IpAddr> {
    // client, proxy1, proxy2, ...
    let client = value.to_str().ok()?.split(',').next()?;
    parse_ip(client)
}

/// Headers that don't parse are skipped; the socket peer is the last resort.
async fn get_ip_addr(parts: &mut Parts) -> ServiceResult<IpAddrInfo> {
    let forwarded = ["CF-Connecting-IP", "X-Forwarded-For"]
        .into_iter()
        .filter_map(|name| parts.headers.get(name))
        .find_map(header_ip);
    if let Some(ip_addr) = forwarded {
        return Ok(IpAddrInfo { ip_addr });
    }

    let info = <ConnectInfo<SocketAddr>>::from_request_parts(parts, &()).await?;
    let ip_addr = info.ip();
    Ok(IpAddrInfo { ip_addr })
}

impl<S: Sync + Send> FromRequestParts<S> for IpAddrInfo {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        get_ip_addr(parts).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use std::net::Ipv4Addr;

    const PEER: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)), 50000);

    fn parts_with(headers: &[(&str, &str)]) -> Parts {
        let mut request = Request::builder();
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let (mut parts, ()) = request.body(()).unwrap().into_parts();
        parts.extensions.insert(ConnectInfo(PEER));
        parts
    }

    async fn client_ip(headers: &[(&str, &str)]) -> IpAddr {
        let mut parts = parts_with(headers);
        get_ip_addr(&mut parts).await.unwrap().ip_addr
    }

    #[tokio::test]
    async fn forwarded_headers_take_priority() {
        assert_eq!(
            client_ip(&[("X-Forwarded-For", "203.0.113.7, 10.0.0.1")]).await,
            IpAddr::from([203, 0, 113, 7])
        );
        assert_eq!(
            client_ip(&[
                ("CF-Connecting-IP", "198.51.100.2"),
                ("X-Forwarded-For", "203.0.113.7"),
            ])
            .await,
            IpAddr::from([198, 51, 100, 2])
        );
    }

    #[tokio::test]
    async fn address_with_port_is_accepted() {
        assert_eq!(
            client_ip(&[("X-Forwarded-For", "203.0.113.7:4711")]).await,
            IpAddr::from([203, 0, 113, 7])
        );
    }

    #[tokio::test]
    async fn unparseable_headers_fall_through_to_peer() {
        assert_eq!(
            client_ip(&[("X-Forwarded-For", "unknown")]).await,
            PEER.ip()
        );
        assert_eq!(
            client_ip(&[
                ("CF-Connecting-IP", "garbage"),
                ("X-Forwarded-For", "203.0.113.7"),
            ])
            .await,
            IpAddr::from([203, 0, 113, 7])
        );
    }
}

//! Client identity and request origin behind reverse proxies.

use std::net::IpAddr;

use axum::http::{header, HeaderMap, Uri};
use jb_app::models::RequestOrigin;

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Key used for rate limiting.
///
/// With `n` trusted hops the client is the `n`-th `X-Forwarded-For` entry
/// counted from the right, or the leftmost one when the chain is shorter.
/// Without trusted hops, or without the header, it is the peer address.
pub fn client_key(headers: &HeaderMap, peer: Option<IpAddr>, trust_proxy_hops: usize) -> String {
    if trust_proxy_hops > 0 {
        let chain = forwarded_chain(headers);
        if !chain.is_empty() {
            let index = chain.len().saturating_sub(trust_proxy_hops);
            return chain[index].to_string();
        }
    }

    peer.map(|ip| ip.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Scheme and host the client used, for absolute blob URLs
pub fn request_origin(headers: &HeaderMap, uri: &Uri, trust_proxy_hops: usize) -> RequestOrigin {
    let forwarded_proto = (trust_proxy_hops > 0)
        .then(|| first_header_token(headers, X_FORWARDED_PROTO))
        .flatten();
    let scheme = forwarded_proto.unwrap_or_else(|| "http".to_string());

    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .or_else(|| uri.authority().map(|a| a.to_string()))
        .unwrap_or_else(|| "localhost".to_string());

    RequestOrigin::new(scheme, host)
}

/// Every `X-Forwarded-For` entry, left to right, across repeated headers
fn forwarded_chain(headers: &HeaderMap) -> Vec<&str> {
    headers
        .get_all(X_FORWARDED_FOR)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn first_header_token(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)?
        .to_str()
        .ok()?
        .split(',')
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_ascii_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use std::net::Ipv4Addr;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(*name, HeaderValue::from_static(value));
        }
        map
    }

    const PEER: Option<IpAddr> = Some(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)));

    #[test]
    fn test_client_key_uses_peer_without_trusted_hops() {
        let h = headers(&[("x-forwarded-for", "198.51.100.7")]);
        assert_eq!(client_key(&h, PEER, 0), "10.0.0.1");
    }

    #[test]
    fn test_client_key_counts_hops_from_the_right() {
        let h = headers(&[("x-forwarded-for", "1.1.1.1, 2.2.2.2, 3.3.3.3")]);
        assert_eq!(client_key(&h, PEER, 1), "3.3.3.3");
        assert_eq!(client_key(&h, PEER, 2), "2.2.2.2");
        assert_eq!(client_key(&h, PEER, 5), "1.1.1.1");
    }

    #[test]
    fn test_client_key_joins_repeated_headers() {
        let h = headers(&[
            ("x-forwarded-for", "1.1.1.1"),
            ("x-forwarded-for", "2.2.2.2"),
        ]);
        assert_eq!(client_key(&h, PEER, 1), "2.2.2.2");
    }

    #[test]
    fn test_client_key_falls_back_to_peer_then_unknown() {
        let h = HeaderMap::new();
        assert_eq!(client_key(&h, PEER, 1), "10.0.0.1");
        assert_eq!(client_key(&h, None, 1), "unknown");
    }

    #[test]
    fn test_request_origin_honors_forwarded_proto_only_when_trusted() {
        let h = headers(&[("host", "paste.example"), ("x-forwarded-proto", "HTTPS, http")]);
        let uri: Uri = "/api/blobs".parse().unwrap();

        let trusted = request_origin(&h, &uri, 1);
        assert_eq!(trusted.blob_url("abc"), "https://paste.example/api/blobs/abc");

        let untrusted = request_origin(&h, &uri, 0);
        assert_eq!(untrusted.blob_url("abc"), "http://paste.example/api/blobs/abc");
    }
}

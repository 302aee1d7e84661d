//! Response hardening headers applied to every response.

use anyhow::{Context, Result};
use axum::http::{header, HeaderName, HeaderValue};
use jb_core::config::CspConfig;

const HSTS: &str = "max-age=31536000; includeSubDomains; preload";

/// Build the `Content-Security-Policy` value. Extra script sources are also
/// allowed for `connect-src` so analytics beacons can report back.
pub fn content_security_policy(csp: &CspConfig) -> String {
    let directive = |name: &str, base: &[&str], extra: &[String]| {
        let sources: Vec<&str> = base
            .iter()
            .copied()
            .chain(extra.iter().map(String::as_str))
            .collect();
        format!("{name} {}", sources.join(" "))
    };

    [
        directive("default-src", &["'self'"], &[]),
        directive(
            "script-src",
            &["'self'", "https://www.google.com", "https://www.gstatic.com"],
            &csp.extra_script_src,
        ),
        directive("frame-src", &["https://www.google.com"], &[]),
        directive("connect-src", &["'self'"], &csp.extra_script_src),
        directive(
            "style-src",
            &["'self'", "'unsafe-inline'"],
            &csp.extra_style_src,
        ),
        directive("worker-src", &["'self'", "blob:"], &csp.extra_worker_src),
    ]
    .join(";")
}

/// Every header the service sets on its responses, unless a handler already
/// set one of them.
pub fn security_headers(csp: &CspConfig) -> Result<Vec<(HeaderName, HeaderValue)>> {
    let policy = HeaderValue::from_str(&content_security_policy(csp))
        .context("CSP_EXTRA_* values produce an invalid Content-Security-Policy header")?;

    Ok(vec![
        (header::CONTENT_SECURITY_POLICY, policy),
        (
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static(HSTS),
        ),
        (
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ),
        (
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ),
        (
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ),
        (
            HeaderName::from_static("cross-origin-opener-policy"),
            HeaderValue::from_static("same-origin"),
        ),
    ])
}

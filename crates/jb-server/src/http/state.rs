use std::sync::Arc;

use jb_app::App;

/// Shared state handed to every handler and middleware.
#[derive(Clone)]
pub struct AppState {
    pub app: Arc<App>,
    /// Reverse proxies in front of the service; 0 ignores `X-Forwarded-*`
    pub trust_proxy_hops: usize,
}

impl AppState {
    pub fn new(app: Arc<App>, trust_proxy_hops: usize) -> Self {
        Self {
            app,
            trust_proxy_hops,
        }
    }
}

use serde::Serialize;
use serde_json::Value;

/// Scheme and host the client used to reach the service, for building
/// absolute retrieval URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOrigin {
    pub scheme: String,
    pub host: String,
}

impl RequestOrigin {
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
        }
    }

    pub fn blob_url(&self, id: &str) -> String {
        format!("{}://{}/api/blobs/{}", self.scheme, self.host, id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatedBlob {
    pub id: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobView {
    pub id: String,
    pub json: Value,
    /// ISO-8601, millisecond precision, UTC
    pub created_at: String,
}

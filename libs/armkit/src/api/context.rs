use armkit_resource_id::ResourceId;
use url::Url;

/// Per-request context of an ARM call.
#[derive(Debug, Clone)]
pub struct ArmRequestContext {
    /// Resource id addressed by the request path.
    pub resource_id: ResourceId,
    /// Value of the `api-version` query parameter.
    pub api_version: String,
    /// Opaque continuation token from a previous page.
    pub skip_token: Option<String>,
    /// Page size hint.
    pub top: Option<usize>,
    /// URL the client called; the base of `nextLink`.
    pub request_url: Url,
    /// Correlation id propagated from the caller, if any.
    pub correlation_id: Option<String>,
}

impl ArmRequestContext {
    #[must_use]
    pub fn new(resource_id: ResourceId, api_version: impl Into<String>, request_url: Url) -> Self {
        Self {
            resource_id,
            api_version: api_version.into(),
            skip_token: None,
            top: None,
            request_url,
            correlation_id: None,
        }
    }

    #[must_use]
    pub fn with_skip_token(mut self, token: Option<String>) -> Self {
        self.skip_token = token;
        self
    }

    #[must_use]
    pub fn with_top(mut self, top: Option<usize>) -> Self {
        self.top = top;
        self
    }

    #[must_use]
    pub fn with_correlation_id(mut self, id: Option<String>) -> Self {
        self.correlation_id = id;
        self
    }
}

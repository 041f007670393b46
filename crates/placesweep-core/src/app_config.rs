/// Settings for talking to the places API.
///
/// The log filter and regions file path are owned by the binary's flags,
/// since they are needed by commands that run without an API key.
#[derive(Clone)]
pub struct AppConfig {
    /// Places API credential. Set once at startup and never mutated.
    pub places_api_key: String,
    pub places_base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Warm-up delay before a freshly issued page token is accepted by the API.
    pub page_token_delay_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("places_api_key", &"[redacted]")
            .field("places_base_url", &self.places_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("page_token_delay_ms", &self.page_token_delay_ms)
            .finish()
    }
}

/// Which `TextModelProvider` adapter the pipeline runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// OpenAI-compatible chat completions endpoint.
    OpenAi,
    /// HuggingFace-style hosted inference endpoint.
    HostedInference,
    /// Offline lexicon/extractive adapter; no network, no credentials.
    Lexicon,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::OpenAi => write!(f, "openai"),
            ProviderKind::HostedInference => write!(f, "hf"),
            ProviderKind::Lexicon => write!(f, "lexicon"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub jikan_base_url: String,
    pub request_timeout_secs: u64,
    pub page_delay_ms: u64,
    pub review_pages: u32,
    pub log_level: String,
    pub provider: ProviderKind,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub chat_model: String,
    pub hf_api_token: Option<String>,
    pub hf_base_url: String,
    pub hf_sentiment_model: String,
    pub hf_summary_model: String,
    pub hf_generation_model: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("jikan_base_url", &self.jikan_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("page_delay_ms", &self.page_delay_ms)
            .field("review_pages", &self.review_pages)
            .field("log_level", &self.log_level)
            .field("provider", &self.provider)
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("openai_base_url", &self.openai_base_url)
            .field("chat_model", &self.chat_model)
            .field(
                "hf_api_token",
                &self.hf_api_token.as_ref().map(|_| "[redacted]"),
            )
            .field("hf_base_url", &self.hf_base_url)
            .field("hf_sentiment_model", &self.hf_sentiment_model)
            .field("hf_summary_model", &self.hf_summary_model)
            .field("hf_generation_model", &self.hf_generation_model)
            .finish()
    }
}

use crate::config::AnalysisConfig;
use crate::models::AnalysisRequest;

pub const THREAT_PROMPT_PREFIX: &str = "Please analyze the following logs for cybersecurity threats. Highlight any suspicious activity or anomalies: ";
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Embed raw log text after the instruction prefix. The text is not trimmed,
/// truncated or escaped here; JSON escaping happens at serialization.
pub fn build_request(log_text: &str, config: &AnalysisConfig) -> AnalysisRequest {
    let mut prompt = String::with_capacity(config.prompt_prefix.len() + log_text.len());
    prompt.push_str(&config.prompt_prefix);
    prompt.push_str(log_text);
    AnalysisRequest {
        prompt,
        max_tokens: config.max_tokens,
    }
}

impl AnalysisRequest {
    /// Serialize to the endpoint's JSON body.
    pub fn to_payload(&self) -> String {
        serde_json::json!({
            "prompt": self.prompt,
            "max_tokens": self.max_tokens,
        })
        .to_string()
    }
}

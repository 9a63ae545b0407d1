use crate::config::ApiConfig;
use crate::errors::CoreError;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use std::io::Read;
use std::time::Duration;
use super::backend::AnalysisBackend;

/// Max chars of a response body quoted in an error message.
const ERROR_BODY_PREVIEW: usize = 500;

/// Analysis backend that POSTs the payload to an HTTP endpoint with a bearer token.
///
/// The underlying client (and its connection pool) lives as long as the
/// backend; build one per run and share it across files.
pub struct HttpBackend {
    client: Client,
    url: String,
    api_key: String,
    strict_status: bool,
}

impl HttpBackend {
    pub fn new(config: &ApiConfig) -> Result<Self, CoreError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| CoreError::Transport(format!("building HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: config.url.clone(),
            api_key: config.api_key.clone(),
            strict_status: config.strict_status,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl AnalysisBackend for HttpBackend {
    fn send(&self, payload: &str) -> Result<Vec<u8>, CoreError> {
        let mut response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .body(payload.to_owned())
            .send()
            .map_err(|e| CoreError::Transport(format!("POST {}: {e}", self.url)))?;

        let status = response.status();

        // Buffer the whole body before handing it on, bytes untouched
        let mut body = Vec::new();
        response
            .read_to_end(&mut body)
            .map_err(|e| CoreError::Transport(format!("reading response body: {e}")))?;

        if self.strict_status && !status.is_success() {
            return Err(CoreError::Transport(format!(
                "endpoint returned {status}: {}",
                truncate_for_error(&String::from_utf8_lossy(&body))
            )));
        }

        Ok(body)
    }
}

fn truncate_for_error(s: &str) -> String {
    match s.char_indices().nth(ERROR_BODY_PREVIEW) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn api_config(url: String) -> ApiConfig {
        ApiConfig {
            url,
            api_key: "test-key".to_string(),
            timeout_secs: Some(5),
            strict_status: false,
        }
    }

    #[test]
    fn test_posts_payload_with_bearer_token() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/v1/analysis")
            .match_header("authorization", "Bearer test-key")
            .match_header("content-type", "application/json")
            .match_body(Matcher::JsonString(
                r#"{"prompt":"look at this","max_tokens":1000}"#.to_string(),
            ))
            .with_status(200)
            .with_body(r#"{"result":"benign"}"#)
            .create();

        let url = format!("{}/v1/analysis", server.url());
        let backend = HttpBackend::new(&api_config(url)).unwrap();
        let body = backend
            .send(r#"{"max_tokens":1000,"prompt":"look at this"}"#)
            .unwrap();

        assert_eq!(body, br#"{"result":"benign"}"#);
        mock.assert();
    }

    #[test]
    fn test_error_status_passes_body_through_by_default() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/")
            .with_status(500)
            .with_body("upstream exploded")
            .create();

        let backend = HttpBackend::new(&api_config(server.url())).unwrap();
        assert_eq!(backend.send("{}").unwrap(), b"upstream exploded");
    }

    #[test]
    fn test_non_utf8_body_returned_unchanged() {
        let raw: &[u8] = b"{\"verdict\":\"\xff\xfe\"}";
        let mut server = mockito::Server::new();
        let _mock = server.mock("POST", "/").with_status(200).with_body(raw).create();

        let backend = HttpBackend::new(&api_config(server.url())).unwrap();
        assert_eq!(backend.send("{}").unwrap(), raw);
    }

    #[test]
    fn test_strict_status_rejects_error_status() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/")
            .with_status(401)
            .with_body(r#"{"error":"bad key"}"#)
            .create();

        let mut config = api_config(server.url());
        config.strict_status = true;
        let backend = HttpBackend::new(&config).unwrap();

        match backend.send("{}") {
            Err(CoreError::Transport(msg)) => {
                assert!(msg.contains("401"));
                assert!(msg.contains("bad key"));
            }
            other => panic!("expected Transport error, got {other:?}"),
        }
    }

    #[test]
    fn test_strict_status_accepts_success() {
        let mut server = mockito::Server::new();
        let _mock = server.mock("POST", "/").with_status(201).with_body("{}").create();

        let mut config = api_config(server.url());
        config.strict_status = true;
        let backend = HttpBackend::new(&config).unwrap();
        assert_eq!(backend.send("{}").unwrap(), b"{}");
    }

    #[test]
    fn test_connection_refused_is_transport_error() {
        // Grab a free port, then close it so nothing is listening
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let url = format!("http://127.0.0.1:{port}/");
        let backend = HttpBackend::new(&api_config(url)).unwrap();
        assert!(matches!(backend.send("{}"), Err(CoreError::Transport(_))));
    }

    #[test]
    fn test_truncate_for_error() {
        let long = "é".repeat(ERROR_BODY_PREVIEW + 10);
        let out = truncate_for_error(&long);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), ERROR_BODY_PREVIEW + 3);
        assert_eq!(truncate_for_error("short"), "short");
    }
}

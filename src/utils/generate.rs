use super::{ClientError, GenerateError, GenerationRequest, GenerationResponse, Prompt};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use std::error::Error as StdError;

// ============================================================================
// Constants
// ============================================================================

const GENERATE_PATH: &str = "generate";

// ============================================================================
// Generate Client
// ============================================================================

/// Talks to the image generation backend. One `generate` call is one POST.
#[derive(Clone, Debug)]
pub struct GenerateClient {
    client: Client,
    base_url: Url,
}

impl PartialEq for GenerateClient {
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url
    }
}

impl GenerateClient {
    pub fn new(backend_url: &str) -> Result<Self, ClientError> {
        let base_url = parse_base_url(backend_url)?;

        // No request timeout: a request runs until it completes or the
        // transport gives up.
        let client = Client::builder()
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(std::time::Duration::from_secs(90))
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn endpoint(&self) -> Url {
        // `parse_base_url` guarantees a trailing slash, so join appends.
        self.base_url
            .join(GENERATE_PATH)
            .unwrap_or_else(|_| self.base_url.clone())
    }

    /// Resolve an image reference from the backend for display or download.
    /// Relative paths are joined onto the backend URL, absolute ones pass through.
    pub fn resolve_asset(&self, image_url: &str) -> String {
        if image_url.is_empty() || image_url == "#" {
            return image_url.to_string();
        }
        match self.base_url.join(image_url) {
            Ok(url) => url.to_string(),
            Err(_) => image_url.to_string(),
        }
    }

    // ========================================================================
    // Generate
    // ========================================================================

    pub async fn generate(&self, prompt: &Prompt) -> Result<GenerationResponse, GenerateError> {
        let url = self.endpoint();
        let request = GenerationRequest::from(prompt);

        tracing::info!(
            %url,
            prompt_len = prompt.as_str().chars().count(),
            "Requesting image generation"
        );

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();

        // The body is parsed whatever the status code; an unreadable body is
        // a transport failure, not a logical one.
        let body: serde_json::Value = response.json().await.map_err(transport_error)?;
        let body = GenerationResponse::from(&body);

        if status.is_success() && body.is_success() {
            tracing::info!(%status, image_url = body.image_url.as_deref().unwrap_or(""), "Image generated");
            return Ok(body);
        }

        tracing::warn!(
            %status,
            backend_status = body.status.as_deref().unwrap_or("<missing>"),
            "Backend reported a generation failure"
        );

        Err(GenerateError::Logical {
            message: body.message.filter(|m| !m.is_empty()),
        })
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn parse_base_url(backend_url: &str) -> Result<Url, ClientError> {
    let trimmed = backend_url.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    };

    let url = Url::parse(&with_slash).map_err(|e| ClientError::InvalidUrl {
        url: backend_url.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ClientError::InvalidUrl {
            url: backend_url.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    Ok(url)
}

fn transport_error(err: reqwest::Error) -> GenerateError {
    let detail = describe_error(&err);
    tracing::error!(error = %detail, "Failed to reach the generation backend");
    GenerateError::Transport(detail)
}

/// Flatten an error and its sources into one line.
fn describe_error(err: &dyn StdError) -> String {
    let mut detail = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !detail.contains(&text) {
            detail.push_str(": ");
            detail.push_str(&text);
        }
        source = cause.source();
    }
    detail
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{TRANSPORT_PREFIX, UNKNOWN_ERROR_MESSAGE};
    use mockito::Matcher;
    use serde_json::json;

    fn prompt(text: &str) -> Prompt {
        Prompt::parse(text).unwrap()
    }

    #[test]
    fn test_endpoint_appends_generate() {
        let client = GenerateClient::new("http://127.0.0.1:5000").unwrap();
        assert_eq!(client.endpoint().as_str(), "http://127.0.0.1:5000/generate");

        let client = GenerateClient::new("http://example.com/api/").unwrap();
        assert_eq!(client.endpoint().as_str(), "http://example.com/api/generate");
    }

    #[test]
    fn test_rejects_bad_backend_urls() {
        assert!(matches!(
            GenerateClient::new("not a url"),
            Err(ClientError::InvalidUrl { .. })
        ));
        assert!(matches!(
            GenerateClient::new("ftp://example.com"),
            Err(ClientError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_resolve_asset() {
        let client = GenerateClient::new("http://127.0.0.1:5000").unwrap();
        assert_eq!(
            client.resolve_asset("/static/images/1.png"),
            "http://127.0.0.1:5000/static/images/1.png"
        );
        assert_eq!(
            client.resolve_asset("https://cdn.example.com/x.png"),
            "https://cdn.example.com/x.png"
        );
        assert_eq!(client.resolve_asset(""), "");
        assert_eq!(client.resolve_asset("#"), "#");
    }

    #[tokio::test]
    async fn test_generate_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/generate")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({ "prompt": "a cat" })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status":"success","image_url":"/img/1.png","prompt":"a cat"}"#)
            .expect(1)
            .create_async()
            .await;

        let client = GenerateClient::new(&server.url()).unwrap();
        let response = client.generate(&prompt("  a cat  ")).await.unwrap();

        assert_eq!(response.image_url.as_deref(), Some("/img/1.png"));
        assert_eq!(response.prompt.as_deref(), Some("a cat"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_logical_failure_uses_server_message() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/generate")
            .with_status(200)
            .with_body(r#"{"status":"error","message":"bad request"}"#)
            .create_async()
            .await;

        let client = GenerateClient::new(&server.url()).unwrap();
        let err = client.generate(&prompt("a cat")).await.unwrap_err();

        assert_eq!(
            err,
            GenerateError::Logical {
                message: Some("bad request".to_string())
            }
        );
        assert_eq!(err.to_string(), "bad request");
    }

    #[tokio::test]
    async fn test_generate_http_error_with_success_status_is_logical() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/generate")
            .with_status(500)
            .with_body(r#"{"status":"success","image_url":"/img/1.png","prompt":"a cat"}"#)
            .create_async()
            .await;

        let client = GenerateClient::new(&server.url()).unwrap();
        let err = client.generate(&prompt("a cat")).await.unwrap_err();

        assert_eq!(err, GenerateError::Logical { message: None });
        assert_eq!(err.to_string(), UNKNOWN_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_generate_missing_or_empty_message_falls_back() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/generate")
            .with_status(400)
            .with_body(r#"{"status":"error","message":""}"#)
            .create_async()
            .await;

        let client = GenerateClient::new(&server.url()).unwrap();
        let err = client.generate(&prompt("a cat")).await.unwrap_err();

        assert_eq!(err.to_string(), UNKNOWN_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_generate_wrongly_typed_fields_are_logical() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/generate")
            .with_status(400)
            .with_body(r#"{"status":"error","message":"bad request","prompt":123}"#)
            .create_async()
            .await;

        let client = GenerateClient::new(&server.url()).unwrap();
        let err = client.generate(&prompt("a cat")).await.unwrap_err();
        assert_eq!(
            err,
            GenerateError::Logical {
                message: Some("bad request".to_string())
            }
        );

        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/generate")
            .with_status(200)
            .with_body(r#"{"status":false,"message":"quota exceeded"}"#)
            .create_async()
            .await;

        let client = GenerateClient::new(&server.url()).unwrap();
        let err = client.generate(&prompt("a cat")).await.unwrap_err();
        assert_eq!(err.to_string(), "quota exceeded");

        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/generate")
            .with_status(500)
            .with_body(r#"{"status":"error","message":123}"#)
            .create_async()
            .await;

        let client = GenerateClient::new(&server.url()).unwrap();
        let err = client.generate(&prompt("a cat")).await.unwrap_err();
        assert_eq!(err, GenerateError::Logical { message: None });
        assert_eq!(err.to_string(), UNKNOWN_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_generate_unparseable_body_is_transport_failure() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/generate")
            .with_status(502)
            .with_body("<html>Bad Gateway</html>")
            .create_async()
            .await;

        let client = GenerateClient::new(&server.url()).unwrap();
        let err = client.generate(&prompt("a cat")).await.unwrap_err();

        assert!(matches!(err, GenerateError::Transport(_)));
        assert!(err.to_string().starts_with(TRANSPORT_PREFIX));
    }

    #[tokio::test]
    async fn test_generate_connection_refused() {
        // Grab a free port, then close it so nothing is listening.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = GenerateClient::new(&format!("http://{}", addr)).unwrap();
        let err = client.generate(&prompt("a cat")).await.unwrap_err();

        match &err {
            GenerateError::Transport(detail) => assert!(!detail.is_empty()),
            other => panic!("expected transport failure, got {:?}", other),
        }
        let text = err.to_string();
        assert!(text.starts_with(TRANSPORT_PREFIX));
        assert!(text.contains("Details: "));
    }

    #[tokio::test]
    async fn test_two_activations_send_two_requests() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/generate")
            .match_body(Matcher::Json(json!({ "prompt": "a cat" })))
            .with_status(200)
            .with_body(r#"{"status":"success","image_url":"/img/1.png","prompt":"a cat"}"#)
            .expect(2)
            .create_async()
            .await;

        let client = GenerateClient::new(&server.url()).unwrap();
        let p = prompt("a cat");
        let (first, second) = tokio::join!(client.generate(&p), client.generate(&p));

        assert!(first.is_ok());
        assert!(second.is_ok());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_full_cycle_updates_display_state() {
        use crate::utils::{DisplayState, Panel};

        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/generate")
            .with_status(200)
            .with_body(r#"{"status":"success","image_url":"/img/1.png","prompt":"a cat"}"#)
            .create_async()
            .await;
        let client = GenerateClient::new(&server.url()).unwrap();

        let mut state = DisplayState::default();
        let (p, ticket) = state.begin(" a cat ").unwrap();
        assert!(state.is_loading());

        let outcome = client.generate(&p).await;
        state.settle(ticket, outcome);

        assert_eq!(state.panel, Panel::Result);
        assert_eq!(state.image_src, "/img/1.png");
        assert_eq!(state.displayed_prompt, "a cat");
        assert_eq!(state.download_href, "/img/1.png");
        assert_eq!(
            client.resolve_asset(&state.image_src),
            format!("{}/img/1.png", server.url())
        );
    }

    #[tokio::test]
    async fn test_blank_prompt_sends_nothing() {
        use crate::utils::DisplayState;

        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/generate")
            .expect(0)
            .create_async()
            .await;

        let mut state = DisplayState::default();
        assert!(state.begin("   ").is_none());
        mock.assert_async().await;
    }

    #[test]
    fn test_describe_error_includes_sources() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        let err = GenerateError::Transport(describe_error(&io));
        assert!(err.to_string().contains("connection refused"));
    }
}

use super::GenerateError;
use serde::Serialize;
use serde_json::Value;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum AppView {
    Generator,
    Settings,
}

/// A trimmed, non-empty prompt. The only way to build one is `Prompt::parse`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Prompt(String);

impl Prompt {
    pub fn parse(raw: &str) -> Result<Self, GenerateError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(GenerateError::Validation);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    pub prompt: String,
}

impl From<&Prompt> for GenerationRequest {
    fn from(prompt: &Prompt) -> Self {
        Self {
            prompt: prompt.as_str().to_string(),
        }
    }
}

/// Backend reply. Fields are only checked for presence: a missing or
/// non-string field reads as `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationResponse {
    pub status: Option<String>,
    pub image_url: Option<String>,
    pub prompt: Option<String>,
    pub message: Option<String>,
}

impl From<&Value> for GenerationResponse {
    fn from(body: &Value) -> Self {
        let field = |key: &str| body.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            status: field("status"),
            image_url: field("image_url"),
            prompt: field("prompt"),
            message: field("message"),
        }
    }
}

impl GenerationResponse {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }
}

/// Sequence number handed out per activation of the generate button.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub struct Ticket(pub u64);

use super::{GenerateError, GenerationResponse, Prompt, Ticket};

pub const DEFAULT_IMAGE_ALT: &str = "AI generated image";
pub const EMPTY_DOWNLOAD_HREF: &str = "#";

/// Which display region is visible. Only one at a time.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Panel {
    #[default]
    Idle,
    Loading,
    Error,
    Result,
}

/// Everything the generator view renders, owned by the root component.
#[derive(Clone, PartialEq, Debug)]
pub struct DisplayState {
    pub panel: Panel,
    pub error_message: String,
    pub image_src: String,
    pub image_alt: String,
    pub displayed_prompt: String,
    pub download_href: String,
    /// Ticket of the most recent activation.
    latest: Ticket,
    latest_response_wins: bool,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            panel: Panel::Idle,
            error_message: String::new(),
            image_src: String::new(),
            image_alt: DEFAULT_IMAGE_ALT.to_string(),
            displayed_prompt: String::new(),
            download_href: EMPTY_DOWNLOAD_HREF.to_string(),
            latest: Ticket::default(),
            latest_response_wins: false,
        }
    }
}

impl DisplayState {
    pub fn new(latest_response_wins: bool) -> Self {
        Self {
            latest_response_wins,
            ..Self::default()
        }
    }

    pub fn set_latest_response_wins(&mut self, enabled: bool) {
        self.latest_response_wins = enabled;
    }

    pub fn is_loading(&self) -> bool {
        self.panel == Panel::Loading
    }

    pub fn error(&self) -> Option<&str> {
        (self.panel == Panel::Error).then_some(self.error_message.as_str())
    }

    /// Start an activation: reset, validate, and switch to loading.
    ///
    /// Returns the prompt to send and the ticket the settlement must carry,
    /// or `None` when validation failed and no request should go out.
    pub fn begin(&mut self, raw_prompt: &str) -> Option<(Prompt, Ticket)> {
        self.reset();
        self.latest = Ticket(self.latest.0 + 1);

        match Prompt::parse(raw_prompt) {
            Ok(prompt) => {
                self.panel = Panel::Loading;
                Some((prompt, self.latest))
            }
            Err(err) => {
                self.show_error(&err);
                None
            }
        }
    }

    /// Apply the outcome of the request started with `ticket`.
    ///
    /// Returns `false` when the outcome was dropped because a newer activation
    /// exists and `latest_response_wins` is set.
    pub fn settle(
        &mut self,
        ticket: Ticket,
        outcome: Result<GenerationResponse, GenerateError>,
    ) -> bool {
        if self.latest_response_wins && ticket != self.latest {
            tracing::debug!(?ticket, latest = ?self.latest, "Discarding superseded response");
            return false;
        }

        // Loading is hidden on every path.
        if self.panel == Panel::Loading {
            self.panel = Panel::Idle;
        }

        match outcome {
            Ok(response) => self.show_result(response),
            Err(err) => self.show_error(&err),
        }
        true
    }

    fn reset(&mut self) {
        self.panel = Panel::Idle;
        self.error_message.clear();
        self.image_src.clear();
        self.image_alt = DEFAULT_IMAGE_ALT.to_string();
        self.displayed_prompt.clear();
        self.download_href = EMPTY_DOWNLOAD_HREF.to_string();
    }

    fn show_result(&mut self, response: GenerationResponse) {
        let image_url = response.image_url.unwrap_or_default();
        let prompt = response.prompt.unwrap_or_default();

        self.image_alt = format!("Image generated for: {}", prompt);
        self.image_src = image_url.clone();
        self.download_href = image_url;
        self.displayed_prompt = prompt;
        self.panel = Panel::Result;
    }

    fn show_error(&mut self, err: &GenerateError) {
        self.error_message = err.to_string();
        self.panel = Panel::Error;
    }
}

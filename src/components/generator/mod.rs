mod error_panel;
mod image_result;
mod loading;
mod prompt_input;

use crate::utils::{DisplayState, GenerateClient, GenerateError, Panel};
use dioxus::core::spawn_forever;
use dioxus::prelude::*;
use std::sync::Arc;

pub use error_panel::ErrorPanel;
pub use image_result::ImageResult;
pub use loading::LoadingIndicator;
pub use prompt_input::PromptInput;

/// Client handle shared with the generator. `Err` carries why the client
/// could not be built from the configured backend URL.
pub type ClientHandle = Result<Arc<GenerateClient>, String>;

#[component]
pub fn Generator(
    display: Signal<DisplayState>,
    prompt_text: Signal<String>,
    client: Signal<ClientHandle>,
) -> Element {
    let mut display = display;

    // One activation: reset and validate synchronously, then one request.
    // Nothing is serialized or cancelled; each settlement lands when it arrives.
    let generate = move |_| {
        let raw = prompt_text.read().clone();
        let Some((prompt, ticket)) = display.write().begin(&raw) else {
            tracing::debug!("Rejected empty prompt");
            return;
        };

        let backend = client.read().clone();
        // Not tied to this view: a request settles even if the user
        // navigates to settings while it is in flight.
        spawn_forever(async move {
            let outcome = match backend {
                Ok(backend) => backend.generate(&prompt).await,
                Err(reason) => {
                    tracing::error!(%reason, "No usable backend client");
                    Err(GenerateError::Transport(reason))
                }
            };
            display.write().settle(ticket, outcome);
        });
    };

    let state = display.read().clone();
    let (image_src, download_href) = match client.read().as_ref() {
        Ok(backend) => (
            backend.resolve_asset(&state.image_src),
            backend.resolve_asset(&state.download_href),
        ),
        Err(_) => (state.image_src.clone(), state.download_href.clone()),
    };

    rsx! {
        div {
            class: "container",

            PromptInput {
                value: prompt_text,
                busy: state.is_loading(),
                on_submit: generate,
            }

            LoadingIndicator { visible: state.panel == Panel::Loading }

            ErrorPanel {
                visible: state.panel == Panel::Error,
                message: state.error_message.clone(),
            }

            ImageResult {
                visible: state.panel == Panel::Result,
                image_src,
                image_alt: state.image_alt.clone(),
                displayed_prompt: state.displayed_prompt.clone(),
                download_href,
            }
        }
    }
}

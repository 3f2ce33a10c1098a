use dioxus::prelude::*;

mod components;
mod utils;

use components::{ClientHandle, Generator, Header, SettingsView};
use std::sync::Arc;
use utils::{AppView, DisplayState, GenerateClient, Settings};

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    // Settings decide the log level, so they are read before logging is up.
    let (settings, load_error) = match Settings::load() {
        Ok(settings) => (settings, None),
        Err(e) => (Settings::default(), Some(e)),
    };

    if let Err(e) = dioxus::logger::init(settings.tracing_level()) {
        eprintln!("Failed to initialize logger: {}", e);
    }
    if let Some(e) = load_error {
        tracing::warn!(error = %e, "Failed to load settings, using defaults");
    }
    tracing::info!(backend_url = %settings.effective_backend_url(), "Starting image generator");

    dioxus::LaunchBuilder::new().with_context(settings).launch(App);
}

fn build_client(backend_url: &str) -> ClientHandle {
    GenerateClient::new(backend_url)
        .map(Arc::new)
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to create backend client");
            e.to_string()
        })
}

#[component]
fn App() -> Element {
    let initial_settings = use_context::<Settings>();
    let mut app_settings = use_signal(|| initial_settings);

    let mut client = use_signal(|| build_client(app_settings.read().effective_backend_url()));

    let mut theme = use_signal(|| app_settings.read().theme);

    // Generator state lives here so it survives a trip through the settings view.
    let mut display = use_signal(|| DisplayState::new(app_settings.read().latest_response_wins));
    let prompt_text = use_signal(String::new);

    let mut current_view = use_signal(|| AppView::Generator);

    let toggle_theme = move |_| {
        let new_theme = theme.read().toggled();
        theme.set(new_theme);

        let mut settings = app_settings.write();
        settings.theme = new_theme;
        if let Err(e) = settings.save() {
            tracing::warn!(error = %e, "Failed to save theme");
        }
    };

    let open_settings = move |_| {
        current_view.set(AppView::Settings);
    };

    let close_settings = move |_| {
        current_view.set(AppView::Generator);
    };

    let save_settings = move |updated: Settings| {
        if updated.effective_backend_url() != app_settings.read().effective_backend_url() {
            client.set(build_client(updated.effective_backend_url()));
        }
        display.write().set_latest_response_wins(updated.latest_response_wins);

        if let Err(e) = updated.save() {
            tracing::error!(error = %e, "Failed to save settings");
        }
        app_settings.set(updated);
        current_view.set(AppView::Generator);
    };

    let data_theme = theme.read().data_theme();
    let backend_url = app_settings.read().effective_backend_url().to_string();

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        div {
            "data-theme": "{data_theme}",
            class: "app",

            Header {
                theme,
                backend_url,
                on_toggle_theme: toggle_theme,
                on_settings: open_settings,
            }

            main {
                match *current_view.read() {
                    AppView::Generator => rsx! {
                        Generator { display, prompt_text, client }
                    },
                    AppView::Settings => rsx! {
                        SettingsView {
                            app_settings,
                            on_save: save_settings,
                            on_close: close_settings,
                        }
                    },
                }
            }
        }
    }
}

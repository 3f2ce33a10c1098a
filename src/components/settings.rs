use crate::utils::{GenerateClient, Settings};
use dioxus::prelude::*;

#[component]
pub fn SettingsView(
    app_settings: Signal<Settings>,
    on_save: EventHandler<Settings>,
    on_close: EventHandler<()>,
) -> Element {
    let current = app_settings.read().clone();
    let mut backend_url = use_signal(|| current.effective_backend_url().to_string());
    let mut latest_response_wins = use_signal(|| current.latest_response_wins);
    let mut url_error = use_signal(|| None::<String>);

    let save = move |_| {
        let url = backend_url.read().trim().to_string();

        // Validate before persisting so a typo never lands on disk.
        if let Err(e) = GenerateClient::new(&url) {
            url_error.set(Some(e.to_string()));
            return;
        }
        url_error.set(None);

        let mut updated = app_settings.read().clone();
        // An edited URL replaces the environment override for this session
        // and becomes the saved value.
        if url != updated.effective_backend_url() {
            updated.backend_url = url;
            updated.backend_url_override = None;
        }
        updated.latest_response_wins = *latest_response_wins.read();
        on_save.call(updated);
    };

    rsx! {
        div {
            class: "container",

            div {
                class: "header-controls",
                h1 { "Settings" }
                button {
                    class: "button",
                    title: "Close settings",
                    onclick: move |_| on_close.call(()),
                    "Close"
                }
            }

            div {
                class: "settings-card",

                div {
                    class: "settings-field",
                    label { r#for: "backendUrl", "Backend URL" }
                    input {
                        id: "backendUrl",
                        r#type: "text",
                        value: "{backend_url}",
                        oninput: move |evt| backend_url.set(evt.value()),
                    }
                    span {
                        class: "hint",
                        "Image requests are sent to <backend URL>/generate"
                    }
                    if let Some(err) = url_error() {
                        div { class: "error-message", "{err}" }
                    }
                }

                label {
                    class: "header-controls",
                    input {
                        r#type: "checkbox",
                        checked: *latest_response_wins.read(),
                        onchange: move |evt| latest_response_wins.set(evt.checked()),
                    }
                    div {
                        div { "Only show the newest request" }
                        div {
                            class: "hint",
                            if *latest_response_wins.read() {
                                "Responses to older requests are ignored once a newer one is sent"
                            } else {
                                "Every response is shown in the order it arrives"
                            }
                        }
                    }
                }

                button {
                    class: "button button-primary",
                    onclick: save,
                    "Save"
                }
            }
        }
    }
}

use crate::utils::Theme;
use dioxus::prelude::*;

#[component]
pub fn Header(
    theme: Signal<Theme>,
    backend_url: String,
    on_toggle_theme: EventHandler<()>,
    on_settings: EventHandler<()>,
) -> Element {
    let is_dark = theme.read().is_dark();

    rsx! {
        header {
            class: "header",

            // Left side - Title
            div {
                span { class: "header-title", "Image Generator" }
                div { class: "hint", "Backend: {backend_url}" }
            }

            // Right side - Controls
            div {
                class: "header-controls",

                button {
                    class: "button",
                    title: "Toggle light/dark mode",
                    onclick: move |_| on_toggle_theme.call(()),
                    if is_dark { "Light mode" } else { "Dark mode" }
                }

                button {
                    class: "button",
                    title: "Settings",
                    onclick: move |_| on_settings.call(()),
                    "Settings"
                }
            }
        }
    }
}

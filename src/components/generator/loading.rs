use dioxus::prelude::*;

#[component]
pub fn LoadingIndicator(visible: bool) -> Element {
    rsx! {
        div {
            id: "loading",
            class: if visible { "loading" } else { "loading hidden" },
            div { class: "loading-dot" }
            div { class: "loading-dot" }
            div { class: "loading-dot" }
            span { "Generating image..." }
        }
    }
}

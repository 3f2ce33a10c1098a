use dioxus::prelude::*;

#[component]
pub fn ErrorPanel(visible: bool, message: String) -> Element {
    rsx! {
        div {
            id: "errorMessage",
            class: if visible { "error-message" } else { "error-message hidden" },
            role: "alert",
            "{message}"
        }
    }
}

use dioxus::prelude::*;

#[component]
pub fn ImageResult(
    visible: bool,
    image_src: String,
    image_alt: String,
    displayed_prompt: String,
    download_href: String,
) -> Element {
    rsx! {
        div {
            id: "image-display",
            class: if visible { "image-display" } else { "image-display hidden" },

            // No src attribute at all while empty, so nothing is fetched.
            if !image_src.is_empty() {
                img {
                    id: "generatedImage",
                    src: "{image_src}",
                    alt: "{image_alt}",
                }
            }

            p {
                span { class: "hint", "Prompt: " }
                span { id: "displayedPrompt", "{displayed_prompt}" }
            }

            a {
                id: "downloadLink",
                class: "button button-primary",
                href: "{download_href}",
                download: "",
                target: "_blank",
                "Download image"
            }
        }
    }
}

use dioxus::prelude::*;

#[component]
pub fn PromptInput(value: Signal<String>, busy: bool, on_submit: EventHandler<()>) -> Element {
    let mut value = value;

    // Ctrl+Enter submits, plain Enter inserts a newline.
    let handle_keydown = move |evt: KeyboardEvent| {
        if evt.key() == Key::Enter && evt.modifiers().contains(Modifiers::CONTROL) {
            evt.prevent_default();
            on_submit.call(());
        }
    };

    rsx! {
        div {
            class: "settings-field",

            textarea {
                id: "promptInput",
                class: "prompt-input",
                value: "{value}",
                oninput: move |evt| value.set(evt.value()),
                onkeydown: handle_keydown,
                placeholder: "Describe the image you want... (Ctrl+Enter to generate)",
                autofocus: true,
            }

            div {
                class: "header-controls",

                // Left enabled while busy: a second click starts a second request.
                button {
                    id: "generateButton",
                    class: "button button-primary",
                    onclick: move |_| on_submit.call(()),
                    if busy { "Generating..." } else { "Generate image" }
                }

                span {
                    class: "hint",
                    "Use Ctrl+Enter to generate, Enter for new line"
                }
            }
        }
    }
}

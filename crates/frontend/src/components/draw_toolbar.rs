use dioxus::prelude::*;

use crate::drawing::DrawTool;

#[component]
pub fn DrawToolbar(tool: Signal<DrawTool>, drafting: bool, on_cancel: EventHandler<()>) -> Element {
    let current = *tool.read();

    rsx! {
        div { class: "draw-toolbar",
            for t in DrawTool::ALL {
                button {
                    class: if current == t { "active" } else { "" },
                    "aria-pressed": current == t,
                    onclick: move |_| {
                        // Switching tools abandons any half-drawn shape
                        on_cancel.call(());
                        tool.set(t);
                    },
                    {t.label()}
                }
            }
            if drafting {
                button {
                    class: "secondary",
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
            }
        }
    }
}

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use crate::edit_core::{EditSession, SaveStatus};

mod markdown_pane;
mod member_table;
mod post_editor;
mod post_picker;

pub use member_table::MemberTablePage;
pub use post_editor::PostEditorPage;
pub use post_picker::PostPickerPage;

/// How long the saved flash stays up before dropping back to idle.
const SAVED_FLASH_MS: i32 = 1500;

pub(crate) const LABEL_STYLE: &str = "display: block; font-size: 0.65rem; font-weight: 600; \
     letter-spacing: 0.08em; text-transform: uppercase; color: var(--accent-color); \
     margin-bottom: 0.25rem;";

pub(crate) const INPUT_STYLE: &str = "width: 100%; box-sizing: border-box; padding: 0.3rem 0.5rem; \
     border: 1px solid var(--border-color); border-radius: var(--radius-md); \
     background: var(--bg-primary); color: var(--text-primary); font-size: 0.9rem;";

pub(crate) const BUTTON_STYLE: &str = "padding: 0.4rem 1.1rem; border: none; \
     border-radius: var(--radius-md); background: var(--accent-color); color: #ffffff; \
     font-size: 0.85rem; font-weight: 600; cursor: pointer;";

pub(crate) const GHOST_BUTTON_STYLE: &str = "padding: 0.4rem 1.1rem; \
     border: 1px solid var(--border-color); border-radius: var(--radius-md); \
     background: var(--bg-primary); color: var(--text-primary); font-size: 0.85rem; \
     cursor: pointer;";

/// Schedules the saved to idle display transition. `try_update` tolerates a
/// view that was torn down before the timer fired.
pub(crate) fn schedule_status_reset(session: RwSignal<EditSession>) {
    let callback = Closure::once_into_js(move || {
        let _ = session.try_update(|session| session.display_elapsed());
    });
    let _ = window().set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.as_ref().unchecked_ref(),
        SAVED_FLASH_MS,
    );
}

fn status_caption(status: SaveStatus) -> Option<(&'static str, &'static str)> {
    match status {
        SaveStatus::Idle => None,
        SaveStatus::Unsaved => Some(("Unsaved", "var(--accent-color)")),
        SaveStatus::Saving => Some(("Saving...", "var(--accent-color)")),
        SaveStatus::Saved => Some(("Saved!", "#15803d")),
        SaveStatus::Error => Some(("Save failed.", "#dc2626")),
    }
}

/// One-line save status readout shown next to the edit controls.
#[component]
pub fn StatusLine(status: Memo<SaveStatus>) -> impl IntoView {
    view! {
        <div style="font-size: 0.8rem; min-height: 1.2rem;">
            {move || {
                status_caption(status.get()).map(|(label, color)| {
                    view! { <span style=format!("color: {color}; font-weight: 600;")>{label}</span> }
                })
            }}
        </div>
    }
}

#[component]
pub fn BackToPostsLink() -> impl IntoView {
    view! {
        <a
            href="?page=posts"
            style="display: inline-block; margin-bottom: 1rem; font-size: 0.85rem; \
                   color: var(--text-muted); text-decoration: none;"
        >
            "\u{2190} Back to all posts"
        </a>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_has_no_caption() {
        assert_eq!(status_caption(SaveStatus::Idle), None);
    }

    #[test]
    fn every_active_status_has_a_caption() {
        assert_eq!(status_caption(SaveStatus::Unsaved).unwrap().0, "Unsaved");
        assert_eq!(status_caption(SaveStatus::Saving).unwrap().0, "Saving...");
        assert_eq!(status_caption(SaveStatus::Saved).unwrap().0, "Saved!");
        assert_eq!(status_caption(SaveStatus::Error).unwrap().0, "Save failed.");
    }
}

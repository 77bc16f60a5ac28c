use leptos::html;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use crate::preview::{render_preview, Preview};

use super::{INPUT_STYLE, LABEL_STYLE};

/// Preview pane height before the first measurement arrives.
const DEFAULT_PANE_HEIGHT_PX: f64 = 160.0;

/// Owns the ResizeObserver and its callback. Dropping it detaches the
/// observation before the closure is released.
struct PaneObserver {
    observer: web_sys::ResizeObserver,
    _callback: Closure<dyn FnMut(js_sys::Array)>,
}

impl PaneObserver {
    fn watch(target: &web_sys::Element, set_height: WriteSignal<f64>) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
            for entry in entries.iter() {
                if let Ok(entry) = entry.dyn_into::<web_sys::ResizeObserverEntry>() {
                    let height = entry.target().get_bounding_client_rect().height();
                    let _ = set_height.try_set(height);
                }
            }
        });
        let observer = web_sys::ResizeObserver::new(callback.as_ref().unchecked_ref())?;
        observer.observe(target);
        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for PaneObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Markdown textarea with a live preview pane beside it. The preview tracks
/// the textarea's height, including manual drag-resizes, so the two panes
/// stay level.
#[component]
pub fn MarkdownEditor(
    content: Signal<String>,
    disabled: Signal<bool>,
    on_input: Callback<String>,
) -> impl IntoView {
    let editor_ref: NodeRef<html::Textarea> = NodeRef::new();
    let (pane_height, set_pane_height) = signal(DEFAULT_PANE_HEIGHT_PX);
    let observer = StoredValue::new_local(None::<PaneObserver>);

    Effect::new(move |_| {
        if observer.with_value(Option::is_some) {
            return;
        }
        let Some(textarea) = editor_ref.get() else {
            return;
        };
        set_pane_height.set(f64::from(textarea.offset_height()));
        match PaneObserver::watch(&textarea, set_pane_height) {
            Ok(active) => observer.set_value(Some(active)),
            Err(error) => web_sys::console::error_1(&error),
        }
    });

    on_cleanup(move || observer.set_value(None));

    view! {
        <div style="display: flex; gap: 0.75rem; align-items: flex-start;">
            <div style="flex: 1; min-width: 0;">
                <label style=LABEL_STYLE>"Editor"</label>
                <textarea
                    node_ref=editor_ref
                    style=format!(
                        "height: {DEFAULT_PANE_HEIGHT_PX}px; resize: vertical; \
                         font-family: monospace; line-height: 1.45; {INPUT_STYLE}",
                    )
                    prop:value=move || content.get()
                    disabled=move || disabled.get()
                    on:input=move |ev| on_input.run(event_target_value(&ev))
                    placeholder="Write your Markdown here..."
                    spellcheck="false"
                ></textarea>
            </div>
            <div style="flex: 1; min-width: 0;">
                <label style=LABEL_STYLE>"Preview"</label>
                <div style=move || {
                    format!(
                        "height: {}px; overflow-y: auto; box-sizing: border-box; \
                         padding: 0.3rem 0.6rem; border: 1px solid var(--border-color); \
                         border-radius: var(--radius-md); background: var(--bg-secondary); \
                         font-size: 0.9rem;",
                        pane_height.get(),
                    )
                }>
                    {move || match render_preview(&content.get()) {
                        Preview::Placeholder => view! {
                            <span style="color: var(--text-muted); font-size: 0.8rem; font-style: italic;">
                                "(Markdown preview will appear here)"
                            </span>
                        }
                            .into_any(),
                        Preview::Rendered(html) => view! {
                            <div class="markdown-preview" inner_html=html></div>
                        }
                            .into_any(),
                    }}
                </div>
            </div>
        </div>
    }
}

#[component]
fn GuideColumn(title: &'static str, lines: Vec<&'static str>) -> impl IntoView {
    view! {
        <div>
            <p style="margin: 0 0 0.3rem 0; font-size: 0.7rem; font-weight: 700; \
                      letter-spacing: 0.08em; text-transform: uppercase; \
                      color: var(--accent-color);">{title}</p>
            {lines
                .into_iter()
                .map(|line| {
                    view! {
                        <p style="margin: 0.15rem 0; font-family: monospace; \
                                  font-size: 0.75rem; color: var(--text-secondary);">{line}</p>
                    }
                })
                .collect::<Vec<_>>()}
        </div>
    }
}

/// Collapsible cheat sheet for the markdown syntax the preview understands.
#[component]
pub fn MarkdownGuide() -> impl IntoView {
    let (open, set_open) = signal(false);

    view! {
        <div style="margin-bottom: 1rem; border: 1px solid var(--border-color); \
                    border-radius: var(--radius-md); background: var(--bg-secondary);">
            <button
                type="button"
                on:click=move |_| set_open.update(|open| *open = !*open)
                style="width: 100%; display: flex; justify-content: space-between; \
                       padding: 0.5rem 0.75rem; border: none; background: transparent; \
                       color: var(--text-primary); font-size: 0.85rem; font-weight: 600; \
                       cursor: pointer;"
            >
                <span>"Markdown quick reference"</span>
                <span>{move || if open.get() { "\u{2212}" } else { "+" }}</span>
            </button>
            {move || {
                open.get()
                    .then(|| {
                        view! {
                            <div style="display: grid; grid-template-columns: repeat(4, 1fr); \
                                        gap: 1rem; padding: 0.25rem 0.75rem 0.75rem 0.75rem;">
                                <GuideColumn
                                    title="Text"
                                    lines=vec![
                                        "# Heading 1",
                                        "## Heading 2",
                                        "**bold**",
                                        "*italic*",
                                        "~~strikethrough~~",
                                    ]
                                />
                                <GuideColumn
                                    title="Lists"
                                    lines=vec![
                                        "- Bullet item",
                                        "1. Numbered item",
                                        "- [ ] Open task",
                                        "- [x] Done task",
                                    ]
                                />
                                <GuideColumn
                                    title="Links & media"
                                    lines=vec![
                                        "[Label](https://example.com)",
                                        "![Alt text](image-url)",
                                        "`inline code`",
                                    ]
                                />
                                <GuideColumn
                                    title="Blocks"
                                    lines=vec![
                                        "> Quoted line",
                                        "``` fenced code ```",
                                        "| Col | Col |",
                                        "| --- | --- |",
                                    ]
                                />
                            </div>
                        }
                    })
            }}
        </div>
    }
}

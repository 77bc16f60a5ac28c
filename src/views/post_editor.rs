use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{log_failure, PortalApi};
use crate::edit_core::{EditBuffer, EditSession};
use crate::records::{date_portion, Post, PostPatch, Record, RecordId, RecordPatch};

use super::markdown_pane::{MarkdownEditor, MarkdownGuide};
use super::{
    schedule_status_reset, BackToPostsLink, StatusLine, BUTTON_STYLE, GHOST_BUTTON_STYLE,
    INPUT_STYLE, LABEL_STYLE,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EditorPhase {
    Loading,
    /// The url carried no post selector at all.
    Missing,
    /// The selector was present but no such post exists.
    NotFound,
    Ready,
}

fn notice_panel(heading: &'static str, body: String) -> impl IntoView {
    view! {
        <div style="max-width: 28rem; margin: 3rem auto; padding: 1.5rem; text-align: center; \
                    border: 1px solid var(--border-color); border-radius: var(--radius-md); \
                    background: var(--bg-secondary);">
            <h2 style="margin: 0 0 0.5rem 0; font-size: 1.1rem;">{heading}</h2>
            <p style="margin: 0; font-size: 0.9rem; color: var(--text-muted);">{body}</p>
        </div>
    }
}

/// Editor for one post, selected by the `post` query parameter.
#[component]
pub fn PostEditorPage(api: PortalApi, selector: Option<String>) -> impl IntoView {
    let api = StoredValue::new(api);
    let buffer = RwSignal::new(EditBuffer::new());
    let session = RwSignal::new(EditSession::new());
    let (phase, set_phase) = signal(EditorPhase::Loading);
    let (post_id, set_post_id) = signal(None::<RecordId>);

    let selector_text = selector.clone().unwrap_or_default();
    let selector = StoredValue::new(selector);

    Effect::new(move |_| {
        let api = api.get_value();
        match selector.get_value() {
            None => set_phase.set(EditorPhase::Missing),
            Some(raw) => match raw.parse::<RecordId>() {
                Err(_) => set_phase.set(EditorPhase::NotFound),
                Ok(id) => {
                    spawn_local(async move {
                        match api.fetch_post(id).await {
                            Ok(Some(post)) => {
                                buffer.update(|buffer| buffer.seed(vec![Record::Post(post)]));
                                set_post_id.set(Some(id));
                                set_phase.set(EditorPhase::Ready);
                            }
                            Ok(None) => set_phase.set(EditorPhase::NotFound),
                            Err(error) => {
                                log_failure("loading post", &error);
                                set_phase.set(EditorPhase::NotFound);
                            }
                        }
                    });
                }
            },
        }
    });

    view! {
        <div style="max-width: 64rem; margin: 0 auto; padding: 1.25rem;">
            <BackToPostsLink/>
            {move || match phase.get() {
                EditorPhase::Loading => view! {
                    <p style="text-align: center; color: var(--text-muted);">"Loading post..."</p>
                }
                    .into_any(),
                EditorPhase::Missing => notice_panel(
                    "No post selected",
                    "Open a post from the list to start editing.".to_string(),
                )
                    .into_any(),
                EditorPhase::NotFound => notice_panel(
                    "Post not found",
                    format!("The post with ID {selector_text} doesn't exist or was deleted."),
                )
                    .into_any(),
                EditorPhase::Ready => match post_id.get() {
                    Some(id) => view! {
                        <MarkdownGuide/>
                        <h1 style="margin: 0 0 1rem 0; font-size: 1.3rem;">
                            "Editing Post #" {id}
                        </h1>
                        <PostForm api=api buffer=buffer session=session id=id/>
                    }
                        .into_any(),
                    None => ().into_any(),
                },
            }}
        </div>
    }
}

fn post_field(buffer: &EditBuffer, id: RecordId, read: fn(&Post) -> &Option<String>) -> String {
    buffer
        .get(id)
        .and_then(Record::as_post)
        .and_then(|post| read(post).clone())
        .unwrap_or_default()
}

#[component]
fn PostForm(
    api: StoredValue<PortalApi>,
    buffer: RwSignal<EditBuffer>,
    session: RwSignal<EditSession>,
    id: RecordId,
) -> impl IntoView {
    let editing = Memo::new(move |_| session.get().is_editing());
    let status = Memo::new(move |_| session.get().status());

    let edit = move |patch: PostPatch| {
        buffer.update(|buffer| {
            buffer.patch(id, RecordPatch::Post(patch));
        });
        session.update(|session| session.note_patch());
    };

    let save = move |_| {
        let snapshot = buffer.with_untracked(|buffer| buffer.get(id).and_then(Record::as_post).cloned());
        let Some(post) = snapshot else {
            return;
        };
        let accepted = session
            .try_update(|session| session.begin_save())
            .unwrap_or(false);
        if !accepted {
            return;
        }
        let api = api.get_value();
        spawn_local(async move {
            match api.update_post(&post).await {
                Ok(()) => {
                    session.update(|session| session.save_succeeded());
                    schedule_status_reset(session);
                }
                Err(error) => {
                    log_failure("saving post", &error);
                    session.update(|session| session.save_failed());
                }
            }
        });
    };

    view! {
        <div style="display: flex; flex-direction: column; gap: 0.9rem;">
            <div style="display: grid; grid-template-columns: 2fr 1fr 1fr; gap: 0.75rem;">
                <div>
                    <label style=LABEL_STYLE>"Title"</label>
                    <input
                        style=INPUT_STYLE
                        prop:value=move || buffer.with(|buffer| post_field(buffer, id, |post| &post.title))
                        disabled=move || !editing.get()
                        on:input=move |ev| edit(PostPatch::title(event_target_value(&ev)))
                    />
                </div>
                <div>
                    <label style=LABEL_STYLE>"Author"</label>
                    <input
                        style=INPUT_STYLE
                        prop:value=move || buffer.with(|buffer| post_field(buffer, id, |post| &post.author))
                        disabled=move || !editing.get()
                        on:input=move |ev| edit(PostPatch::author(event_target_value(&ev)))
                    />
                </div>
                <div>
                    <label style=LABEL_STYLE>"Date"</label>
                    <input
                        type="date"
                        style=INPUT_STYLE
                        prop:value=move || {
                            buffer.with(|buffer| {
                                date_portion(&post_field(buffer, id, |post| &post.date)).to_string()
                            })
                        }
                        disabled=move || !editing.get()
                        on:input=move |ev| edit(PostPatch::date(event_target_value(&ev)))
                    />
                </div>
            </div>
            <div>
                <label style=LABEL_STYLE>"Description"</label>
                <input
                    style=INPUT_STYLE
                    prop:value=move || buffer.with(|buffer| post_field(buffer, id, |post| &post.description))
                    disabled=move || !editing.get()
                    on:input=move |ev| edit(PostPatch::description(event_target_value(&ev)))
                />
            </div>
            <MarkdownEditor
                content=Signal::derive(move || {
                    buffer.with(|buffer| post_field(buffer, id, |post| &post.content))
                })
                disabled=Signal::derive(move || !editing.get())
                on_input=Callback::new(move |value: String| edit(PostPatch::content(value)))
            />
            <div style="display: flex; align-items: center; gap: 0.75rem;">
                {move || {
                    if editing.get() {
                        view! { <button style=BUTTON_STYLE on:click=save>"Save"</button> }.into_any()
                    } else {
                        view! {
                            <button
                                style=GHOST_BUTTON_STYLE
                                on:click=move |_| session.update(|session| session.enter_edit())
                            >
                                "Edit"
                            </button>
                        }
                            .into_any()
                    }
                }}
                <StatusLine status=status/>
            </div>
        </div>
    }
}

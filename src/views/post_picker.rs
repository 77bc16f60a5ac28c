use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{log_failure, PortalApi, PostDraft};
use crate::records::{date_portion, Post, RecordId};

use super::BUTTON_STYLE;

fn display_or<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    match value.as_deref() {
        Some(text) if !text.is_empty() => text,
        _ => fallback,
    }
}

/// List of every post, newest first, with create and delete controls. Picking
/// a card routes to the editor for that post.
#[component]
pub fn PostPickerPage(api: PortalApi) -> impl IntoView {
    let api = StoredValue::new(api);
    let (posts, set_posts) = signal(Vec::<Post>::new());
    let (loading, set_loading) = signal(true);

    let refresh = move || {
        let api = api.get_value();
        spawn_local(async move {
            match api.fetch_posts().await {
                Ok(list) => set_posts.set(list),
                Err(error) => log_failure("loading posts", &error),
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| refresh());

    let create_post = move |_| {
        let api = api.get_value();
        spawn_local(async move {
            match api.insert_post(&PostDraft::default()).await {
                Ok(post) => {
                    let _ = window()
                        .location()
                        .set_search(&format!("page=editor&post={}", post.id));
                }
                Err(error) => log_failure("creating post", &error),
            }
        });
    };

    let delete_post = move |id: RecordId| {
        let confirmed = window()
            .confirm_with_message("Delete this post? This cannot be undone.")
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        let api = api.get_value();
        spawn_local(async move {
            match api.delete_post(id).await {
                Ok(()) => refresh(),
                Err(error) => log_failure("deleting post", &error),
            }
        });
    };

    view! {
        <div style="max-width: 48rem; margin: 0 auto; padding: 1.25rem;">
            <div style="display: flex; align-items: center; justify-content: space-between; \
                        margin-bottom: 1rem;">
                <h1 style="margin: 0; font-size: 1.3rem;">"Posts"</h1>
                <button style=BUTTON_STYLE on:click=create_post>"New post"</button>
            </div>
            {move || {
                let list = posts.get();
                if loading.get() {
                    view! {
                        <p style="text-align: center; color: var(--text-muted);">
                            "Loading posts..."
                        </p>
                    }
                        .into_any()
                } else if list.is_empty() {
                    view! {
                        <p style="text-align: center; color: var(--text-muted);">
                            "No posts yet. Create the first one."
                        </p>
                    }
                        .into_any()
                } else {
                    view! {
                        <ul style="list-style: none; margin: 0; padding: 0; display: flex; \
                                   flex-direction: column; gap: 0.6rem;">
                            {list
                                .into_iter()
                                .map(|post| {
                                    let id = post.id;
                                    view! {
                                        <li style="display: flex; gap: 0.6rem; align-items: stretch;">
                                            <a
                                                href=format!("?page=editor&post={id}")
                                                style="flex: 1; min-width: 0; display: block; \
                                                       padding: 0.7rem 0.9rem; text-decoration: none; \
                                                       border: 1px solid var(--border-color); \
                                                       border-radius: var(--radius-md); \
                                                       background: var(--bg-secondary);"
                                            >
                                                <div style="display: flex; justify-content: space-between; \
                                                            gap: 0.5rem;">
                                                    <span style="font-weight: 600; font-size: 0.95rem;">
                                                        {display_or(&post.title, "Untitled post").to_string()}
                                                    </span>
                                                    <span style="font-size: 0.75rem; color: var(--text-muted); \
                                                                 white-space: nowrap;">
                                                        {date_portion(display_or(&post.date, "")).to_string()}
                                                    </span>
                                                </div>
                                                <p style="margin: 0.25rem 0 0 0; font-size: 0.8rem; \
                                                          color: var(--text-muted);">
                                                    {display_or(&post.description, "No description.").to_string()}
                                                </p>
                                                <p style="margin: 0.25rem 0 0 0; font-size: 0.75rem; \
                                                          color: var(--text-secondary);">
                                                    {display_or(&post.author, "Unknown author").to_string()}
                                                </p>
                                            </a>
                                            <button
                                                type="button"
                                                on:click=move |_| delete_post(id)
                                                style="padding: 0 0.8rem; border: 1px solid var(--border-color); \
                                                       border-radius: var(--radius-md); background: transparent; \
                                                       color: #dc2626; font-size: 0.8rem; cursor: pointer;"
                                            >
                                                "Delete"
                                            </button>
                                        </li>
                                    }
                                })
                                .collect::<Vec<_>>()}
                        </ul>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}

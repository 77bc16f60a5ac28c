use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{log_failure, PortalApi};
use crate::edit_core::{EditBuffer, EditSession};
use crate::listing::{self, SortKey, SortSpec};
use crate::records::{Member, MemberPatch, Record, RecordId, RecordPatch};

use super::{
    schedule_status_reset, StatusLine, BUTTON_STYLE, GHOST_BUTTON_STYLE, INPUT_STYLE,
};

const GRID_COLUMNS: &str = "grid-template-columns: 1fr 1fr 1fr 1.25fr 3fr 1.25fr;";

const HEADER_BUTTON_STYLE: &str = "padding: 0; border: none; background: transparent; \
     font-size: 0.7rem; font-weight: 700; letter-spacing: 0.08em; text-transform: uppercase; \
     text-align: left; cursor: pointer;";

const CELL_TEXT_STYLE: &str = "font-size: 0.85rem; white-space: nowrap; overflow: hidden; \
     text-overflow: ellipsis;";

fn member_field(buffer: &EditBuffer, id: RecordId, read: fn(&Member) -> &Option<String>) -> String {
    buffer
        .get(id)
        .and_then(Record::as_member)
        .and_then(|member| read(member).clone())
        .unwrap_or_default()
}

fn text_or_dash(value: String) -> String {
    if value.is_empty() {
        "\u{2014}".to_string()
    } else {
        value
    }
}

/// Roster table. Sorting and searching are client-side projections of the
/// edit buffer; the whole table saves as one batch.
#[component]
pub fn MemberTablePage(api: PortalApi) -> impl IntoView {
    let api = StoredValue::new(api);
    let buffer = RwSignal::new(EditBuffer::new());
    let session = RwSignal::new(EditSession::new());
    let sort = RwSignal::new(SortSpec::default());
    let search = RwSignal::new(String::new());
    let (loading, set_loading) = signal(true);

    Effect::new(move |_| {
        let api = api.get_value();
        spawn_local(async move {
            match api.fetch_members().await {
                Ok(members) => buffer.update(|buffer| {
                    buffer.seed(members.into_iter().map(Record::Member).collect());
                }),
                Err(error) => log_failure("loading members", &error),
            }
            set_loading.set(false);
        });
    });

    let editing = Memo::new(move |_| session.get().is_editing());
    let status = Memo::new(move |_| session.get().status());
    let rows = move || buffer.with(|buffer| listing::project(buffer, sort.get(), &search.get()));

    let save_all = move |_| {
        let batch: Vec<Member> = buffer.with_untracked(|buffer| {
            buffer
                .records()
                .iter()
                .filter_map(Record::as_member)
                .cloned()
                .collect()
        });
        let accepted = session
            .try_update(|session| session.begin_save())
            .unwrap_or(false);
        if !accepted {
            return;
        }
        let api = api.get_value();
        spawn_local(async move {
            match api.upsert_members(&batch).await {
                Ok(()) => {
                    session.update(|session| session.save_succeeded());
                    schedule_status_reset(session);
                }
                Err(error) => {
                    log_failure("saving members", &error);
                    session.update(|session| session.save_failed());
                }
            }
        });
    };

    let header_button = move |label: &'static str, key: SortKey| {
        view! {
            <button
                type="button"
                style=move || {
                    let color = if sort.get().key == key {
                        "var(--accent-color)"
                    } else {
                        "var(--text-muted)"
                    };
                    format!("{HEADER_BUTTON_STYLE} color: {color};")
                }
                on:click=move |_| sort.update(|spec| *spec = spec.toggled(key))
            >
                {label}
                " \u{21C5}"
            </button>
        }
    };

    view! {
        <div style="max-width: 72rem; margin: 0 auto; padding: 1.25rem;">
            <div style="display: flex; align-items: center; justify-content: space-between; \
                        margin-bottom: 1rem;">
                <h1 style="margin: 0; font-size: 1.3rem;">"Members"</h1>
                <div style="position: relative; width: 16rem;">
                    <input
                        style=INPUT_STYLE
                        prop:value=move || search.get()
                        on:input=move |ev| search.set(event_target_value(&ev))
                        placeholder="Search name, team, or role..."
                    />
                    {move || {
                        (!search.get().is_empty())
                            .then(|| {
                                view! {
                                    <button
                                        type="button"
                                        on:click=move |_| search.set(String::new())
                                        style="position: absolute; right: 0.4rem; top: 50%; \
                                               transform: translateY(-50%); border: none; \
                                               background: transparent; color: var(--text-muted); \
                                               font-size: 0.9rem; cursor: pointer;"
                                    >
                                        "\u{00D7}"
                                    </button>
                                }
                            })
                    }}
                </div>
            </div>
            <p style="margin: 0 0 0.75rem 0; font-size: 0.75rem; color: var(--text-muted);">
                "Click column headers to sort. Default: First name \u{2191}"
            </p>
            {move || {
                if loading.get() {
                    view! {
                        <p style="text-align: center; color: var(--text-muted);">
                            "Loading members..."
                        </p>
                    }
                        .into_any()
                } else {
                    view! {
                        <div style=format!(
                            "display: grid; {GRID_COLUMNS} gap: 0.5rem; padding: 0.4rem 0.6rem; \
                             border-bottom: 2px solid var(--border-color);",
                        )>
                            {header_button("First name", SortKey::FirstName)}
                            {header_button("Last name", SortKey::LastName)}
                            {header_button("Team", SortKey::Team)}
                            <span style=format!("{HEADER_BUTTON_STYLE} color: var(--text-muted); cursor: default;")>
                                "Role"
                            </span>
                            <span style=format!("{HEADER_BUTTON_STYLE} color: var(--text-muted); cursor: default;")>
                                "Bio"
                            </span>
                            <span style=format!("{HEADER_BUTTON_STYLE} color: var(--text-muted); cursor: default;")>
                                "Link"
                            </span>
                        </div>
                        <For
                            each=rows
                            key=|member| member.id
                            children=move |member: Member| {
                                view! {
                                    <MemberRow
                                        id=member.id
                                        api=api
                                        buffer=buffer
                                        session=session
                                        editing=editing
                                    />
                                }
                            }
                        />
                        {move || {
                            buffer
                                .with(EditBuffer::is_empty)
                                .then(|| {
                                    view! {
                                        <p style="text-align: center; color: var(--text-muted); \
                                                  font-size: 0.85rem;">
                                            "No members loaded."
                                        </p>
                                    }
                                })
                        }}
                    }
                        .into_any()
                }
            }}
            <div style="display: flex; align-items: center; gap: 0.75rem; margin-top: 1rem;">
                {move || {
                    if editing.get() {
                        view! { <button style=BUTTON_STYLE on:click=save_all>"Save all"</button> }
                            .into_any()
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

#[component]
fn MemberRow(
    id: RecordId,
    api: StoredValue<PortalApi>,
    buffer: RwSignal<EditBuffer>,
    session: RwSignal<EditSession>,
    editing: Memo<bool>,
) -> impl IntoView {
    let edit = move |patch: MemberPatch| {
        buffer.update(|buffer| {
            buffer.patch(id, RecordPatch::Member(patch));
        });
        session.update(|session| session.note_patch());
    };

    let open_link = move |_| {
        let url = buffer.with_untracked(|buffer| member_field(buffer, id, |member| &member.link));
        if url.is_empty() {
            return;
        }
        let api = api.get_value();
        spawn_local(async move {
            if let Err(error) = api.open_link(&url).await {
                log_failure("opening member link", &error);
            }
        });
    };

    let field = move |read: fn(&Member) -> &Option<String>| {
        buffer.with(|buffer| member_field(buffer, id, read))
    };

    view! {
        <div style=format!(
            "display: grid; {GRID_COLUMNS} gap: 0.5rem; align-items: center; \
             padding: 0.4rem 0.6rem; border-bottom: 1px solid var(--border-color);",
        )>
            {move || {
                if editing.get() {
                    view! {
                        <input
                            style=INPUT_STYLE
                            prop:value=move || field(|member| &member.first_name)
                            on:input=move |ev| edit(MemberPatch::first_name(event_target_value(&ev)))
                        />
                        <input
                            style=INPUT_STYLE
                            prop:value=move || field(|member| &member.last_name)
                            on:input=move |ev| edit(MemberPatch::last_name(event_target_value(&ev)))
                        />
                        <input
                            style=INPUT_STYLE
                            prop:value=move || field(|member| &member.team)
                            on:input=move |ev| edit(MemberPatch::team(event_target_value(&ev)))
                        />
                        <input
                            style=INPUT_STYLE
                            prop:value=move || field(|member| &member.role)
                            on:input=move |ev| edit(MemberPatch::role(event_target_value(&ev)))
                        />
                        <input
                            style=INPUT_STYLE
                            prop:value=move || field(|member| &member.bio)
                            on:input=move |ev| edit(MemberPatch::bio(event_target_value(&ev)))
                        />
                        <input
                            type="url"
                            style=INPUT_STYLE
                            prop:value=move || field(|member| &member.link)
                            on:input=move |ev| edit(MemberPatch::link(event_target_value(&ev)))
                        />
                    }
                        .into_any()
                } else {
                    view! {
                        <span style=CELL_TEXT_STYLE>
                            {move || text_or_dash(field(|member| &member.first_name))}
                        </span>
                        <span style=CELL_TEXT_STYLE>
                            {move || text_or_dash(field(|member| &member.last_name))}
                        </span>
                        <span style=CELL_TEXT_STYLE>
                            {move || text_or_dash(field(|member| &member.team))}
                        </span>
                        <span style=CELL_TEXT_STYLE title=move || field(|member| &member.role)>
                            {move || text_or_dash(field(|member| &member.role))}
                        </span>
                        <span style=CELL_TEXT_STYLE title=move || field(|member| &member.bio)>
                            {move || text_or_dash(field(|member| &member.bio))}
                        </span>
                        {move || {
                            if field(|member| &member.link).is_empty() {
                                view! { <span style=CELL_TEXT_STYLE>"\u{2014}"</span> }.into_any()
                            } else {
                                view! {
                                    <button
                                        type="button"
                                        on:click=open_link
                                        style="padding: 0; border: none; background: transparent; \
                                               text-align: left; font-size: 0.85rem; \
                                               color: var(--accent-color); cursor: pointer;"
                                    >
                                        "Open \u{2197}"
                                    </button>
                                }
                                    .into_any()
                            }
                        }}
                    }
                        .into_any()
                }
            }}
        </div>
    }
}

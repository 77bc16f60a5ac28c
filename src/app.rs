use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{log_failure, PortalApi, SessionInfo};
use crate::views::{MemberTablePage, PostEditorPage, PostPickerPage};

#[derive(Clone, Debug, PartialEq, Eq)]
enum Route {
    Home,
    Posts,
    Members,
    PostEditor { selector: Option<String> },
}

/// Routes a raw `?a=b&c=d` query string. Unknown or absent pages land on
/// the home screen.
fn route_from_search(search: &str) -> Route {
    match query_param(search, "page").as_deref() {
        Some("posts") => Route::Posts,
        Some("members") => Route::Members,
        Some("editor") => Route::PostEditor {
            selector: query_param(search, "post"),
        },
        _ => Route::Home,
    }
}

/// First value for `name`. A present-but-empty value counts as absent, so
/// `?post=` behaves like no selector at all.
fn query_param(search: &str, name: &str) -> Option<String> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

#[component]
pub fn App() -> impl IntoView {
    let (api, set_api) = signal(None::<PortalApi>);
    let (session, set_session) = signal(SessionInfo::default());

    Effect::new(move |_| {
        spawn_local(async move {
            match PortalApi::connect().await {
                Ok(handle) => {
                    // A session probe failure leaves the default signed-out info.
                    match handle.session().await {
                        Ok(info) => set_session.set(info),
                        Err(error) => log_failure("loading session", &error),
                    }
                    set_api.set(Some(handle));
                }
                Err(error) => log_failure("connecting to content store", &error),
            }
        });
    });

    let route = route_from_search(&window().location().search().unwrap_or_default());

    view! {
        <main style="min-height: 100vh; background: var(--bg-primary); color: var(--text-primary);">
            <TopBar/>
            {move || match api.get() {
                None => view! {
                    <p style="padding: 3rem 0; text-align: center; color: var(--text-muted);">
                        "Connecting to the content store..."
                    </p>
                }
                    .into_any(),
                Some(handle) => match route.clone() {
                    Route::Home => view! { <LandingPage session=session/> }.into_any(),
                    Route::Posts => view! { <PostPickerPage api=handle/> }.into_any(),
                    Route::Members => view! { <MemberTablePage api=handle/> }.into_any(),
                    Route::PostEditor { selector } => view! {
                        <PostEditorPage api=handle selector=selector/>
                    }
                        .into_any(),
                },
            }}
        </main>
    }
}

const TOPBAR_LINK_STYLE: &str = "font-size: 0.75rem; font-weight: 600; letter-spacing: 0.08em; \
     text-transform: uppercase; color: var(--text-secondary); text-decoration: none;";

#[component]
fn TopBar() -> impl IntoView {
    view! {
        <header style="display: flex; align-items: center; justify-content: space-between; \
                       height: var(--topbar-height); padding: 0 1.25rem; \
                       border-bottom: 1px solid var(--border-color); background: var(--bg-secondary);">
            <a
                href="?"
                style="font-size: 1rem; font-weight: 700; letter-spacing: 0.12em; \
                       color: var(--accent-color); text-decoration: none;"
            >
                "COPYDESK"
            </a>
            <nav style="display: flex; gap: 1.25rem;">
                <a href="?page=posts" style=TOPBAR_LINK_STYLE>"Edit posts"</a>
                <a href="?page=members" style=TOPBAR_LINK_STYLE>"Edit members"</a>
            </nav>
        </header>
    }
}

fn nav_card(href: &'static str, title: &'static str, caption: &'static str) -> impl IntoView {
    view! {
        <a
            href=href
            style="flex: 1; display: block; padding: 1rem; text-decoration: none; \
                   border: 1px solid var(--border-color); border-radius: var(--radius-md); \
                   background: var(--bg-secondary);"
        >
            <p style="margin: 0 0 0.3rem 0; font-weight: 600; color: var(--text-primary);">{title}</p>
            <p style="margin: 0; font-size: 0.8rem; color: var(--text-muted);">{caption}</p>
        </a>
    }
}

#[component]
fn LandingPage(session: ReadSignal<SessionInfo>) -> impl IntoView {
    let heading = move || {
        let info = session.get();
        if !info.signed_in {
            return "Welcome to the admin portal.".to_string();
        }
        match info.display_name.filter(|name| !name.is_empty()) {
            Some(name) => format!("Welcome back, {name}."),
            None => "Welcome back.".to_string(),
        }
    };

    let sub_heading = move || {
        if session.get().signed_in {
            "You're signed in and ready to keep the site content fresh."
        } else {
            "Sign in from the main site to unlock the editing tools."
        }
    };

    view! {
        <div style="max-width: 40rem; margin: 0 auto; padding: 2.5rem 1.25rem;">
            <h1 style="margin: 0 0 0.4rem 0; font-size: 1.5rem;">{heading}</h1>
            <p style="margin: 0 0 1.5rem 0; color: var(--text-muted);">{sub_heading}</p>
            <div style="margin-bottom: 1.5rem; padding: 0.8rem 1rem; \
                        border: 1px solid var(--border-color); border-radius: var(--radius-md); \
                        background: var(--bg-secondary); font-size: 0.85rem;">
                {move || {
                    if session.get().signed_in {
                        view! {
                            <span style="color: #15803d; font-weight: 600;">"\u{25CF} Signed in"</span>
                        }
                            .into_any()
                    } else {
                        view! {
                            <span style="color: var(--text-muted); font-weight: 600;">
                                "\u{25CB} Awaiting sign-in"
                            </span>
                        }
                            .into_any()
                    }
                }}
            </div>
            <div style="display: flex; gap: 0.75rem;">
                {nav_card(
                    "?page=posts",
                    "Manage posts",
                    "Write and publish site posts with a live Markdown preview.",
                )}
                {nav_card(
                    "?page=members",
                    "Manage members",
                    "Keep the public roster's names, teams, and links current.",
                )}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_search_routes_home() {
        assert_eq!(route_from_search(""), Route::Home);
        assert_eq!(route_from_search("?"), Route::Home);
    }

    #[test]
    fn unknown_page_routes_home() {
        assert_eq!(route_from_search("?page=reports"), Route::Home);
    }

    #[test]
    fn known_pages_route_directly() {
        assert_eq!(route_from_search("?page=posts"), Route::Posts);
        assert_eq!(route_from_search("?page=members"), Route::Members);
    }

    #[test]
    fn editor_route_carries_the_selector() {
        assert_eq!(
            route_from_search("?page=editor&post=12"),
            Route::PostEditor {
                selector: Some("12".to_string()),
            }
        );
    }

    #[test]
    fn editor_route_without_selector_carries_none() {
        assert_eq!(
            route_from_search("?page=editor"),
            Route::PostEditor { selector: None }
        );
        assert_eq!(
            route_from_search("?page=editor&post="),
            Route::PostEditor { selector: None }
        );
    }

    #[test]
    fn nonnumeric_selector_is_passed_through_raw() {
        assert_eq!(
            route_from_search("?page=editor&post=abc"),
            Route::PostEditor {
                selector: Some("abc".to_string()),
            }
        );
    }

    #[test]
    fn first_value_wins_for_repeated_params() {
        assert_eq!(route_from_search("?page=posts&page=members"), Route::Posts);
    }

    #[test]
    fn pairs_without_an_equals_sign_are_ignored() {
        assert_eq!(route_from_search("?editor&page=members"), Route::Members);
    }
}

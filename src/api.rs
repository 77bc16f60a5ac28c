use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::records::{Member, Post, RecordId};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["window", "__TAURI__", "core"])]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

/// Failure reported by the content store bridge, already flattened to a
/// message by the backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiError(String);

impl ApiError {
    fn from_js(value: JsValue) -> Self {
        match value.as_string() {
            Some(message) => Self(message),
            None => Self(format!("{value:?}")),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Diagnostic side channel. Failures reach the user through view state, not
/// through this log.
pub fn log_failure(context: &str, error: &ApiError) {
    web_sys::console::error_1(&format!("{context}: {error}").into());
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub signed_in: bool,
    pub display_name: Option<String>,
}

/// Fields for a post the store has not assigned an id to yet.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PostDraft {
    pub title: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
}

#[derive(Serialize)]
struct StoreArgs<'a> {
    store_path: &'a str,
}

#[derive(Serialize)]
struct PostIdArgs<'a> {
    store_path: &'a str,
    id: RecordId,
}

#[derive(Serialize)]
struct UpdatePostArgs<'a> {
    store_path: &'a str,
    post: &'a Post,
}

#[derive(Serialize)]
struct InsertPostArgs<'a> {
    store_path: &'a str,
    draft: &'a PostDraft,
}

#[derive(Serialize)]
struct UpsertMembersArgs<'a> {
    store_path: &'a str,
    members: &'a [Member],
}

#[derive(Serialize)]
struct OpenLinkArgs<'a> {
    url: &'a str,
}

/// Handle to the content store backend. Connected once at startup and handed
/// to every view that needs persistence; nothing else talks to the bridge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortalApi {
    store_path: String,
}

impl PortalApi {
    /// Asks the backend to open (seeding if necessary) the content store and
    /// returns a handle bound to its location.
    pub async fn connect() -> Result<Self, ApiError> {
        let reply = invoke("init_store", JsValue::NULL)
            .await
            .map_err(ApiError::from_js)?;
        match reply.as_string() {
            Some(store_path) => Ok(Self { store_path }),
            None => Err(ApiError("init_store returned no store path".to_string())),
        }
    }

    async fn call<T: DeserializeOwned>(
        &self,
        cmd: &str,
        args: &impl Serialize,
    ) -> Result<T, ApiError> {
        let args = serde_wasm_bindgen::to_value(args)
            .map_err(|error| ApiError(error.to_string()))?;
        let reply = invoke(cmd, args).await.map_err(ApiError::from_js)?;
        serde_wasm_bindgen::from_value(reply).map_err(|error| ApiError(error.to_string()))
    }

    fn store_args(&self) -> StoreArgs<'_> {
        StoreArgs {
            store_path: &self.store_path,
        }
    }

    pub async fn session(&self) -> Result<SessionInfo, ApiError> {
        self.call("session_info", &self.store_args()).await
    }

    /// All posts, newest first.
    pub async fn fetch_posts(&self) -> Result<Vec<Post>, ApiError> {
        self.call("fetch_posts", &self.store_args()).await
    }

    /// `Ok(None)` means the store answered and the post is not there, as
    /// opposed to the store not answering at all.
    pub async fn fetch_post(&self, id: RecordId) -> Result<Option<Post>, ApiError> {
        self.call(
            "fetch_post",
            &PostIdArgs {
                store_path: &self.store_path,
                id,
            },
        )
        .await
    }

    pub async fn update_post(&self, post: &Post) -> Result<(), ApiError> {
        self.call(
            "update_post",
            &UpdatePostArgs {
                store_path: &self.store_path,
                post,
            },
        )
        .await
    }

    pub async fn insert_post(&self, draft: &PostDraft) -> Result<Post, ApiError> {
        self.call(
            "insert_post",
            &InsertPostArgs {
                store_path: &self.store_path,
                draft,
            },
        )
        .await
    }

    pub async fn delete_post(&self, id: RecordId) -> Result<(), ApiError> {
        self.call(
            "delete_post",
            &PostIdArgs {
                store_path: &self.store_path,
                id,
            },
        )
        .await
    }

    pub async fn fetch_members(&self) -> Result<Vec<Member>, ApiError> {
        self.call("fetch_members", &self.store_args()).await
    }

    /// Pushes the whole roster in one call so a batch save lands or fails as
    /// a unit.
    pub async fn upsert_members(&self, members: &[Member]) -> Result<(), ApiError> {
        self.call(
            "upsert_members",
            &UpsertMembersArgs {
                store_path: &self.store_path,
                members,
            },
        )
        .await
    }

    /// Opens an external url in the system browser.
    pub async fn open_link(&self, url: &str) -> Result<(), ApiError> {
        self.call("open_link", &OpenLinkArgs { url }).await
    }
}

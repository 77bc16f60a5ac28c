use std::path::PathBuf;

use tauri::Manager;
use tauri_plugin_opener::OpenerExt;

mod store;

use store::{ContentStore, Member, Post, PostDraft, SessionInfo, StoreError};

/// Directory under the user's documents folder holding the content store.
const STORE_DIR_NAME: &str = "Copydesk";

fn command_failure(op: &str, error: &StoreError) -> String {
    tracing::error!(%error, "{} failed", op);
    error.to_string()
}

fn open_store(store_path: &str) -> Result<ContentStore, String> {
    ContentStore::open(PathBuf::from(store_path))
        .map_err(|error| command_failure("open_store", &error))
}

/// Opens (seeding on first run) the content store and returns its location.
/// Every other command takes that location back as `store_path`.
#[tauri::command]
fn init_store(app_handle: tauri::AppHandle) -> Result<String, String> {
    let documents = app_handle
        .path()
        .document_dir()
        .map_err(|error| error.to_string())?;
    let store = ContentStore::open(documents.join(STORE_DIR_NAME))
        .map_err(|error| command_failure("init_store", &error))?;
    Ok(store.root().to_string_lossy().into_owned())
}

#[tauri::command]
fn fetch_posts(store_path: &str) -> Result<Vec<Post>, String> {
    open_store(store_path)?
        .fetch_posts()
        .map_err(|error| command_failure("fetch_posts", &error))
}

#[tauri::command]
fn fetch_post(store_path: &str, id: i64) -> Result<Option<Post>, String> {
    open_store(store_path)?
        .fetch_post(id)
        .map_err(|error| command_failure("fetch_post", &error))
}

#[tauri::command]
fn update_post(store_path: &str, post: Post) -> Result<(), String> {
    open_store(store_path)?
        .update_post(&post)
        .map_err(|error| command_failure("update_post", &error))
}

#[tauri::command]
fn insert_post(store_path: &str, draft: PostDraft) -> Result<Post, String> {
    open_store(store_path)?
        .insert_post(draft)
        .map_err(|error| command_failure("insert_post", &error))
}

#[tauri::command]
fn delete_post(store_path: &str, id: i64) -> Result<(), String> {
    open_store(store_path)?
        .delete_post(id)
        .map_err(|error| command_failure("delete_post", &error))
}

#[tauri::command]
fn fetch_members(store_path: &str) -> Result<Vec<Member>, String> {
    open_store(store_path)?
        .fetch_members()
        .map_err(|error| command_failure("fetch_members", &error))
}

#[tauri::command]
fn upsert_members(store_path: &str, members: Vec<Member>) -> Result<(), String> {
    open_store(store_path)?
        .upsert_members(members)
        .map_err(|error| command_failure("upsert_members", &error))
}

#[tauri::command]
fn session_info(store_path: &str) -> Result<SessionInfo, String> {
    open_store(store_path)?
        .session()
        .map_err(|error| command_failure("session_info", &error))
}

#[tauri::command]
fn open_link(app_handle: tauri::AppHandle, url: &str) -> Result<(), String> {
    app_handle
        .opener()
        .open_url(url, None::<&str>)
        .map_err(|error| {
            tracing::error!(%error, "open_link failed");
            error.to_string()
        })
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .invoke_handler(tauri::generate_handler![
            init_store,
            fetch_posts,
            fetch_post,
            update_post,
            insert_post,
            delete_post,
            fetch_members,
            upsert_members,
            session_info,
            open_link
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid store document {path}: {source}")]
    Invalid {
        path: String,
        source: serde_json::Error,
    },
    #[error("no post with id {id}")]
    MissingPost { id: i64 },
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub team: Option<String>,
    pub role: Option<String>,
    pub bio: Option<String>,
    pub link: Option<String>,
}

/// Post fields without an id; the store assigns one on insert.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct PostDraft {
    pub title: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub signed_in: bool,
    pub display_name: Option<String>,
}

/// Directory of JSON documents holding everything the portal edits. Opening
/// the store creates and seeds the directory on first use.
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    pub fn open(root: PathBuf) -> Result<Self, StoreError> {
        let store = Self { root };
        store.ensure_seeded()?;
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn posts_path(&self) -> PathBuf {
        self.root.join("posts.json")
    }

    fn members_path(&self) -> PathBuf {
        self.root.join("members.json")
    }

    fn session_path(&self) -> PathBuf {
        self.root.join("session.json")
    }

    fn ensure_seeded(&self) -> Result<(), StoreError> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(|source| StoreError::Write {
                path: path_label(&self.root),
                source,
            })?;
        }
        if !self.posts_path().exists() {
            write_document(&self.posts_path(), &seed_posts())?;
        }
        if !self.members_path().exists() {
            write_document(&self.members_path(), &seed_members())?;
        }
        if !self.session_path().exists() {
            write_document(&self.session_path(), &seed_session())?;
        }
        Ok(())
    }

    /// All posts, newest first.
    pub fn fetch_posts(&self) -> Result<Vec<Post>, StoreError> {
        let mut posts: Vec<Post> = read_document(&self.posts_path())?;
        posts.sort_by_key(|post| std::cmp::Reverse(post.id));
        Ok(posts)
    }

    pub fn fetch_post(&self, id: i64) -> Result<Option<Post>, StoreError> {
        let posts: Vec<Post> = read_document(&self.posts_path())?;
        Ok(posts.into_iter().find(|post| post.id == id))
    }

    pub fn update_post(&self, updated: &Post) -> Result<(), StoreError> {
        let mut posts: Vec<Post> = read_document(&self.posts_path())?;
        match posts.iter_mut().find(|post| post.id == updated.id) {
            Some(post) => *post = updated.clone(),
            None => return Err(StoreError::MissingPost { id: updated.id }),
        }
        write_document(&self.posts_path(), &posts)
    }

    pub fn insert_post(&self, draft: PostDraft) -> Result<Post, StoreError> {
        let mut posts: Vec<Post> = read_document(&self.posts_path())?;
        let id = posts.iter().map(|post| post.id).max().unwrap_or(0) + 1;
        let post = Post {
            id,
            title: draft.title,
            author: draft.author,
            date: draft.date,
            description: draft.description,
            content: draft.content,
        };
        posts.push(post.clone());
        write_document(&self.posts_path(), &posts)?;
        Ok(post)
    }

    /// Removing an id that is already gone is fine; the picker refetches
    /// afterwards either way.
    pub fn delete_post(&self, id: i64) -> Result<(), StoreError> {
        let mut posts: Vec<Post> = read_document(&self.posts_path())?;
        posts.retain(|post| post.id != id);
        write_document(&self.posts_path(), &posts)
    }

    pub fn fetch_members(&self) -> Result<Vec<Member>, StoreError> {
        read_document(&self.members_path())
    }

    /// Merges the batch by id, appending rows the document has never seen,
    /// then lands everything in one document write. A batch either fully
    /// persists or fully fails.
    pub fn upsert_members(&self, batch: Vec<Member>) -> Result<(), StoreError> {
        let mut members: Vec<Member> = read_document(&self.members_path())?;
        for incoming in batch {
            match members.iter_mut().find(|member| member.id == incoming.id) {
                Some(member) => *member = incoming,
                None => members.push(incoming),
            }
        }
        write_document(&self.members_path(), &members)
    }

    pub fn session(&self) -> Result<SessionInfo, StoreError> {
        read_document(&self.session_path())
    }
}

fn path_label(path: &Path) -> String {
    path.display().to_string()
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let raw = fs::read_to_string(path).map_err(|source| StoreError::Read {
        path: path_label(path),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| StoreError::Invalid {
        path: path_label(path),
        source,
    })
}

fn write_document<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(value).map_err(|source| StoreError::Invalid {
        path: path_label(path),
        source,
    })?;
    fs::write(path, json).map_err(|source| StoreError::Write {
        path: path_label(path),
        source,
    })
}

fn seed_posts() -> Vec<Post> {
    vec![
        Post {
            id: 1,
            title: Some("Welcome to Copydesk".to_string()),
            author: Some("Copydesk".to_string()),
            date: Some("2026-07-02".to_string()),
            description: Some("A quick tour of the editing tools.".to_string()),
            content: Some(
                "# Welcome\n\nCopydesk keeps the public site's posts and member roster \
                 editable in one place.\n\n- Live **Markdown** preview\n- Inline roster \
                 editing\n- One-click saves\n\nOpen this post in edit mode and try it out."
                    .to_string(),
            ),
        },
        Post {
            id: 2,
            title: Some("Writing with Markdown".to_string()),
            author: Some("Copydesk".to_string()),
            date: Some("2026-07-15".to_string()),
            description: Some("Headings, tables, and task lists all work.".to_string()),
            content: Some(
                "## Formatting\n\nUse `#` for headings and pipes for tables:\n\n\
                 | Element | Syntax |\n| --- | --- |\n| Bold | `**text**` |\n\
                 | Strikethrough | `~~text~~` |\n\n- [x] Tables\n- [x] Task lists\n\
                 - [ ] Your first post"
                    .to_string(),
            ),
        },
    ]
}

fn seed_members() -> Vec<Member> {
    vec![
        Member {
            id: 1,
            first_name: Some("Amy".to_string()),
            last_name: Some("Zhou".to_string()),
            team: Some("Software".to_string()),
            role: Some("Lead".to_string()),
            bio: Some("Keeps the build green.".to_string()),
            link: Some("https://example.com/amy".to_string()),
        },
        Member {
            id: 2,
            first_name: Some("Bo".to_string()),
            last_name: Some("Ortiz".to_string()),
            team: Some("Outreach".to_string()),
            role: Some("Coordinator".to_string()),
            bio: Some("Runs the school visits.".to_string()),
            link: None,
        },
        Member {
            id: 3,
            first_name: Some("Cid".to_string()),
            last_name: Some("Ayers".to_string()),
            team: Some("Mechanical".to_string()),
            role: Some("Developer".to_string()),
            bio: None,
            link: None,
        },
    ]
}

fn seed_session() -> SessionInfo {
    SessionInfo {
        signed_in: true,
        display_name: Some("Site Editor".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_store(dir: &TempDir) -> ContentStore {
        ContentStore::open(dir.path().join("store")).unwrap()
    }

    #[test]
    fn first_open_seeds_every_document() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        assert!(!store.fetch_posts().unwrap().is_empty());
        assert!(!store.fetch_members().unwrap().is_empty());
        assert!(store.session().unwrap().signed_in);
    }

    #[test]
    fn reopening_keeps_existing_documents() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        let mut post = store.fetch_post(1).unwrap().unwrap();
        post.title = Some("Changed".to_string());
        store.update_post(&post).unwrap();

        let reopened = open_store(&dir);
        let kept = reopened.fetch_post(1).unwrap().unwrap();
        assert_eq!(kept.title.as_deref(), Some("Changed"));
    }

    #[test]
    fn posts_come_back_newest_first() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        store
            .insert_post(PostDraft {
                title: Some("Newest".to_string()),
                ..PostDraft::default()
            })
            .unwrap();

        let posts = store.fetch_posts().unwrap();
        let ids: Vec<i64> = posts.iter().map(|post| post.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_by_key(|id| std::cmp::Reverse(*id));
        assert_eq!(ids, sorted);
        assert_eq!(posts[0].title.as_deref(), Some("Newest"));
    }

    #[test]
    fn fetch_post_distinguishes_absent_from_failed() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        assert!(store.fetch_post(1).unwrap().is_some());
        assert!(store.fetch_post(999).unwrap().is_none());
    }

    #[test]
    fn update_rewrites_only_the_matching_post() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        let mut post = store.fetch_post(1).unwrap().unwrap();
        post.title = Some("Edited".to_string());
        store.update_post(&post).unwrap();

        assert_eq!(
            store.fetch_post(1).unwrap().unwrap().title.as_deref(),
            Some("Edited")
        );
        assert_eq!(
            store.fetch_post(2).unwrap().unwrap().title.as_deref(),
            Some("Writing with Markdown")
        );
    }

    #[test]
    fn updating_a_missing_post_fails() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        let ghost = Post {
            id: 404,
            ..Post::default()
        };
        let error = store.update_post(&ghost).unwrap_err();
        assert!(matches!(error, StoreError::MissingPost { id: 404 }));
    }

    #[test]
    fn insert_allocates_the_next_id() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        let post = store.insert_post(PostDraft::default()).unwrap();
        assert_eq!(post.id, 3);
        assert!(store.fetch_post(3).unwrap().is_some());
    }

    #[test]
    fn delete_removes_the_post_and_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        store.delete_post(2).unwrap();
        assert!(store.fetch_post(2).unwrap().is_none());

        store.delete_post(2).unwrap();
        assert!(store.fetch_post(2).unwrap().is_none());
    }

    #[test]
    fn upsert_replaces_known_members_and_appends_new_ones() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        let batch = vec![
            Member {
                id: 1,
                first_name: Some("Amelia".to_string()),
                ..Member::default()
            },
            Member {
                id: 99,
                first_name: Some("New".to_string()),
                ..Member::default()
            },
        ];
        store.upsert_members(batch).unwrap();

        let members = store.fetch_members().unwrap();
        let amy = members.iter().find(|member| member.id == 1).unwrap();
        assert_eq!(amy.first_name.as_deref(), Some("Amelia"));
        assert!(members.iter().any(|member| member.id == 99));
        assert!(members.iter().any(|member| member.id == 2), "untouched rows survive");
    }

    #[test]
    fn malformed_documents_are_reported_not_swallowed() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);

        fs::write(store.root().join("posts.json"), "not json").unwrap();

        let error = store.fetch_posts().unwrap_err();
        assert!(matches!(error, StoreError::Invalid { .. }));
    }
}

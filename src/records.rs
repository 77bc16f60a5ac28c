use serde::{Deserialize, Serialize};

pub type RecordId = i64;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: RecordId,
    pub title: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: RecordId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub team: Option<String>,
    pub role: Option<String>,
    pub bio: Option<String>,
    pub link: Option<String>,
}

/// Partial update for a post. Outer `None` leaves the field untouched; the
/// inner option is the new nullable value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostPatch {
    pub title: Option<Option<String>>,
    pub author: Option<Option<String>>,
    pub date: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub content: Option<Option<String>>,
}

impl PostPatch {
    pub fn title(value: impl Into<String>) -> Self {
        Self {
            title: Some(Some(value.into())),
            ..Self::default()
        }
    }

    pub fn author(value: impl Into<String>) -> Self {
        Self {
            author: Some(Some(value.into())),
            ..Self::default()
        }
    }

    pub fn date(value: impl Into<String>) -> Self {
        Self {
            date: Some(Some(value.into())),
            ..Self::default()
        }
    }

    pub fn description(value: impl Into<String>) -> Self {
        Self {
            description: Some(Some(value.into())),
            ..Self::default()
        }
    }

    pub fn content(value: impl Into<String>) -> Self {
        Self {
            content: Some(Some(value.into())),
            ..Self::default()
        }
    }
}

impl Post {
    pub fn apply(&mut self, patch: PostPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(author) = patch.author {
            self.author = author;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
    }
}

/// Partial update for a member, same shape as [`PostPatch`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemberPatch {
    pub first_name: Option<Option<String>>,
    pub last_name: Option<Option<String>>,
    pub team: Option<Option<String>>,
    pub role: Option<Option<String>>,
    pub bio: Option<Option<String>>,
    pub link: Option<Option<String>>,
}

impl MemberPatch {
    pub fn first_name(value: impl Into<String>) -> Self {
        Self {
            first_name: Some(Some(value.into())),
            ..Self::default()
        }
    }

    pub fn last_name(value: impl Into<String>) -> Self {
        Self {
            last_name: Some(Some(value.into())),
            ..Self::default()
        }
    }

    pub fn team(value: impl Into<String>) -> Self {
        Self {
            team: Some(Some(value.into())),
            ..Self::default()
        }
    }

    pub fn role(value: impl Into<String>) -> Self {
        Self {
            role: Some(Some(value.into())),
            ..Self::default()
        }
    }

    pub fn bio(value: impl Into<String>) -> Self {
        Self {
            bio: Some(Some(value.into())),
            ..Self::default()
        }
    }

    pub fn link(value: impl Into<String>) -> Self {
        Self {
            link: Some(Some(value.into())),
            ..Self::default()
        }
    }
}

impl Member {
    pub fn apply(&mut self, patch: MemberPatch) {
        if let Some(first_name) = patch.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = last_name;
        }
        if let Some(team) = patch.team {
            self.team = team;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(bio) = patch.bio {
            self.bio = bio;
        }
        if let Some(link) = patch.link {
            self.link = link;
        }
    }
}

/// The two record kinds the portal edits. Closed on purpose: a third kind
/// must be threaded through every `match` below.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Record {
    Post(Post),
    Member(Member),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordPatch {
    Post(PostPatch),
    Member(MemberPatch),
}

impl Record {
    pub fn id(&self) -> RecordId {
        match self {
            Record::Post(post) => post.id,
            Record::Member(member) => member.id,
        }
    }

    /// Applies a patch of the matching kind; a mismatched kind is rejected
    /// and leaves the record untouched.
    pub fn apply(&mut self, patch: RecordPatch) -> bool {
        match (self, patch) {
            (Record::Post(post), RecordPatch::Post(patch)) => {
                post.apply(patch);
                true
            }
            (Record::Member(member), RecordPatch::Member(patch)) => {
                member.apply(patch);
                true
            }
            (Record::Post(_), RecordPatch::Member(_)) => false,
            (Record::Member(_), RecordPatch::Post(_)) => false,
        }
    }

    pub fn as_post(&self) -> Option<&Post> {
        match self {
            Record::Post(post) => Some(post),
            Record::Member(_) => None,
        }
    }

    pub fn as_member(&self) -> Option<&Member> {
        match self {
            Record::Member(member) => Some(member),
            Record::Post(_) => None,
        }
    }
}

/// Date values may carry a time-of-day suffix from the store; date inputs
/// show and write back only the date part.
pub fn date_portion(value: &str) -> &str {
    match value.split_once('T') {
        Some((date, _)) => date,
        None => value,
    }
}

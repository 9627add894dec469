//! Request and response shapes for the Deaddit admin content API.
//!
//! These mirror the JSON exchanged with `/admin/api/{kind}` endpoints. The
//! backend is loose about a few text columns (stored as JSON lists in some
//! deployments, plain strings in others), so those fields are normalised to a
//! single comma-separated string on the way in.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

mod text;

pub use text::lenient_text;

/// The four content collections managed by the admin console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    User,
    Subdeaddit,
    Post,
    Comment,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::User,
        ResourceKind::Subdeaddit,
        ResourceKind::Post,
        ResourceKind::Comment,
    ];

    /// Collection segment used in `/admin/api/{collection}` paths and as the
    /// items key of list responses.
    pub fn collection(self) -> &'static str {
        match self {
            ResourceKind::User => "users",
            ResourceKind::Subdeaddit => "subdeaddits",
            ResourceKind::Post => "posts",
            ResourceKind::Comment => "comments",
        }
    }

    pub fn singular(self) -> &'static str {
        match self {
            ResourceKind::User => "user",
            ResourceKind::Subdeaddit => "subdeaddit",
            ResourceKind::Post => "post",
            ResourceKind::Comment => "comment",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection())
    }
}

impl TryFrom<&str> for ResourceKind {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "user" | "users" => Ok(ResourceKind::User),
            "subdeaddit" | "subdeaddits" => Ok(ResourceKind::Subdeaddit),
            "post" | "posts" => Ok(ResourceKind::Post),
            "comment" | "comments" => Ok(ResourceKind::Comment),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub gender: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub occupation: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub education: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub bio: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub interests: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub personality_traits: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub writing_style: String,
    #[serde(default)]
    pub posts_count: u64,
    #[serde(default)]
    pub comments_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubdeadditRecord {
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub post_types: String,
    #[serde(default)]
    pub posts_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: i64,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub content: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub username: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub subdeaddit_name: String,
    #[serde(default)]
    pub upvote_count: i64,
    #[serde(default)]
    pub comments_count: u64,
    #[serde(default, deserialize_with = "lenient_text")]
    pub post_type: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentRecord {
    pub id: i64,
    #[serde(default, deserialize_with = "lenient_text")]
    pub content: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub username: String,
    #[serde(default)]
    pub post_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub post_title: String,
    #[serde(default)]
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub upvote_count: i64,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Envelope returned by `GET /admin/api/{kind}`.
///
/// The items live under a kind-specific key (`users`, `posts`, ...); any of
/// them is accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    #[serde(
        rename = "items",
        alias = "users",
        alias = "subdeaddits",
        alias = "posts",
        alias = "comments"
    )]
    pub items: Vec<T>,
    #[serde(default = "first_page")]
    pub current_page: u32,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub total: Option<u64>,
}

fn first_page() -> u32 {
    1
}

/// Body returned by update, delete and bulk-delete endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deleted_counts"
    )]
    pub deleted: Option<BTreeMap<String, u64>>,
}

fn deleted_counts<'de, D>(deserializer: D) -> Result<Option<BTreeMap<String, u64>>, D::Error>
where
    D: Deserializer<'de>,
{
    // Non-numeric entries are skipped rather than failing the whole response.
    let raw: Option<BTreeMap<String, serde_json::Value>> = Option::deserialize(deserializer)?;
    Ok(raw.map(|entries| {
        entries
            .into_iter()
            .filter_map(|(kind, count)| count.as_u64().map(|count| (kind, count)))
            .collect()
    }))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    pub age: Option<i64>,
    pub gender: String,
    pub occupation: String,
    pub education: String,
    pub bio: String,
    pub interests: String,
    pub personality_traits: String,
    pub writing_style: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubdeadditPatch {
    pub description: String,
    pub post_types: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPatch {
    pub title: String,
    pub content: String,
    pub upvote_count: i64,
    pub post_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentPatch {
    pub content: String,
    pub upvote_count: i64,
}

/// Editable fields for one record, serialized as the bare field object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RecordPatch {
    User(UserPatch),
    Subdeaddit(SubdeadditPatch),
    Post(PostPatch),
    Comment(CommentPatch),
}

impl RecordPatch {
    pub fn kind(&self) -> ResourceKind {
        match self {
            RecordPatch::User(_) => ResourceKind::User,
            RecordPatch::Subdeaddit(_) => ResourceKind::Subdeaddit,
            RecordPatch::Post(_) => ResourceKind::Post,
            RecordPatch::Comment(_) => ResourceKind::Comment,
        }
    }
}

impl From<&UserRecord> for UserPatch {
    fn from(record: &UserRecord) -> Self {
        Self {
            age: record.age,
            gender: record.gender.clone(),
            occupation: record.occupation.clone(),
            education: record.education.clone(),
            bio: record.bio.clone(),
            interests: record.interests.clone(),
            personality_traits: record.personality_traits.clone(),
            writing_style: record.writing_style.clone(),
        }
    }
}

impl From<&SubdeadditRecord> for SubdeadditPatch {
    fn from(record: &SubdeadditRecord) -> Self {
        Self {
            description: record.description.clone(),
            post_types: record.post_types.clone(),
        }
    }
}

impl From<&PostRecord> for PostPatch {
    fn from(record: &PostRecord) -> Self {
        Self {
            title: record.title.clone(),
            content: record.content.clone(),
            upvote_count: record.upvote_count,
            post_type: record.post_type.clone(),
        }
    }
}

impl From<&CommentRecord> for CommentPatch {
    fn from(record: &CommentRecord) -> Self {
        Self {
            content: record.content.clone(),
            upvote_count: record.upvote_count,
        }
    }
}

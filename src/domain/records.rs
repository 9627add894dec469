//! Resource records as the console sees them.

use serde::Serialize;

pub use deaddit_admin_types::{
    CommentPatch, CommentRecord, PostPatch, PostRecord, RecordPatch, SubdeadditPatch,
    SubdeadditRecord, UserPatch, UserRecord,
};

use super::kinds::{Column, ResourceKind};
use super::text::display_date;

/// One record of any managed kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResourceRecord {
    User(UserRecord),
    Subdeaddit(SubdeadditRecord),
    Post(PostRecord),
    Comment(CommentRecord),
}

impl ResourceRecord {
    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceRecord::User(_) => ResourceKind::User,
            ResourceRecord::Subdeaddit(_) => ResourceKind::Subdeaddit,
            ResourceRecord::Post(_) => ResourceKind::Post,
            ResourceRecord::Comment(_) => ResourceKind::Comment,
        }
    }

    /// Identifier in the string form used by selections and item paths.
    pub fn id(&self) -> String {
        match self {
            ResourceRecord::User(user) => user.username.clone(),
            ResourceRecord::Subdeaddit(sub) => sub.name.clone(),
            ResourceRecord::Post(post) => post.id.to_string(),
            ResourceRecord::Comment(comment) => comment.id.to_string(),
        }
    }

    /// Public page that shows this record, when there is one.
    pub fn view_path(&self) -> Option<String> {
        match self {
            ResourceRecord::Post(post) => Some(format!("/post/{}", post.id)),
            ResourceRecord::Comment(comment) => {
                comment.post_id.map(|post_id| format!("/post/{post_id}"))
            }
            ResourceRecord::User(_) | ResourceRecord::Subdeaddit(_) => None,
        }
    }

    /// Untruncated display value of a table column. Columns that do not
    /// apply to this record's kind render empty.
    pub fn cell(&self, column: Column) -> String {
        match (self, column) {
            (ResourceRecord::User(user), Column::Username) => user.username.clone(),
            (ResourceRecord::User(user), Column::Age) => {
                user.age.map(|age| age.to_string()).unwrap_or_default()
            }
            (ResourceRecord::User(user), Column::Gender) => user.gender.clone(),
            (ResourceRecord::User(user), Column::Occupation) => user.occupation.clone(),
            (ResourceRecord::User(user), Column::PostsCount) => user.posts_count.to_string(),
            (ResourceRecord::User(user), Column::CommentsCount) => {
                user.comments_count.to_string()
            }

            (ResourceRecord::Subdeaddit(sub), Column::Name) => sub.name.clone(),
            (ResourceRecord::Subdeaddit(sub), Column::Description) => sub.description.clone(),
            (ResourceRecord::Subdeaddit(sub), Column::PostsCount) => sub.posts_count.to_string(),

            (ResourceRecord::Post(post), Column::Title) => post.title.clone(),
            (ResourceRecord::Post(post), Column::Author) => post.username.clone(),
            (ResourceRecord::Post(post), Column::Subdeaddit) => post.subdeaddit_name.clone(),
            (ResourceRecord::Post(post), Column::Upvotes) => post.upvote_count.to_string(),
            (ResourceRecord::Post(post), Column::CommentsCount) => {
                post.comments_count.to_string()
            }
            (ResourceRecord::Post(post), Column::CreatedAt) => {
                post.created_at.as_deref().map(display_date).unwrap_or_default()
            }

            (ResourceRecord::Comment(comment), Column::Content) => comment.content.clone(),
            (ResourceRecord::Comment(comment), Column::Author) => comment.username.clone(),
            (ResourceRecord::Comment(comment), Column::PostTitle) => comment.post_title.clone(),
            (ResourceRecord::Comment(comment), Column::Thread) => {
                if comment.parent_id.is_some() {
                    "Reply".to_string()
                } else {
                    "Root".to_string()
                }
            }
            (ResourceRecord::Comment(comment), Column::Upvotes) => {
                comment.upvote_count.to_string()
            }
            (ResourceRecord::Comment(comment), Column::CreatedAt) => comment
                .created_at
                .as_deref()
                .map(display_date)
                .unwrap_or_default(),

            _ => String::new(),
        }
    }

    /// Seed an edit form: the current values of every editable field.
    pub fn to_patch(&self) -> RecordPatch {
        match self {
            ResourceRecord::User(user) => RecordPatch::User(UserPatch::from(user)),
            ResourceRecord::Subdeaddit(sub) => RecordPatch::Subdeaddit(SubdeadditPatch::from(sub)),
            ResourceRecord::Post(post) => RecordPatch::Post(PostPatch::from(post)),
            ResourceRecord::Comment(comment) => RecordPatch::Comment(CommentPatch::from(comment)),
        }
    }
}

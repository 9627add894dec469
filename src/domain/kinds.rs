//! Static per-kind descriptor table.
//!
//! Everything that differs between users, subdeaddits, posts and comments
//! (endpoint segment, identifier shape, bulk-delete body key, table columns,
//! cascade warning) is declared here once and consumed generically by the
//! controller and renderers.

pub use deaddit_admin_types::ResourceKind;

use super::error::DomainError;

/// How a kind's records are identified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierShape {
    /// Free-form text key (usernames, subdeaddit names).
    Name,
    /// Integer primary key.
    Numeric,
}

/// A display column of the list table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Username,
    Age,
    Gender,
    Occupation,
    Name,
    Description,
    Title,
    Author,
    Subdeaddit,
    Content,
    PostTitle,
    Thread,
    Upvotes,
    PostsCount,
    CommentsCount,
    CreatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub column: Column,
    pub header: &'static str,
    /// Character budget; longer values are cut and suffixed with `...`.
    pub max_chars: Option<usize>,
}

const fn col(column: Column, header: &'static str) -> ColumnSpec {
    ColumnSpec {
        column,
        header,
        max_chars: None,
    }
}

const fn truncated(column: Column, header: &'static str, max_chars: usize) -> ColumnSpec {
    ColumnSpec {
        column,
        header,
        max_chars: Some(max_chars),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceDescriptor {
    pub kind: ResourceKind,
    pub label: &'static str,
    pub identifier_field: &'static str,
    pub identifier: IdentifierShape,
    pub bulk_field: &'static str,
    pub patch_fields: &'static [&'static str],
    pub columns: &'static [ColumnSpec],
    pub cascade: &'static str,
    pub cascade_plural: &'static str,
}

static DESCRIPTORS: [ResourceDescriptor; 4] = [
    ResourceDescriptor {
        kind: ResourceKind::User,
        label: "User",
        identifier_field: "username",
        identifier: IdentifierShape::Name,
        bulk_field: "usernames",
        patch_fields: &[
            "age",
            "gender",
            "occupation",
            "education",
            "bio",
            "interests",
            "personality_traits",
            "writing_style",
        ],
        columns: &[
            col(Column::Username, "Username"),
            col(Column::Age, "Age"),
            col(Column::Gender, "Gender"),
            col(Column::Occupation, "Occupation"),
            col(Column::PostsCount, "Posts"),
            col(Column::CommentsCount, "Comments"),
        ],
        cascade: "This will also delete all posts and comments by this user.",
        cascade_plural: "This will also delete all posts and comments by these users.",
    },
    ResourceDescriptor {
        kind: ResourceKind::Subdeaddit,
        label: "Subdeaddit",
        identifier_field: "name",
        identifier: IdentifierShape::Name,
        bulk_field: "names",
        patch_fields: &["description", "post_types"],
        columns: &[
            col(Column::Name, "Name"),
            truncated(Column::Description, "Description", 100),
            col(Column::PostsCount, "Posts"),
        ],
        cascade: "This will also delete all posts and comments in this subdeaddit.",
        cascade_plural: "This will also delete all posts and comments in these subdeaddits.",
    },
    ResourceDescriptor {
        kind: ResourceKind::Post,
        label: "Post",
        identifier_field: "id",
        identifier: IdentifierShape::Numeric,
        bulk_field: "post_ids",
        patch_fields: &["title", "content", "upvote_count", "post_type"],
        columns: &[
            truncated(Column::Title, "Title", 50),
            col(Column::Author, "Author"),
            col(Column::Subdeaddit, "Subdeaddit"),
            col(Column::Upvotes, "Upvotes"),
            col(Column::CommentsCount, "Comments"),
            col(Column::CreatedAt, "Created"),
        ],
        cascade: "This will also delete all comments on this post.",
        cascade_plural: "This will also delete all comments on these posts.",
    },
    ResourceDescriptor {
        kind: ResourceKind::Comment,
        label: "Comment",
        identifier_field: "id",
        identifier: IdentifierShape::Numeric,
        bulk_field: "comment_ids",
        patch_fields: &["content", "upvote_count"],
        columns: &[
            truncated(Column::Content, "Content", 80),
            col(Column::Author, "Author"),
            truncated(Column::PostTitle, "Post", 30),
            col(Column::Thread, "Type"),
            col(Column::Upvotes, "Upvotes"),
            col(Column::CreatedAt, "Created"),
        ],
        cascade: "This will also delete all replies to this comment.",
        cascade_plural: "This will also delete all replies to these comments.",
    },
];

pub const BULK_DELETE_SEGMENT: &str = "bulk-delete";

pub fn descriptor(kind: ResourceKind) -> &'static ResourceDescriptor {
    match kind {
        ResourceKind::User => &DESCRIPTORS[0],
        ResourceKind::Subdeaddit => &DESCRIPTORS[1],
        ResourceKind::Post => &DESCRIPTORS[2],
        ResourceKind::Comment => &DESCRIPTORS[3],
    }
}

impl ResourceDescriptor {
    pub fn collection(&self) -> &'static str {
        self.kind.collection()
    }

    /// Segments of the collection endpoint, `admin/api/{collection}`. Item
    /// and bulk-delete endpoints append one more segment.
    pub fn collection_segments(&self) -> [&'static str; 3] {
        ["admin", "api", self.collection()]
    }

    /// Validate and normalise a raw identifier for this kind.
    pub fn parse_id(&self, raw: &str) -> Result<String, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::invalid_id(self.kind, raw, "identifier is empty"));
        }
        match self.identifier {
            IdentifierShape::Name => Ok(trimmed.to_string()),
            IdentifierShape::Numeric => trimmed
                .parse::<i64>()
                .map(|id| id.to_string())
                .map_err(|err| DomainError::invalid_id(self.kind, raw, err.to_string())),
        }
    }

    /// JSON body for the bulk-delete endpoint; numeric kinds send integers.
    pub fn bulk_delete_body(&self, ids: &[String]) -> Result<serde_json::Value, DomainError> {
        let values = match self.identifier {
            IdentifierShape::Name => ids
                .iter()
                .map(|id| serde_json::Value::String(id.clone()))
                .collect::<Vec<_>>(),
            IdentifierShape::Numeric => ids
                .iter()
                .map(|id| {
                    id.parse::<i64>()
                        .map(serde_json::Value::from)
                        .map_err(|err| DomainError::invalid_id(self.kind, id, err.to_string()))
                })
                .collect::<Result<Vec<_>, _>>()?,
        };
        let mut body = serde_json::Map::new();
        body.insert(self.bulk_field.to_string(), serde_json::Value::Array(values));
        Ok(serde_json::Value::Object(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_table_is_indexed_by_kind() {
        for kind in ResourceKind::ALL {
            assert_eq!(descriptor(kind).kind, kind);
        }
    }

    #[test]
    fn truncation_budgets_match_table_layout() {
        let budget = |kind, column| {
            descriptor(kind)
                .columns
                .iter()
                .find(|spec| spec.column == column)
                .and_then(|spec| spec.max_chars)
        };
        assert_eq!(budget(ResourceKind::Subdeaddit, Column::Description), Some(100));
        assert_eq!(budget(ResourceKind::Post, Column::Title), Some(50));
        assert_eq!(budget(ResourceKind::Comment, Column::Content), Some(80));
        assert_eq!(budget(ResourceKind::Comment, Column::PostTitle), Some(30));
    }

    #[test]
    fn numeric_ids_reject_text() {
        let posts = descriptor(ResourceKind::Post);
        assert_eq!(posts.parse_id(" 7 ").expect("numeric"), "7");
        assert!(matches!(
            posts.parse_id("seven"),
            Err(DomainError::InvalidIdentifier { .. })
        ));
        assert!(descriptor(ResourceKind::User).parse_id("").is_err());
    }

    #[test]
    fn bulk_body_uses_kind_field() {
        let body = descriptor(ResourceKind::Comment)
            .bulk_delete_body(&["1".into(), "2".into()])
            .expect("body");
        assert_eq!(body, serde_json::json!({"comment_ids": [1, 2]}));

        let body = descriptor(ResourceKind::User)
            .bulk_delete_body(&["ada".into()])
            .expect("body");
        assert_eq!(body, serde_json::json!({"usernames": ["ada"]}));
    }

    #[test]
    fn segments_follow_admin_api_layout() {
        assert_eq!(
            descriptor(ResourceKind::Post).collection_segments(),
            ["admin", "api", "posts"]
        );
    }
}

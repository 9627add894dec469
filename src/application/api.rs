//! Port to the admin content API.

use std::num::NonZeroU32;

use async_trait::async_trait;
use deaddit_admin_types::MutationResponse;
use thiserror::Error;

use crate::domain::{
    kinds::ResourceKind,
    records::{RecordPatch, ResourceRecord},
};

/// Transport-level failures. Application-level rejections travel inside a
/// [`MutationResponse`] instead.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("server responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }
}

/// Parameters of one list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub kind: ResourceKind,
    pub page: NonZeroU32,
    pub per_page: NonZeroU32,
    pub search: Option<String>,
    /// Subdeaddit name; only sent for posts.
    pub category: Option<String>,
}

impl ListQuery {
    pub fn new(kind: ResourceKind, per_page: NonZeroU32) -> Self {
        Self {
            kind,
            page: NonZeroU32::MIN,
            per_page,
            search: None,
            category: None,
        }
    }

    pub fn with_page(mut self, page: NonZeroU32) -> Self {
        self.page = page;
        self
    }

    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search;
        self
    }

    /// Query-string pairs in request order. Blank search and category values
    /// are omitted; the category is ignored for kinds other than posts.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
        ];
        if let Some(search) = self.search.as_deref().filter(|s| !s.trim().is_empty()) {
            pairs.push(("search", search.to_string()));
        }
        let category = self
            .category
            .as_deref()
            .filter(|c| self.kind == ResourceKind::Post && !c.trim().is_empty());
        if let Some(category) = category {
            pairs.push(("subdeaddit", category.to_string()));
        }
        pairs
    }
}

/// One page of records plus pagination metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ListResult {
    pub kind: ResourceKind,
    pub items: Vec<ResourceRecord>,
    pub current_page: u32,
    pub total_pages: u32,
    pub total: Option<u64>,
}

impl ListResult {
    /// Build a result, clamping `current_page` into `1..=max(total_pages, 1)`.
    pub fn new(
        kind: ResourceKind,
        items: Vec<ResourceRecord>,
        current_page: u32,
        total_pages: u32,
        total: Option<u64>,
    ) -> Self {
        let current_page = current_page.clamp(1, total_pages.max(1));
        Self {
            kind,
            items,
            current_page,
            total_pages,
            total,
        }
    }

    pub fn ids(&self) -> Vec<String> {
        self.items.iter().map(ResourceRecord::id).collect()
    }
}

#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn list(&self, query: &ListQuery) -> Result<ListResult, ApiError>;

    async fn update(
        &self,
        kind: ResourceKind,
        id: &str,
        patch: &RecordPatch,
    ) -> Result<MutationResponse, ApiError>;

    async fn delete(&self, kind: ResourceKind, id: &str) -> Result<MutationResponse, ApiError>;

    async fn bulk_delete(
        &self,
        kind: ResourceKind,
        ids: &[String],
    ) -> Result<MutationResponse, ApiError>;
}

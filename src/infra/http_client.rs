//! reqwest-backed adapter for the admin content API.

use async_trait::async_trait;
use deaddit_admin_types::{ListResponse, MutationResponse};
use reqwest::{Client, Method, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::{
    application::api::{AdminApi, ApiError, ListQuery, ListResult},
    domain::{
        kinds::{BULK_DELETE_SEGMENT, ResourceKind, descriptor},
        records::{RecordPatch, ResourceRecord},
    },
};

use super::error::InfraError;

#[derive(Clone, Debug)]
pub struct HttpAdminApi {
    client: Client,
    base: Url,
}

impl HttpAdminApi {
    /// Build a client rooted at `base_url`. A path prefix on the base URL is
    /// kept; `/admin/api/...` is appended to it.
    pub fn new(base_url: &str) -> Result<Self, InfraError> {
        let mut base = Url::parse(base_url)
            .map_err(|err| InfraError::configuration(format!("invalid api.base_url: {err}")))?;
        if base.cannot_be_a_base() {
            return Err(InfraError::configuration(format!(
                "api.base_url `{base_url}` cannot be used as a base URL"
            )));
        }
        base.set_query(None);
        base.set_fragment(None);

        let client = Client::builder()
            .user_agent(Self::user_agent())
            .build()
            .map_err(|err| InfraError::client(err.to_string()))?;
        Ok(Self { client, base })
    }

    pub fn user_agent() -> &'static str {
        concat!("deaddit-admin/", env!("CARGO_PKG_VERSION"))
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn url(&self, kind: ResourceKind, extra: Option<&str>) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| ApiError::InvalidRequest("base URL has no path".into()))?;
            segments
                .pop_if_empty()
                .extend(descriptor(kind).collection_segments());
            if let Some(extra) = extra {
                segments.push(extra);
            }
        }
        Ok(url)
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<serde_json::Value>,
    ) -> Result<Response, ApiError> {
        debug!(%method, %url, "admin api request");
        let mut req = self.client.request(method, url);
        if let Some(body) = body {
            req = req.json(&body);
        }
        req.send()
            .await
            .map_err(|err| ApiError::transport(err.to_string()))
    }

    /// Decode a success body; anything else is a status error.
    async fn handle<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .map_err(|err| ApiError::transport(err.to_string()))?;
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }
        serde_json::from_slice(&bytes).map_err(|err| ApiError::decode(err.to_string()))
    }

    /// Mutation endpoints report rejections as `{success: false, error}`,
    /// sometimes with a 4xx/5xx status. Such bodies are returned as-is so the
    /// caller can show the server's message.
    async fn handle_mutation(resp: Response) -> Result<MutationResponse, ApiError> {
        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .map_err(|err| ApiError::transport(err.to_string()))?;
        match serde_json::from_slice::<MutationResponse>(&bytes) {
            Ok(body) if status.is_success() || !body.success => Ok(body),
            Err(err) if status.is_success() => Err(ApiError::decode(err.to_string())),
            _ => Err(ApiError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            }),
        }
    }

    async fn fetch_page<T>(
        &self,
        query: &ListQuery,
        wrap: fn(T) -> ResourceRecord,
    ) -> Result<ListResult, ApiError>
    where
        T: DeserializeOwned,
    {
        let mut url = self.url(query.kind, None)?;
        url.query_pairs_mut()
            .extend_pairs(query.to_pairs().iter().map(|(k, v)| (*k, v.as_str())));
        let resp = self.send(Method::GET, url, None).await?;
        let page: ListResponse<T> = Self::handle(resp).await?;
        Ok(ListResult::new(
            query.kind,
            page.items.into_iter().map(wrap).collect(),
            page.current_page,
            page.pages,
            page.total,
        ))
    }
}

#[async_trait]
impl AdminApi for HttpAdminApi {
    #[instrument(skip(self), fields(kind = %query.kind, page = query.page.get()))]
    async fn list(&self, query: &ListQuery) -> Result<ListResult, ApiError> {
        match query.kind {
            ResourceKind::User => self.fetch_page(query, ResourceRecord::User).await,
            ResourceKind::Subdeaddit => self.fetch_page(query, ResourceRecord::Subdeaddit).await,
            ResourceKind::Post => self.fetch_page(query, ResourceRecord::Post).await,
            ResourceKind::Comment => self.fetch_page(query, ResourceRecord::Comment).await,
        }
    }

    #[instrument(skip(self, patch))]
    async fn update(
        &self,
        kind: ResourceKind,
        id: &str,
        patch: &RecordPatch,
    ) -> Result<MutationResponse, ApiError> {
        let url = self.url(kind, Some(id))?;
        let body =
            serde_json::to_value(patch).map_err(|err| ApiError::InvalidRequest(err.to_string()))?;
        let resp = self.send(Method::PUT, url, Some(body)).await?;
        Self::handle_mutation(resp).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, kind: ResourceKind, id: &str) -> Result<MutationResponse, ApiError> {
        let url = self.url(kind, Some(id))?;
        let resp = self.send(Method::DELETE, url, None).await?;
        Self::handle_mutation(resp).await
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn bulk_delete(
        &self,
        kind: ResourceKind,
        ids: &[String],
    ) -> Result<MutationResponse, ApiError> {
        let body = descriptor(kind)
            .bulk_delete_body(ids)
            .map_err(|err| ApiError::InvalidRequest(err.to_string()))?;
        let url = self.url(kind, Some(BULK_DELETE_SEGMENT))?;
        let resp = self.send(Method::POST, url, Some(body)).await?;
        Self::handle_mutation(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_keep_base_prefix_and_escape_ids() {
        let api = HttpAdminApi::new("http://localhost:5000/deaddit").expect("client");
        let url = api
            .url(ResourceKind::User, Some("ada lovelace"))
            .expect("url");
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/deaddit/admin/api/users/ada%20lovelace"
        );

        let api = HttpAdminApi::new("http://localhost:5000/").expect("client");
        let url = api
            .url(ResourceKind::Comment, Some(BULK_DELETE_SEGMENT))
            .expect("url");
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/admin/api/comments/bulk-delete"
        );
    }

    #[test]
    fn slash_in_identifier_stays_in_one_segment() {
        let api = HttpAdminApi::new("http://localhost:5000").expect("client");
        let url = api.url(ResourceKind::Subdeaddit, Some("a/b")).expect("url");
        assert_eq!(url.path(), "/admin/api/subdeaddits/a%2Fb");
    }

    #[test]
    fn rejects_non_base_urls() {
        assert!(matches!(
            HttpAdminApi::new("mailto:admin@example.com"),
            Err(InfraError::Configuration { .. })
        ));
        assert!(HttpAdminApi::new("not a url").is_err());
    }
}

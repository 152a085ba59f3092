//! reqwest implementation of the repository traits.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::domain::fpo::{FpoDocument, FpoMember};
use crate::domain::location::{LocationLevel, LocationNode, NodeKey};
use crate::domain::types::{FpoId, TypeConstraintError};
use crate::models::api::{ApiResponse, ItemsData, PageData};
use crate::models::config::ConsoleConfig;
use crate::models::fpo::{ApiFpoDocument, ApiFpoMember};
use crate::models::location::ApiLocation;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{FpoDetailReader, ListQuery, Listable, LocationReader, Page, PageReader};

/// REST API client shared by every screen.
///
/// Cookies and authentication headers are configured on the supplied
/// [`Client`]; this type only knows the endpoint shapes.
#[derive(Clone, Debug)]
pub struct HttpRepository {
    client: Client,
    base_url: String,
}

impl HttpRepository {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Builds a client from configuration, applying the optional request timeout.
    pub fn from_config(config: &ConsoleConfig) -> RepositoryResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self::new(client, config.api_base_url.as_str()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T>(&self, path: &str, query: &[(String, String)]) -> RepositoryResult<T>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, path);
        let response = self.client.get(&url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            log::error!("GET {url} failed with status {status}");
            return Err(match status.as_u16() {
                404 => RepositoryError::NotFound,
                code => RepositoryError::Status(code),
            });
        }

        let body = response.bytes().await?;
        let envelope: ApiResponse<T> = serde_json::from_slice(&body)?;
        envelope.into_result()
    }
}

#[async_trait]
impl LocationReader for HttpRepository {
    async fn list_locations(
        &self,
        level: LocationLevel,
        parent: Option<NodeKey>,
    ) -> RepositoryResult<Vec<LocationNode>> {
        let query: Vec<(String, String)> = parent
            .map(|key| ("parent".to_string(), key.to_string()))
            .into_iter()
            .collect();

        let locations: Vec<ApiLocation> = self
            .get_json(&format!("locations/{level}"), &query)
            .await?;

        locations
            .into_iter()
            .map(|location| LocationNode::try_from(location).map_err(RepositoryError::from))
            .collect()
    }
}

#[async_trait]
impl<T> PageReader<T> for HttpRepository
where
    T: Listable,
{
    async fn fetch_page(&self, query: &ListQuery) -> RepositoryResult<Page<T>> {
        let data: PageData<T::Wire> = self.get_json(T::PATH, &query.to_query_pairs()).await?;
        let items = data
            .items
            .into_iter()
            .map(|wire| T::from_wire(wire).map_err(RepositoryError::from))
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok(Page {
            items,
            page: data.pagination.page,
            total_items: data.pagination.total,
            total_pages: data.pagination.pages,
        })
    }
}

#[async_trait]
impl FpoDetailReader for HttpRepository {
    async fn list_fpo_members(
        &self,
        fpo_id: FpoId,
        limit: usize,
    ) -> RepositoryResult<Vec<FpoMember>> {
        let data: ItemsData<ApiFpoMember> = self
            .get_json(
                &format!("fpos/{fpo_id}/members"),
                &[("limit".to_string(), limit.to_string())],
            )
            .await?;
        validated(data.items)
    }

    async fn list_fpo_documents(
        &self,
        fpo_id: FpoId,
        limit: usize,
    ) -> RepositoryResult<Vec<FpoDocument>> {
        let data: ItemsData<ApiFpoDocument> = self
            .get_json(
                &format!("fpos/{fpo_id}/documents"),
                &[("limit".to_string(), limit.to_string())],
            )
            .await?;
        validated(data.items)
    }
}

/// Converts every wire record, failing the whole fetch on the first invalid one.
fn validated<W, T>(records: Vec<W>) -> RepositoryResult<Vec<T>>
where
    T: TryFrom<W, Error = TypeConstraintError>,
{
    records
        .into_iter()
        .map(|record| T::try_from(record).map_err(RepositoryError::from))
        .collect()
}

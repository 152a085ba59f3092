//! Data-access seams consumed by the console controllers.
//!
//! Controllers only see these traits; [`HttpRepository`] talks to the REST API
//! and tests substitute in-memory readers.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;

use crate::domain::catalog::{Brand, Product, ServiceProvider};
use crate::domain::filters::ListFilters;
use crate::domain::fpo::{Fpo, FpoDocument, FpoMember};
use crate::domain::location::{LocationLevel, LocationNode, NodeKey};
use crate::domain::types::{FpoId, TypeConstraintError};
use crate::domain::user::User;
use crate::models::catalog::{ApiBrand, ApiProduct, ApiServiceProvider};
use crate::models::fpo::ApiFpo;
use crate::models::user::ApiUser;
use crate::repository::errors::RepositoryResult;

pub mod errors;
#[cfg(feature = "http")]
pub mod http;
#[cfg(feature = "test-mocks")]
pub mod mock;

#[cfg(feature = "http")]
pub use http::HttpRepository;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

/// Snapshot of filters and pagination sent with a list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub search: Option<String>,
    pub filters: ListFilters,
    pub pagination: Option<Pagination>,
}

impl ListQuery {
    pub fn new(filters: ListFilters) -> Self {
        let search = Some(filters.search.trim().to_string()).filter(|s| !s.is_empty());
        Self {
            search,
            filters,
            pagination: None,
        }
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }

    /// Query-string pairs in the API's naming; inactive filters are omitted.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        if let Some(pagination) = &self.pagination {
            pairs.push(("page".to_string(), pagination.page.to_string()));
            pairs.push(("limit".to_string(), pagination.per_page.to_string()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search".to_string(), search.clone()));
        }
        for (name, value) in &self.filters.fields {
            let value = value.trim();
            if !value.is_empty() {
                pairs.push((name.clone(), value.to_string()));
            }
        }
        if let Some(location) = &self.filters.location {
            pairs.extend(
                location
                    .to_query_pairs()
                    .into_iter()
                    .map(|(name, value)| (name.to_string(), value)),
            );
        }
        let dates = [
            ("dateFrom", self.filters.date_from),
            ("dateTo", self.filters.date_to),
        ];
        for (name, date) in dates {
            if let Some(date) = date {
                pairs.push((name.to_string(), format_date(date)));
            }
        }
        if let Some(has_location) = self.filters.has_location.as_query() {
            pairs.push(("hasLocation".to_string(), has_location.to_string()));
        }

        pairs
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// Entity served by a paginated `GET /{resource}` endpoint.
pub trait Listable: Sized + Send + Sync + 'static {
    const PATH: &'static str;
    /// Record the entity is decoded from before its ids are validated.
    type Wire: DeserializeOwned + Send;

    fn from_wire(wire: Self::Wire) -> Result<Self, TypeConstraintError>;
}

macro_rules! listable {
    ($entity:ty, $wire:ty, $path:literal) => {
        impl Listable for $entity {
            const PATH: &'static str = $path;
            type Wire = $wire;

            fn from_wire(wire: Self::Wire) -> Result<Self, TypeConstraintError> {
                Self::try_from(wire)
            }
        }
    };
}

listable!(User, ApiUser, "users");
listable!(Fpo, ApiFpo, "fpos");
listable!(Product, ApiProduct, "products");
listable!(Brand, ApiBrand, "brands");
listable!(ServiceProvider, ApiServiceProvider, "service-providers");

#[async_trait]
pub trait LocationReader: Send + Sync {
    /// Options of `level` under `parent`; `None` only for a selector's top level.
    async fn list_locations(
        &self,
        level: LocationLevel,
        parent: Option<NodeKey>,
    ) -> RepositoryResult<Vec<LocationNode>>;
}

#[async_trait]
pub trait PageReader<T>: Send + Sync {
    async fn fetch_page(&self, query: &ListQuery) -> RepositoryResult<Page<T>>;
}

#[async_trait]
pub trait FpoDetailReader: Send + Sync {
    async fn list_fpo_members(
        &self,
        fpo_id: FpoId,
        limit: usize,
    ) -> RepositoryResult<Vec<FpoMember>>;
    async fn list_fpo_documents(
        &self,
        fpo_id: FpoId,
        limit: usize,
    ) -> RepositoryResult<Vec<FpoDocument>>;
}

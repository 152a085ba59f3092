//! Mock repository implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::fpo::{FpoDocument, FpoMember};
use crate::domain::location::{LocationLevel, LocationNode, NodeKey};
use crate::domain::types::FpoId;
use crate::repository::errors::RepositoryResult;
use crate::repository::{FpoDetailReader, LocationReader};

mock! {
    pub Repository {}

    #[async_trait]
    impl LocationReader for Repository {
        async fn list_locations(
            &self,
            level: LocationLevel,
            parent: Option<NodeKey>,
        ) -> RepositoryResult<Vec<LocationNode>>;
    }

    #[async_trait]
    impl FpoDetailReader for Repository {
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
}

//! Expandable-row detail loader for the FPO table.
//!
//! At most one row is expanded. The owner (row id plus generation) is updated
//! before a load is issued and checked again before its results are committed,
//! so a slow response for an abandoned row never reaches the panel.

use tokio_util::sync::CancellationToken;

use crate::domain::fpo::{FpoDocument, FpoMember};
use crate::domain::types::FpoId;
use crate::dto::detail::FpoDetailView;
use crate::dto::notice::Notice;
use crate::repository::FpoDetailReader;
use crate::repository::errors::{RepositoryError, RepositoryResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Owner {
    fpo_id: FpoId,
    generation: u64,
}

/// Members and documents load for one expanded row.
#[derive(Debug)]
pub struct DetailRequest {
    owner: Owner,
    limit: usize,
    cancel: CancellationToken,
}

impl DetailRequest {
    pub fn fpo_id(&self) -> FpoId {
        self.owner.fpo_id
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Fetches both collections concurrently.
    pub async fn send<R>(self, reader: &R) -> DetailResponse
    where
        R: FpoDetailReader + ?Sized,
    {
        let (id, limit) = (self.owner.fpo_id, self.limit);
        let fetch = async {
            tokio::join!(
                reader.list_fpo_members(id, limit),
                reader.list_fpo_documents(id, limit)
            )
        };
        let (members, documents) = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                (Err(RepositoryError::Cancelled), Err(RepositoryError::Cancelled))
            }
            results = fetch => results,
        };

        DetailResponse {
            owner: self.owner,
            members,
            documents,
        }
    }
}

#[derive(Debug)]
pub struct DetailResponse {
    owner: Owner,
    pub members: RepositoryResult<Vec<FpoMember>>,
    pub documents: RepositoryResult<Vec<FpoDocument>>,
}

impl DetailResponse {
    pub fn fpo_id(&self) -> FpoId {
        self.owner.fpo_id
    }
}

#[derive(Debug)]
pub struct FpoDetailLoader {
    limit: usize,
    owner: Option<Owner>,
    generation: u64,
    members: Vec<FpoMember>,
    documents: Vec<FpoDocument>,
    loading: bool,
    in_flight: Option<CancellationToken>,
}

impl FpoDetailLoader {
    /// `limit` caps how many members and documents are requested per row.
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            owner: None,
            generation: 0,
            members: Vec::new(),
            documents: Vec::new(),
            loading: false,
            in_flight: None,
        }
    }

    /// Toggles `fpo_id`: expanding a collapsed row returns its load, clicking
    /// the expanded row again collapses it.
    pub fn toggle(&mut self, fpo_id: FpoId) -> Option<DetailRequest> {
        if self.expanded() == Some(fpo_id) {
            self.collapse();
            None
        } else {
            Some(self.expand(fpo_id))
        }
    }

    /// Makes `fpo_id` the expanded row and returns the load for its detail.
    pub fn expand(&mut self, fpo_id: FpoId) -> DetailRequest {
        self.cancel_in_flight();
        self.generation += 1;
        let owner = Owner {
            fpo_id,
            generation: self.generation,
        };
        self.owner = Some(owner);

        self.members.clear();
        self.documents.clear();
        self.loading = true;

        let cancel = CancellationToken::new();
        self.in_flight = Some(cancel.clone());

        DetailRequest {
            owner,
            limit: self.limit,
            cancel,
        }
    }

    pub fn collapse(&mut self) {
        self.cancel_in_flight();
        self.generation += 1;
        self.owner = None;
        self.members.clear();
        self.documents.clear();
        self.loading = false;
    }

    /// Commits `response` if its row is still the expanded one.
    ///
    /// Returns notices for collections that failed to load for that row.
    pub fn apply(&mut self, response: DetailResponse) -> Vec<Notice> {
        if self.owner != Some(response.owner) {
            log::debug!(
                "Discarding detail for FPO {}: no longer expanded",
                response.owner.fpo_id
            );
            return Vec::new();
        }

        self.in_flight = None;
        self.loading = false;

        let id = response.owner.fpo_id;
        let mut notices = Vec::new();
        match response.members {
            Ok(members) => self.members = members,
            Err(err) => {
                log::error!("Failed to load members of FPO {id}: {err}");
                notices.push(Notice::error(format!("Failed to load members: {err}")));
            }
        }
        match response.documents {
            Ok(documents) => self.documents = documents,
            Err(err) => {
                log::error!("Failed to load documents of FPO {id}: {err}");
                notices.push(Notice::error(format!("Failed to load documents: {err}")));
            }
        }
        notices
    }

    /// Sends `request` and applies its response.
    pub async fn load<R>(&mut self, reader: &R, request: DetailRequest) -> Vec<Notice>
    where
        R: FpoDetailReader + ?Sized,
    {
        let response = request.send(reader).await;
        self.apply(response)
    }

    pub fn expanded(&self) -> Option<FpoId> {
        self.owner.map(|owner| owner.fpo_id)
    }

    pub fn members(&self) -> &[FpoMember] {
        &self.members
    }

    pub fn documents(&self) -> &[FpoDocument] {
        &self.documents
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn view(&self) -> FpoDetailView<'_> {
        FpoDetailView {
            expanded: self.expanded(),
            members: &self.members,
            documents: &self.documents,
            loading: self.loading,
        }
    }

    fn cancel_in_flight(&mut self) {
        if let Some(token) = self.in_flight.take() {
            token.cancel();
        }
    }
}

impl Drop for FpoDetailLoader {
    fn drop(&mut self) {
        self.cancel_in_flight();
    }
}

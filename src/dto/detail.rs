use serde::Serialize;

use crate::domain::fpo::{FpoDocument, FpoMember};
use crate::domain::types::FpoId;

/// Detail panel of the expanded FPO row.
#[derive(Debug, Serialize)]
pub struct FpoDetailView<'a> {
    pub expanded: Option<FpoId>,
    pub members: &'a [FpoMember],
    pub documents: &'a [FpoDocument],
    pub loading: bool,
}

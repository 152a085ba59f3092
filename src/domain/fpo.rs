//! Farmer producer organizations and the collections shown when a row is expanded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::selection::SelectionValue;
use crate::domain::types::{DocumentId, FpoId, MemberId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Fpo {
    pub id: FpoId,
    pub name: String,
    pub registration_number: Option<String>,
    pub member_count: u32,
    /// Geographic assignment; `None` for unassigned organizations.
    #[serde(default)]
    pub location: Option<SelectionValue>,
    /// Areas the organization operates in.
    #[serde(default)]
    pub coverage: Vec<SelectionValue>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FpoMember {
    pub id: MemberId,
    pub fpo_id: FpoId,
    pub name: String,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub joined_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FpoDocument {
    pub id: DocumentId,
    pub fpo_id: FpoId,
    pub title: String,
    pub url: String,
    pub uploaded_at: DateTime<Utc>,
}

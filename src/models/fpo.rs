use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::fpo::{Fpo, FpoDocument, FpoMember};
use crate::domain::selection::SelectionValue;
use crate::domain::types::{DocumentId, FpoId, MemberId, TypeConstraintError};
use crate::models::location::{ApiSelection, selection_from_wire};

/// FPO record as returned by `GET /fpos`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiFpo {
    pub id: i64,
    pub name: String,
    pub registration_number: Option<String>,
    pub member_count: u32,
    pub location: Option<ApiSelection>,
    #[serde(default)]
    pub coverage: Vec<ApiSelection>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ApiFpo> for Fpo {
    type Error = TypeConstraintError;

    fn try_from(value: ApiFpo) -> Result<Self, Self::Error> {
        let coverage = value
            .coverage
            .into_iter()
            .map(SelectionValue::try_from)
            .filter(|area| !matches!(area, Ok(area) if area.is_empty()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: FpoId::new(value.id)?,
            name: value.name,
            registration_number: value.registration_number,
            member_count: value.member_count,
            location: selection_from_wire(value.location)?,
            coverage,
            created_at: value.created_at,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiFpoMember {
    pub id: i64,
    pub fpo_id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub joined_at: Option<DateTime<Utc>>,
}

impl TryFrom<ApiFpoMember> for FpoMember {
    type Error = TypeConstraintError;

    fn try_from(value: ApiFpoMember) -> Result<Self, Self::Error> {
        Ok(Self {
            id: MemberId::new(value.id)?,
            fpo_id: FpoId::new(value.fpo_id)?,
            name: value.name,
            phone: value.phone,
            role: value.role,
            joined_at: value.joined_at,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiFpoDocument {
    pub id: i64,
    pub fpo_id: i64,
    pub title: String,
    pub url: String,
    pub uploaded_at: DateTime<Utc>,
}

impl TryFrom<ApiFpoDocument> for FpoDocument {
    type Error = TypeConstraintError;

    fn try_from(value: ApiFpoDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            id: DocumentId::new(value.id)?,
            fpo_id: FpoId::new(value.fpo_id)?,
            title: value.title,
            url: value.url,
            uploaded_at: value.uploaded_at,
        })
    }
}

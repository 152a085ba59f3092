use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::types::{TypeConstraintError, UserId};
use crate::domain::user::{User, UserRole};
use crate::models::location::{ApiSelection, selection_from_wire};

/// User record as returned by `GET /users`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiUser {
    pub id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub role: UserRole,
    pub is_active: bool,
    pub location: Option<ApiSelection>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ApiUser> for User {
    type Error = TypeConstraintError;

    fn try_from(value: ApiUser) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::new(value.id)?,
            name: value.name,
            phone: value.phone,
            email: value.email,
            role: value.role,
            is_active: value.is_active,
            location: selection_from_wire(value.location)?,
            created_at: value.created_at,
        })
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::selection::SelectionValue;
use crate::domain::types::UserId;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Farmer,
    Fpo,
    Provider,
    Buyer,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub role: UserRole,
    pub is_active: bool,
    #[serde(default)]
    pub location: Option<SelectionValue>,
    pub created_at: DateTime<Utc>,
}

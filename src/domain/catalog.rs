//! Marketplace catalogue: products, brands and service providers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::selection::SelectionValue;
use crate::domain::types::{BrandId, ProductId, ProviderId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub brand_id: Option<BrandId>,
    pub unit: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: BrandId,
    pub name: String,
    pub logo_url: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceProvider {
    pub id: ProviderId,
    pub name: String,
    pub service_type: String,
    pub phone: Option<String>,
    #[serde(default)]
    pub coverage: Vec<SelectionValue>,
}

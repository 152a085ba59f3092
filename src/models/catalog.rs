use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::catalog::{Brand, Product, ServiceProvider};
use crate::domain::selection::SelectionValue;
use crate::domain::types::{BrandId, ProductId, ProviderId, TypeConstraintError};
use crate::models::location::ApiSelection;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiProduct {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub brand_id: Option<i64>,
    pub unit: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ApiProduct> for Product {
    type Error = TypeConstraintError;

    fn try_from(value: ApiProduct) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProductId::new(value.id)?,
            name: value.name,
            category: value.category,
            brand_id: value.brand_id.map(BrandId::new).transpose()?,
            unit: value.unit,
            is_active: value.is_active,
            created_at: value.created_at,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiBrand {
    pub id: i64,
    pub name: String,
    pub logo_url: Option<String>,
}

impl TryFrom<ApiBrand> for Brand {
    type Error = TypeConstraintError;

    fn try_from(value: ApiBrand) -> Result<Self, Self::Error> {
        Ok(Self {
            id: BrandId::new(value.id)?,
            name: value.name,
            logo_url: value.logo_url,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiServiceProvider {
    pub id: i64,
    pub name: String,
    pub service_type: String,
    pub phone: Option<String>,
    #[serde(default)]
    pub coverage: Vec<ApiSelection>,
}

impl TryFrom<ApiServiceProvider> for ServiceProvider {
    type Error = TypeConstraintError;

    fn try_from(value: ApiServiceProvider) -> Result<Self, Self::Error> {
        let coverage = value
            .coverage
            .into_iter()
            .map(SelectionValue::try_from)
            .filter(|area| !matches!(area, Ok(area) if area.is_empty()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: ProviderId::new(value.id)?,
            name: value.name,
            service_type: value.service_type,
            phone: value.phone,
            coverage,
        })
    }
}

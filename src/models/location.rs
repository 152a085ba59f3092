use serde::Deserialize;

use crate::domain::location::LocationNode;
use crate::domain::selection::{SelectionFields, SelectionValue};
use crate::domain::types::{LocationCode, LocationId, TypeConstraintError};

/// Location record as returned by `GET /locations/{level}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiLocation {
    pub id: i64,
    #[serde(default)]
    pub code: Option<String>,
    pub name: String,
    #[serde(default)]
    pub name_local: Option<String>,
}

impl TryFrom<ApiLocation> for LocationNode {
    type Error = TypeConstraintError;

    fn try_from(value: ApiLocation) -> Result<Self, Self::Error> {
        let code = match value.code.as_deref().map(str::trim) {
            Some(code) if !code.is_empty() => Some(LocationCode::new(code)?),
            _ => None,
        };
        let name = value.name.trim();
        if name.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self {
            id: LocationId::new(value.id)?,
            code,
            name: name.to_string(),
            name_local: value
                .name_local
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        })
    }
}

/// Location or coverage value embedded in an entity payload, before the ids
/// and codes are validated.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSelection {
    pub country_code: Option<String>,
    pub state_id: Option<i64>,
    pub state_code: Option<String>,
    pub district_id: Option<i64>,
    pub block_id: Option<i64>,
    pub village_id: Option<i64>,
}

fn code(value: Option<String>) -> Result<Option<LocationCode>, TypeConstraintError> {
    match value.as_deref().map(str::trim) {
        Some(code) if !code.is_empty() => LocationCode::new(code).map(Some),
        _ => Ok(None),
    }
}

fn id(value: Option<i64>) -> Result<Option<LocationId>, TypeConstraintError> {
    value.map(LocationId::new).transpose()
}

impl TryFrom<ApiSelection> for SelectionValue {
    type Error = TypeConstraintError;

    fn try_from(value: ApiSelection) -> Result<Self, Self::Error> {
        SelectionValue::try_from(SelectionFields {
            country_code: code(value.country_code)?,
            state_id: id(value.state_id)?,
            state_code: code(value.state_code)?,
            district_id: id(value.district_id)?,
            block_id: id(value.block_id)?,
            village_id: id(value.village_id)?,
        })
    }
}

/// Converts an optional wire selection; an empty object means unassigned.
pub fn selection_from_wire(
    value: Option<ApiSelection>,
) -> Result<Option<SelectionValue>, TypeConstraintError> {
    let Some(value) = value else {
        return Ok(None);
    };
    let value = SelectionValue::try_from(value)?;
    Ok((!value.is_empty()).then_some(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_code_and_local_name_become_none() {
        let wire = ApiLocation {
            id: 4,
            code: Some(" ".to_string()),
            name: " Nashik ".to_string(),
            name_local: Some(String::new()),
        };

        let node = LocationNode::try_from(wire).expect("valid location");

        assert_eq!(node.name, "Nashik");
        assert_eq!(node.code, None);
        assert_eq!(node.name_local, None);
    }

    #[test]
    fn non_positive_id_is_rejected() {
        let wire = ApiLocation {
            id: 0,
            code: None,
            name: "Nowhere".to_string(),
            name_local: None,
        };

        assert_eq!(
            LocationNode::try_from(wire),
            Err(TypeConstraintError::NonPositiveId)
        );
    }

    #[test]
    fn wire_selection_validates_ids_and_hierarchy() {
        let zero_district = ApiSelection {
            state_code: Some("MH".to_string()),
            district_id: Some(0),
            ..ApiSelection::default()
        };
        assert_eq!(
            SelectionValue::try_from(zero_district),
            Err(TypeConstraintError::NonPositiveId)
        );

        let orphan_block = ApiSelection {
            block_id: Some(9),
            ..ApiSelection::default()
        };
        assert!(matches!(
            SelectionValue::try_from(orphan_block),
            Err(TypeConstraintError::BrokenHierarchy { .. })
        ));
    }

    #[test]
    fn empty_wire_selection_is_unassigned() {
        assert_eq!(selection_from_wire(Some(ApiSelection::default())), Ok(None));
        assert_eq!(selection_from_wire(None), Ok(None));

        let blank_codes = ApiSelection {
            country_code: Some(" in ".to_string()),
            state_code: Some(String::new()),
            ..ApiSelection::default()
        };
        let value = selection_from_wire(Some(blank_codes))
            .expect("valid selection")
            .expect("country is set");
        assert_eq!(value.to_query_pairs(), vec![("countryCode", "IN".to_string())]);
    }
}

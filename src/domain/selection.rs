//! Partial location selections produced by cascading selectors.
//!
//! A [`SelectionValue`] is a path from its root level downwards. The path
//! representation makes prefix-consistency structural: a district can only be
//! present when the state above it is, and replacing a level drops everything
//! below it.

use serde::{Deserialize, Serialize};

use crate::domain::location::{LocationLevel, NodeKey};
use crate::domain::types::{LocationCode, LocationId, TypeConstraintError};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SelectionFields", into = "SelectionFields")]
pub struct SelectionValue {
    root: LocationLevel,
    path: Vec<NodeKey>,
}

impl SelectionValue {
    /// An empty selection whose first level is `root`.
    pub fn empty(root: LocationLevel) -> Self {
        Self {
            root,
            path: Vec::new(),
        }
    }

    /// Builds a value from keys listed from `root` downwards.
    pub(crate) fn from_path(root: LocationLevel, mut path: Vec<NodeKey>) -> Self {
        path.truncate(LocationLevel::ALL.len() - root.depth());
        Self { root, path }
    }

    pub fn root(&self) -> LocationLevel {
        self.root
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Selected key at `level`, if any.
    pub fn get(&self, level: LocationLevel) -> Option<&NodeKey> {
        let index = level.depth().checked_sub(self.root.depth())?;
        self.path.get(index)
    }

    /// Deepest selected level together with its key.
    pub fn deepest(&self) -> Option<(LocationLevel, &NodeKey)> {
        let last = self.path.last()?;
        let level = LocationLevel::ALL[self.root.depth() + self.path.len() - 1];
        Some((level, last))
    }

    /// Sets `level` to `key`, clearing every level below it.
    ///
    /// Fails when the level above `level` has no selection.
    pub fn with(mut self, level: LocationLevel, key: NodeKey) -> Result<Self, TypeConstraintError> {
        let index = level
            .depth()
            .checked_sub(self.root.depth())
            .ok_or_else(|| {
                TypeConstraintError::InvalidValue(format!(
                    "{level} is above the selection root {}",
                    self.root
                ))
            })?;
        if index > self.path.len() {
            return Err(TypeConstraintError::BrokenHierarchy {
                child: field_name(level),
                parent: level.parent().map_or("root", field_name),
            });
        }
        self.path.truncate(index);
        self.path.push(key);
        Ok(self)
    }

    /// Query parameters describing this selection, using the API's field names.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        LocationLevel::ALL
            .iter()
            .filter_map(|level| {
                self.get(*level)
                    .map(|key| (query_field(*level, key), key.to_string()))
            })
            .collect()
    }
}

fn field_name(level: LocationLevel) -> &'static str {
    match level {
        LocationLevel::Country => "countryCode",
        LocationLevel::State => "state",
        LocationLevel::District => "districtId",
        LocationLevel::Block => "blockId",
        LocationLevel::Village => "villageId",
    }
}

fn query_field(level: LocationLevel, key: &NodeKey) -> &'static str {
    match (level, key) {
        (LocationLevel::State, NodeKey::Id(_)) => "stateId",
        (LocationLevel::State, NodeKey::Code(_)) => "stateCode",
        _ => field_name(level),
    }
}

/// Flat wire shape of a selection (`CoverageValue` / `LocationValue`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<LocationCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_id: Option<LocationId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_code: Option<LocationCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district_id: Option<LocationId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_id: Option<LocationId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub village_id: Option<LocationId>,
}

impl TryFrom<SelectionFields> for SelectionValue {
    type Error = TypeConstraintError;

    fn try_from(fields: SelectionFields) -> Result<Self, Self::Error> {
        if fields.state_id.is_some() && fields.state_code.is_some() {
            return Err(TypeConstraintError::InvalidValue(
                "stateId and stateCode are mutually exclusive".to_string(),
            ));
        }
        let state = fields
            .state_id
            .map(NodeKey::Id)
            .or(fields.state_code.map(NodeKey::Code));
        let keys = [
            fields.country_code.map(NodeKey::Code),
            state,
            fields.district_id.map(NodeKey::Id),
            fields.block_id.map(NodeKey::Id),
            fields.village_id.map(NodeKey::Id),
        ];

        // Coverage values start at the state, location values at the country.
        let root = match keys.iter().position(Option::is_some) {
            None => LocationLevel::Country,
            Some(depth) if depth <= LocationLevel::State.depth() => LocationLevel::ALL[depth],
            Some(depth) => {
                let level = LocationLevel::ALL[depth];
                return Err(TypeConstraintError::BrokenHierarchy {
                    child: field_name(level),
                    parent: level.parent().map_or("root", field_name),
                });
            }
        };

        let mut value = SelectionValue::empty(root);
        for (depth, key) in keys.into_iter().enumerate().skip(root.depth()) {
            let level = LocationLevel::ALL[depth];
            if let Some(key) = key {
                value = value.with(level, key)?;
            }
        }
        Ok(value)
    }
}

impl From<SelectionValue> for SelectionFields {
    fn from(value: SelectionValue) -> Self {
        let mut fields = SelectionFields::default();
        for level in LocationLevel::ALL {
            let Some(key) = value.get(level).cloned() else {
                continue;
            };
            match (level, key) {
                (LocationLevel::Country, NodeKey::Code(code)) => fields.country_code = Some(code),
                (LocationLevel::State, NodeKey::Id(id)) => fields.state_id = Some(id),
                (LocationLevel::State, NodeKey::Code(code)) => fields.state_code = Some(code),
                (LocationLevel::District, NodeKey::Id(id)) => fields.district_id = Some(id),
                (LocationLevel::Block, NodeKey::Id(id)) => fields.block_id = Some(id),
                (LocationLevel::Village, NodeKey::Id(id)) => fields.village_id = Some(id),
                (level, key) => {
                    log::warn!("Dropping {level} key {key}: no wire field carries it");
                }
            }
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(value: i64) -> NodeKey {
        NodeKey::Id(LocationId::new(value).expect("valid id"))
    }

    #[test]
    fn with_replaces_level_and_drops_descendants() {
        let value = SelectionValue::empty(LocationLevel::State)
            .with(LocationLevel::State, id(1))
            .and_then(|v| v.with(LocationLevel::District, id(2)))
            .and_then(|v| v.with(LocationLevel::Block, id(3)))
            .and_then(|v| v.with(LocationLevel::Village, id(4)))
            .and_then(|v| v.with(LocationLevel::District, id(9)))
            .expect("valid selection");

        assert_eq!(value.get(LocationLevel::State), Some(&id(1)));
        assert_eq!(value.get(LocationLevel::District), Some(&id(9)));
        assert_eq!(value.get(LocationLevel::Block), None);
        assert_eq!(value.get(LocationLevel::Village), None);
    }

    #[test]
    fn child_without_parent_is_rejected() {
        let result = SelectionValue::empty(LocationLevel::State).with(LocationLevel::Block, id(3));
        assert_eq!(
            result,
            Err(TypeConstraintError::BrokenHierarchy {
                child: "blockId",
                parent: "districtId",
            })
        );
    }

    #[test]
    fn flat_fields_with_gap_fail_to_deserialize() {
        let result = serde_json::from_str::<SelectionValue>(r#"{"stateId": 4, "blockId": 7}"#);
        assert!(result.is_err());
    }

    #[test]
    fn flat_fields_without_state_are_rejected() {
        let district_only = SelectionValue::try_from(SelectionFields {
            district_id: LocationId::new(12).ok(),
            ..SelectionFields::default()
        });
        assert_eq!(
            district_only,
            Err(TypeConstraintError::BrokenHierarchy {
                child: "districtId",
                parent: "state",
            })
        );

        let block_only = serde_json::from_str::<SelectionValue>(r#"{"blockId": 7}"#);
        assert!(block_only.is_err());
        let village_only = serde_json::from_str::<SelectionValue>(r#"{"villageId": 3}"#);
        assert!(village_only.is_err());
    }

    #[test]
    fn coverage_value_may_start_at_state() {
        let value: SelectionValue =
            serde_json::from_str(r#"{"stateId": 4, "districtId": 12}"#).expect("valid selection");

        assert_eq!(value.root(), LocationLevel::State);
        assert_eq!(value.get(LocationLevel::District), Some(&id(12)));
    }

    #[test]
    fn flat_fields_round_trip_through_json() {
        let value: SelectionValue =
            serde_json::from_str(r#"{"countryCode": "in", "stateCode": "MH", "districtId": 12}"#)
                .expect("valid selection");

        assert_eq!(value.root(), LocationLevel::Country);
        assert_eq!(
            value.deepest().map(|(level, _)| level),
            Some(LocationLevel::District)
        );
        assert_eq!(
            value.to_query_pairs(),
            vec![
                ("countryCode", "IN".to_string()),
                ("stateCode", "MH".to_string()),
                ("districtId", "12".to_string()),
            ]
        );
        let json = serde_json::to_value(&value).expect("serializable");
        assert_eq!(
            json,
            serde_json::json!({"countryCode": "IN", "stateCode": "MH", "districtId": 12})
        );
    }
}

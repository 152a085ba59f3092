//! Client-side search and truncation over a loaded option list.

use crate::domain::location::LocationNode;
use crate::dto::options::{OptionsView, Truncation};
use crate::{SEARCH_THRESHOLD, VISIBLE_OPTION_LIMIT};

/// Filters `options` by `search` and caps the result at [`VISIBLE_OPTION_LIMIT`].
///
/// Matching is a case-insensitive substring test on the name and local name.
/// Order is preserved.
pub fn visible_options<'a>(options: &'a [LocationNode], search: &str) -> OptionsView<'a> {
    let needle = search.trim().to_lowercase();

    let matching: Vec<&LocationNode> = if needle.is_empty() {
        options.iter().collect()
    } else {
        options
            .iter()
            .filter(|option| option.matches_search(&needle))
            .collect()
    };

    let matches = matching.len();
    let shown = matches.min(VISIBLE_OPTION_LIMIT);
    let truncation = match (matches > VISIBLE_OPTION_LIMIT, needle.is_empty()) {
        (false, _) => None,
        (true, true) => Some(Truncation::OfTotal {
            shown,
            total: options.len(),
        }),
        (true, false) => Some(Truncation::OfMatches { shown, matches }),
    };

    let mut visible = matching;
    visible.truncate(shown);

    OptionsView {
        visible,
        total: options.len(),
        matches,
        truncation,
        search_enabled: options.len() > SEARCH_THRESHOLD,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::LocationId;

    fn districts(names: &[&str]) -> Vec<LocationNode> {
        names
            .iter()
            .enumerate()
            .map(|(index, name)| LocationNode {
                id: LocationId::new(index as i64 + 1).expect("valid id"),
                code: None,
                name: name.to_string(),
                name_local: None,
            })
            .collect()
    }

    fn numbered(count: usize, prefix: &str) -> Vec<String> {
        (1..=count).map(|n| format!("{prefix} {n}")).collect()
    }

    #[test]
    fn short_list_shows_everything_without_search() {
        let options = districts(&["Patna", "Gaya", "Nalanda"]);

        let view = visible_options(&options, "");

        assert!(!view.search_enabled);
        assert_eq!(view.visible.len(), 3);
        assert_eq!(view.truncation, None);
    }

    #[test]
    fn long_list_is_capped_with_total_indicator() {
        let mut names = numbered(73, "District");
        names.push("Pune".to_string());
        names.push("Pune Rural".to_string());
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let options = districts(&refs);

        let view = visible_options(&options, "");
        assert!(view.search_enabled);
        assert_eq!(view.visible.len(), 50);
        assert_eq!(
            view.truncation,
            Some(Truncation::OfTotal {
                shown: 50,
                total: 75
            })
        );
        assert_eq!(
            view.truncation.map(|t| t.to_string()).as_deref(),
            Some("Showing 50 of 75 total")
        );

        let view = visible_options(&options, "PUNE");
        let names: Vec<&str> = view.visible.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Pune", "Pune Rural"]);
        assert_eq!(view.truncation, None);
    }

    #[test]
    fn broad_search_reports_matches() {
        let names = numbered(120, "Village");
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let options = districts(&refs);

        let view = visible_options(&options, "village 1");

        // "Village 1", "Village 10".."Village 19", "Village 100".."Village 120"
        assert_eq!(view.matches, 32);
        assert_eq!(view.visible.len(), 32);
        assert_eq!(view.truncation, None);

        let view = visible_options(&options, "vill");
        assert_eq!(
            view.truncation,
            Some(Truncation::OfMatches {
                shown: 50,
                matches: 120
            })
        );
        assert_eq!(view.visible[0].name, "Village 1");
    }

    #[test]
    fn filtering_is_idempotent() {
        let names = numbered(90, "Block");
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let options = districts(&refs);

        let first = visible_options(&options, "block 8");
        let second = visible_options(&options, "block 8");

        assert_eq!(first, second);
        assert_eq!(first.visible.len(), first.matches.min(50));
    }
}

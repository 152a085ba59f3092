use fpo_admin::domain::types::LocationCode;
use fpo_admin::services::preferences::{
    JsonFilePreferences, PreferenceError, PreferenceStore, SELECTED_COUNTRY, selected_country,
    set_selected_country, set_sidebar_collapsed, sidebar_collapsed,
};
use serde_json::json;
use tempfile::TempDir;

#[test]
fn missing_file_starts_empty() {
    let dir = TempDir::new().unwrap();
    let store = JsonFilePreferences::open(dir.path().join("prefs.json")).unwrap();

    assert!(!sidebar_collapsed(&store).unwrap());
    assert_eq!(selected_country(&store).unwrap(), None);
    assert!(!store.path().exists());
}

#[test]
fn values_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prefs.json");
    let code = LocationCode::new("IN").unwrap();

    {
        let store = JsonFilePreferences::open(&path).unwrap();
        set_sidebar_collapsed(&store, true).unwrap();
        set_selected_country(&store, Some(&code)).unwrap();
    }

    let reopened = JsonFilePreferences::open(&path).unwrap();
    assert!(sidebar_collapsed(&reopened).unwrap());
    assert_eq!(selected_country(&reopened).unwrap(), Some(code));

    let on_disk: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(
        on_disk,
        json!({ "selectedCountry": "IN", "sidebarCollapsed": true })
    );
}

#[test]
fn clearing_country_removes_key() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prefs.json");
    let store = JsonFilePreferences::open(&path).unwrap();
    set_selected_country(&store, Some(&LocationCode::new("NP").unwrap())).unwrap();

    set_selected_country(&store, None).unwrap();

    let reopened = JsonFilePreferences::open(&path).unwrap();
    assert_eq!(reopened.get(SELECTED_COUNTRY).unwrap(), None);
}

#[test]
fn corrupt_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prefs.json");
    std::fs::write(&path, b"{not json").unwrap();

    let result = JsonFilePreferences::open(&path);

    assert!(matches!(result, Err(PreferenceError::Decode(_))));
}

//! Walks the location hierarchy against a live API, printing each level's
//! options and the resulting selection.
//!
//! Usage: `location_walk [COUNTRY [STATE [DISTRICT [BLOCK [VILLAGE]]]]]`.
//! Without arguments the country remembered in the preferences file is used.

use std::env;
use std::process;

use dotenvy::dotenv;

use fpo_admin::domain::location::{LocationNode, NodeKey};
use fpo_admin::models::config::ConsoleConfig;
use fpo_admin::repository::HttpRepository;
use fpo_admin::repository::errors::RepositoryError;
use fpo_admin::services::cascade::{
    CascadingSelector, LevelStatus, OptionsRequest, SelectionError, SelectorConfig,
};
use fpo_admin::services::preferences::{
    JsonFilePreferences, MemoryPreferences, PreferenceStore, selected_country,
    set_selected_country,
};
use fpo_admin::services::{ServiceError, ServiceResult};

fn open_preferences(config: &ConsoleConfig) -> ServiceResult<Box<dyn PreferenceStore>> {
    let store: Box<dyn PreferenceStore> = match &config.preferences_path {
        Some(path) => Box::new(JsonFilePreferences::open(path)?),
        None => Box::new(MemoryPreferences::new()),
    };
    Ok(store)
}

fn find_option<'a>(
    options: &'a [LocationNode],
    selector: &SelectorConfig,
    depth: usize,
    wanted: &str,
) -> Option<&'a LocationNode> {
    let key_field = selector.levels()[depth].key;
    options.iter().find(|node| {
        node.key(key_field)
            .is_some_and(|key| key.to_string().eq_ignore_ascii_case(wanted))
            || node.name.eq_ignore_ascii_case(wanted)
    })
}

async fn walk(
    repo: &HttpRepository,
    preferences: &dyn PreferenceStore,
    mut path: Vec<String>,
) -> ServiceResult<()> {
    if path.is_empty() {
        if let Some(country) = selected_country(preferences)? {
            log::info!("Using remembered country {country}");
            path.push(country.to_string());
        }
    }

    let config = SelectorConfig::location();
    let mut selector = CascadingSelector::new(config.clone());
    let mut next: Option<OptionsRequest> = Some(selector.mount());

    for depth in 0..config.levels().len() {
        let Some(request) = next.take() else {
            break;
        };
        let level = request.level;
        selector.load(repo, request).await;

        if selector.status(level)? == LevelStatus::Error {
            return Err(ServiceError::Repository(RepositoryError::Unexpected(
                format!("could not load {level} options"),
            )));
        }

        let view = selector.view(level)?;
        log::info!("{level}: {} options", view.total);
        for node in &view.visible {
            println!("  {}\t{}", display_key(node, &config, depth), node.display_name());
        }
        if let Some(truncation) = &view.truncation {
            println!("  ({truncation})");
        }

        let Some(wanted) = path.get(depth) else {
            break;
        };
        let node = find_option(selector.options(level)?, &config, depth, wanted)
            .cloned()
            .ok_or_else(|| SelectionError::UnknownOption {
                level,
                key: wanted.clone(),
            })?;
        next = selector.select_node(level, &node)?;

        if depth == 0 {
            if let Some(NodeKey::Code(code)) = node.key(config.levels()[0].key) {
                set_selected_country(preferences, Some(&code))?;
            }
        }
    }

    let value = selector.value();
    match serde_json::to_string(&value) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("Failed to serialize selection: {err}"),
    }
    Ok(())
}

fn display_key(node: &LocationNode, config: &SelectorConfig, depth: usize) -> String {
    node.key(config.levels()[depth].key)
        .map(|key| key.to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = match ConsoleConfig::load() {
        Ok(config) => config,
        Err(err) => {
            log::error!("Error loading console config: {}", err);
            process::exit(1);
        }
    };

    let repo = match HttpRepository::from_config(&config) {
        Ok(repo) => repo,
        Err(err) => {
            log::error!("Error building API client: {}", err);
            process::exit(1);
        }
    };

    let preferences = match open_preferences(&config) {
        Ok(preferences) => preferences,
        Err(err) => {
            log::error!("Error opening preferences: {}", err);
            process::exit(1);
        }
    };

    log::info!("Probing locations at {}", repo.base_url());
    let path: Vec<String> = env::args().skip(1).collect();
    if let Err(err) = walk(&repo, preferences.as_ref(), path).await {
        log::error!("Location walk failed: {}", err);
        process::exit(1);
    }
}

#![allow(dead_code)]

use std::time::Duration;

use fpo_admin::models::config::ConsoleConfig;
use fpo_admin::repository::HttpRepository;
use serde_json::{Value, json};
use wiremock::MockServer;

pub const API_PREFIX: &str = "/api/v1";

pub fn config(server: &MockServer) -> ConsoleConfig {
    ConsoleConfig {
        api_base_url: format!("{}{API_PREFIX}/", server.uri()),
        request_timeout_ms: None,
        search_debounce_ms: 300,
        page_size: 20,
        detail_limit: 100,
        preferences_path: None,
    }
}

pub fn repo(server: &MockServer) -> HttpRepository {
    HttpRepository::from_config(&config(server)).unwrap()
}

pub fn repo_with_timeout(server: &MockServer, timeout: Duration) -> HttpRepository {
    let config = ConsoleConfig {
        request_timeout_ms: Some(timeout.as_millis() as u64),
        ..config(server)
    };
    HttpRepository::from_config(&config).unwrap()
}

pub fn api_path(path: &str) -> String {
    format!("{API_PREFIX}/{path}")
}

pub fn ok(data: Value) -> Value {
    json!({ "success": true, "data": data })
}

pub fn location(id: i64, code: Option<&str>, name: &str) -> Value {
    json!({ "id": id, "code": code, "name": name })
}

pub fn locations(prefix: &str, count: i64) -> Value {
    Value::Array(
        (1..=count)
            .map(|n| location(n, None, &format!("{prefix} {n}")))
            .collect(),
    )
}

pub fn page(items: Vec<Value>, page: usize, limit: usize, total: usize) -> Value {
    ok(json!({
        "items": items,
        "pagination": {
            "page": page,
            "limit": limit,
            "total": total,
            "pages": total.div_ceil(limit),
        }
    }))
}

pub fn fpo(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "registrationNumber": format!("REG-{id}"),
        "memberCount": 12,
        "location": { "countryCode": "IN", "stateCode": "BR" },
        "createdAt": "2024-03-01T10:00:00Z",
    })
}

pub fn member(id: i64, fpo_id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "fpoId": fpo_id,
        "name": name,
        "phone": null,
        "role": "farmer",
        "joinedAt": "2024-03-02T09:30:00Z",
    })
}

pub fn document(id: i64, fpo_id: i64, title: &str) -> Value {
    json!({
        "id": id,
        "fpoId": fpo_id,
        "title": title,
        "url": format!("https://files.example/{id}.pdf"),
        "uploadedAt": "2024-03-05T12:00:00Z",
    })
}

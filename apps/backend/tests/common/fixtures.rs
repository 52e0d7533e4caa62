//! Test fixtures and factory functions for creating request bodies.

use serde_json::json;

/// Three cards, the second with markup on its answer side.
pub fn sample_cards() -> serde_json::Value {
    json!([
        { "id": 1, "front": "chat", "back": "cat" },
        { "id": 2, "front": "chien", "back": "the <b>big</b> dog" },
        { "id": 3, "front": "oiseau", "back": "bird" }
    ])
}

/// Create a start session request body.
pub fn start_session_request(
    cards: serde_json::Value,
    prompt_side: Option<&str>,
    answer_side: Option<&str>,
) -> serde_json::Value {
    let mut obj = serde_json::Map::new();
    obj.insert("cards".to_string(), cards);
    if let Some(side) = prompt_side {
        obj.insert("prompt_side".to_string(), json!(side));
    }
    if let Some(side) = answer_side {
        obj.insert("answer_side".to_string(), json!(side));
    }
    serde_json::Value::Object(obj)
}

/// Create a check answer request body.
pub fn check_request(text: &str) -> serde_json::Value {
    json!({ "text": text })
}

/// Create an input update request body.
pub fn input_request(text: &str) -> serde_json::Value {
    json!({ "text": text })
}

/// Create an advance request body.
pub fn advance_request(direction: &str) -> serde_json::Value {
    json!({ "direction": direction })
}

/// Session resource path.
pub fn session_path(session_id: &str, action: Option<&str>) -> String {
    match action {
        Some(a) => format!("/api/sessions/{}/{}", session_id, a),
        None => format!("/api/sessions/{}", session_id),
    }
}

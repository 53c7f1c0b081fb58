//! Shared-endpoint route: every action is POSTed to one fixed path with
//! the action name carried in a JSON body field.

use serde_json::Value;

use crate::dispatch::route::{ActionRoute, PlannedRequest, join_url};

/// Route for servers exposing a single action endpoint (`POST /action`
/// with `{"action": "<name>"}` in the default configuration).
pub struct BodyRoute {
    url: String,
    action_field: String,
}

impl BodyRoute {
    pub fn new(server_url: &str, endpoint: &str, action_field: &str) -> Self {
        BodyRoute {
            url: join_url(server_url, endpoint),
            action_field: action_field.to_string(),
        }
    }
}

impl ActionRoute for BodyRoute {
    fn name(&self) -> &str {
        "body"
    }

    fn plan(&self, action: &str) -> Option<PlannedRequest> {
        if action.is_empty() {
            return None;
        }

        let mut body = serde_json::Map::new();
        body.insert(
            self.action_field.clone(),
            Value::String(action.to_string()),
        );

        Some(PlannedRequest {
            url: self.url.clone(),
            body: Some(Value::Object(body)),
        })
    }
}

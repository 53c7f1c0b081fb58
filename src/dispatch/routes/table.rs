//! Table route: each action maps to its own endpoint path through a static
//! table fixed at setup time. Unknown actions resolve to nothing, so they
//! never reach the network.

use std::collections::HashMap;

use crate::dispatch::route::{ActionRoute, PlannedRequest, join_url};

/// Route for servers exposing one endpoint per action
/// (`POST /api/generate_certificates` and friends).
pub struct TableRoute {
    server_url: String,
    table: HashMap<String, String>,
}

impl TableRoute {
    pub fn new(server_url: &str, table: HashMap<String, String>) -> Self {
        TableRoute {
            server_url: server_url.to_string(),
            table,
        }
    }

    /// Builds the table from `(name, endpoint)` pairs, last entry winning
    /// on duplicate names.
    pub fn from_entries<'a>(
        server_url: &str,
        entries: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        let table = entries
            .into_iter()
            .map(|(name, endpoint)| (name.to_string(), endpoint.to_string()))
            .collect();
        Self::new(server_url, table)
    }
}

impl ActionRoute for TableRoute {
    fn name(&self) -> &str {
        "table"
    }

    fn plan(&self, action: &str) -> Option<PlannedRequest> {
        self.table.get(action).map(|endpoint| PlannedRequest {
            url: join_url(&self.server_url, endpoint),
            body: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_route() -> TableRoute {
        TableRoute::from_entries(
            "http://127.0.0.1:5000",
            [
                ("run_dashboard", "/api/run_dashboard"),
                ("generate_certificates", "/api/generate_certificates"),
            ],
        )
    }

    #[test]
    fn test_known_action_resolves_to_its_endpoint() {
        let planned = sample_route()
            .plan("generate_certificates")
            .expect("mapped action should resolve");
        assert_eq!(planned.url, "http://127.0.0.1:5000/api/generate_certificates");
        assert!(planned.body.is_none());
    }

    #[test]
    fn test_unknown_action_does_not_resolve() {
        assert!(sample_route().plan("reboot_universe").is_none());
    }

    #[test]
    fn test_empty_action_does_not_resolve() {
        assert!(sample_route().plan("").is_none());
    }

    #[test]
    fn test_empty_table_resolves_nothing() {
        let route = TableRoute::new("http://127.0.0.1:5000", HashMap::new());
        assert!(route.plan("run_dashboard").is_none());
    }
}

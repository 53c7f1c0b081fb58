//! The dispatcher: resolve an action, POST it, render the outcome.
//!
//! The lifecycle is a single linear pass with no observable intermediate
//! state beyond the surface text:
//!
//! ```text
//! plan() ──none──▶ return (surface untouched)
//!    │
//!    ▼
//! "Running <action>..." ──▶ POST ──▶ decode ──▶ one terminal write
//! ```

use log::{debug, info, warn};
use serde_json::Value;
use std::sync::Arc;

use crate::dispatch::route::{ActionRoute, DispatchError, PlannedRequest};
use crate::dispatch::types::{ActionResult, ResponseFields};
use crate::surface::DisplaySurface;

/// Prefix for outcomes the server itself reported as failures.
pub const FAILURE_PREFIX: &str = "Error:\n";
/// Prefix for round trips that never produced a decodable answer.
pub const TRANSPORT_PREFIX: &str = "Request failed: ";

/// Carries named actions to the control server and mirrors the result
/// onto a [`DisplaySurface`].
///
/// The route and the surface are injected at setup time; the dispatcher
/// itself holds no mutable state, so overlapping `dispatch` calls are
/// allowed and simply race on the surface, last writer winning.
pub struct ActionDispatcher {
    client: reqwest::Client,
    route: Arc<dyn ActionRoute>,
    fields: ResponseFields,
    surface: Arc<dyn DisplaySurface>,
}

impl ActionDispatcher {
    pub fn new(
        route: Arc<dyn ActionRoute>,
        fields: ResponseFields,
        surface: Arc<dyn DisplaySurface>,
    ) -> Self {
        ActionDispatcher {
            client: reqwest::Client::new(),
            route,
            fields,
            surface,
        }
    }

    /// Runs one action to completion.
    ///
    /// Writes an in-progress placeholder, then exactly one terminal status:
    /// the server's message, a failure message with [`FAILURE_PREFIX`], or
    /// a transport description with [`TRANSPORT_PREFIX`]. An action the
    /// route cannot resolve is a silent no-op. Nothing is retried and no
    /// failure escapes to the caller; dropping the returned future before
    /// completion abandons the request without a terminal write.
    pub async fn dispatch(&self, action: &str) {
        let Some(request) = self.route.plan(action) else {
            debug!(
                "action '{}' has no endpoint on route '{}', skipping",
                action,
                self.route.name()
            );
            return;
        };

        info!("dispatching '{}' to {}", action, request.url);
        self.surface.render(&format!("Running {action}..."));

        match self.send(request).await {
            Ok(result) if result.success => self.surface.render(&result.message),
            Ok(result) => {
                warn!("'{}' reported failure: {}", action, result.message);
                self.surface
                    .render(&format!("{FAILURE_PREFIX}{}", result.message));
            }
            Err(err) => {
                warn!("'{}' did not complete: {}", action, err);
                self.surface.render(&format!("{TRANSPORT_PREFIX}{err}"));
            }
        }
    }

    /// One POST, one decoded result. The HTTP status is recorded but does
    /// not decide the outcome; the body does.
    async fn send(&self, request: PlannedRequest) -> Result<ActionResult, DispatchError> {
        let mut pending = self.client.post(&request.url);
        if let Some(body) = &request.body {
            pending = pending.json(body);
        }

        let response = pending
            .send()
            .await
            .map_err(|e| DispatchError::Network(e.to_string()))?;

        debug!("response status: {}", response.status());

        let raw = response
            .text()
            .await
            .map_err(|e| DispatchError::Network(e.to_string()))?;
        let payload: Value =
            serde_json::from_str(&raw).map_err(|e| DispatchError::Parse(e.to_string()))?;

        Ok(self.fields.decode(&payload))
    }
}

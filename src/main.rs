//! Zellij plugin wrapper and entry point.
//!
//! This module provides the thin integration layer between the zatlas library
//! and the Zellij plugin system. It implements the `ZellijPlugin` trait,
//! translates host events into library events and performs the actions the
//! library asks for.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Permissions**: Request `WebAccess`; the catalog read starts once granted
//! 3. **Update**: Map keys and web responses to library events
//! 4. **Render**: Call library render function
//!
//! # Event Mapping
//!
//! - `Key` → see [`zatlas::app::keys`]
//! - `PermissionRequestResult` → `Event::PermissionsResult`
//! - `WebRequestResult` → `Event::FetchCompleted`, matched to its request
//!   through the context map

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use zatlas::app::keys::map_key;
use zatlas::source::FetchKind;
use zatlas::{handle_event, Action, Config, Event};

register_plugin!(State);

/// Plugin state wrapper.
struct State {
    /// Core application state from library layer.
    app: zatlas::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: zatlas::initialize_with_storage(
                &Config::default(),
                Box::new(zatlas::storage::MemoryStorage::new()),
            ),
        }
    }
}

impl ZellijPlugin for State {
    /// Initializes the plugin on load.
    ///
    /// # Permissions
    ///
    /// Requests `WebAccess` for the REST Countries reads.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        zatlas::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(
            api_base_url = %config.api_base_url,
            require_login = config.require_login,
            scoped_favorites = config.scoped_favorites,
            "parsed configuration"
        );
        self.app = zatlas::initialize(&config);

        request_permission(&[PermissionType::WebAccess]);
        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Handles incoming Zellij events. Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match map_key(&self.app, key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::PermissionRequestResult(status) => Event::PermissionsResult {
                granted: matches!(status, PermissionStatus::Granted),
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_result(status, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in actions {
                    Self::execute_action(&a);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        zatlas::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Matches a web response to the request that issued it.
    fn map_web_result(status: u16, body: Vec<u8>, context: &BTreeMap<String, String>) -> Option<Event> {
        let Some(kind) = FetchKind::from_context(context) else {
            tracing::debug!(status = status, "ignoring untagged web response");
            return None;
        };
        tracing::debug!(kind = kind.label(), status = status, body_len = body.len(), "web response");
        Some(Event::FetchCompleted { kind, status, body })
    }

    /// Executes an action returned from event handling.
    #[tracing::instrument(level = "debug")]
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::Fetch(request) => {
                tracing::debug!(url = %request.url, kind = request.kind.label(), "issuing web request");
                web_request(
                    &request.url,
                    HttpVerb::Get,
                    BTreeMap::new(),
                    vec![],
                    request.kind.to_context(),
                );
            }
        }
    }
}

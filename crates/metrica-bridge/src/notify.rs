// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-process "configuration updated" notification.
//
// Published on every `activate`, independent of the native outcome, so the
// rest of the application can react to activation without talking to the
// native side.

use metrica_core::Configuration;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::broadcast;
use tracing::debug;

/// Notification carrying the configuration passed to `activate`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigurationUpdated {
    /// Event name, from `BridgeSettings::configuration_event`.
    #[serde(skip)]
    pub event: String,
    pub config: Configuration,
}

impl ConfigurationUpdated {
    /// Event detail as a JSON object: `{"config": {...}}`.
    pub fn detail(&self) -> Value {
        serde_json::json!({ "config": &self.config })
    }
}

/// Fan-out hub for [`ConfigurationUpdated`].
///
/// Publishing never blocks and never fails; with no subscribers the
/// notification is simply dropped. Slow subscribers lose the oldest entries
/// once `capacity` is exceeded.
#[derive(Debug, Clone)]
pub struct ConfigurationNotifier {
    event: String,
    tx: broadcast::Sender<ConfigurationUpdated>,
}

impl ConfigurationNotifier {
    pub fn new(event: impl Into<String>, capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self {
            event: event.into(),
            tx,
        }
    }

    pub fn event_name(&self) -> &str {
        &self.event
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ConfigurationUpdated> {
        self.tx.subscribe()
    }

    /// Broadcast `config`. Returns how many subscribers received it.
    pub fn publish(&self, config: Configuration) -> usize {
        let notification = ConfigurationUpdated {
            event: self.event.clone(),
            config,
        };
        match self.tx.send(notification) {
            Ok(receivers) => receivers,
            Err(_) => {
                debug!(event = %self.event, "no subscribers for configuration notification");
                0
            }
        }
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge settings: how the client addresses the native component and names
// its local notification. Not to be confused with the analytics
// `Configuration` passed to `activate`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Settings for the bridge layer itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct BridgeSettings {
    /// Prefix of every dispatch diagnostic (`<service>:exec(<service>.<op>)`).
    /// Dispatchers address the native side by their class settings below.
    pub service_name: String,
    /// Name of the local notification broadcast on `activate`.
    pub configuration_event: String,
    /// Buffered notifications per subscriber before the oldest is dropped.
    pub notification_capacity: usize,
    /// JNI class exposing `static void execute(String, String)`.
    pub android_dispatcher_class: String,
    /// Objective-C class answering `+executeAction:arguments:`.
    pub ios_dispatcher_class: String,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            service_name: "AppMetrica".into(),
            configuration_event: "metricaconfigurationupdate".into(),
            notification_capacity: 16,
            android_dispatcher_class: "com/yandex/metrica/plugin/cordova/AppMetricaBridge".into(),
            ios_dispatcher_class: "YMMAppMetricaBridge".into(),
        }
    }
}

impl BridgeSettings {
    /// Parse settings from a JSON document. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from `path`, falling back to defaults if the file does
    /// not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        match std::fs::read_to_string(path.as_ref()) {
            Ok(json) => Self::from_json(&json),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Persist settings as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

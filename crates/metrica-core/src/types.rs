// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Data-transfer types carried across the native boundary.
//
// Field names are the v1 configuration contract (see `CONFIGURATION_CONTRACT`).
// Unset optional fields are omitted from the serialised record because the
// native side checks key presence before reading a value.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::lenient;

/// Identifier of the activation configuration shape this crate speaks.
///
/// v1 uses `handleFirstActivationAsUpdateEnabled`, `trackLocationEnabled`,
/// `reportCrashesEnabled`, `loggingEnabled` and `preloadInfo.additionalInfo`.
/// The renamed v2 field set is not accepted.
pub const CONFIGURATION_CONTRACT: &str = "appmetrica-config/v1";

/// Free-form event parameters, forwarded as a JSON object.
pub type EventParams = serde_json::Map<String, serde_json::Value>;

/// Activation-time settings for the native analytics component.
///
/// Only `api_key` is required. Nothing here is validated; the native side
/// applies its own defaults and limits (e.g. a session timeout floor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Configuration {
    /// GUID-like API key from the analytics web interface.
    pub api_key: String,
    /// Treat the first launch with the SDK as an update rather than an install.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle_first_activation_as_update_enabled: Option<bool>,
    /// Allow the SDK to attach device location to reports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_location_enabled: Option<bool>,
    /// Session timeout in seconds. Fractional values are truncated.
    #[serde(
        default,
        deserialize_with = "lenient::truncated_u32",
        skip_serializing_if = "Option::is_none"
    )]
    pub session_timeout: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_crashes_enabled: Option<bool>,
    /// Custom application version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging_enabled: Option<bool>,
    /// Location to report until the device provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    /// Pre-installed app tracking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preload_info: Option<PreloadInfo>,
}

impl Configuration {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            handle_first_activation_as_update_enabled: None,
            track_location_enabled: None,
            session_timeout: None,
            report_crashes_enabled: None,
            app_version: None,
            logging_enabled: None,
            location: None,
            preload_info: None,
        }
    }

    pub fn with_first_activation_as_update(mut self, enabled: bool) -> Self {
        self.handle_first_activation_as_update_enabled = Some(enabled);
        self
    }

    pub fn with_track_location(mut self, enabled: bool) -> Self {
        self.track_location_enabled = Some(enabled);
        self
    }

    pub fn with_session_timeout(mut self, seconds: u32) -> Self {
        self.session_timeout = Some(seconds);
        self
    }

    pub fn with_report_crashes(mut self, enabled: bool) -> Self {
        self.report_crashes_enabled = Some(enabled);
        self
    }

    pub fn with_app_version(mut self, version: impl Into<String>) -> Self {
        self.app_version = Some(version.into());
        self
    }

    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.logging_enabled = Some(enabled);
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_preload_info(mut self, info: PreloadInfo) -> Self {
        self.preload_info = Some(info);
        self
    }
}

/// A device position supplied by the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
    /// Horizontal accuracy in meters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    /// Vertical accuracy in meters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical_accuracy: Option<f64>,
    /// Movement course in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<f64>,
    /// Movement speed in km/h.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    /// Unix time stamp in seconds. Fractional values are truncated.
    #[serde(
        default,
        deserialize_with = "lenient::truncated_i64",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<i64>,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude: None,
            accuracy: None,
            vertical_accuracy: None,
            course: None,
            speed: None,
            timestamp: None,
        }
    }

    pub fn with_altitude(mut self, meters: f64) -> Self {
        self.altitude = Some(meters);
        self
    }

    pub fn with_accuracy(mut self, horizontal: f64, vertical: f64) -> Self {
        self.accuracy = Some(horizontal);
        self.vertical_accuracy = Some(vertical);
        self
    }

    pub fn with_movement(mut self, course: f64, speed: f64) -> Self {
        self.course = Some(course);
        self.speed = Some(speed);
        self
    }

    pub fn with_timestamp(mut self, unix_seconds: i64) -> Self {
        self.timestamp = Some(unix_seconds);
        self
    }

    /// The timestamp as a UTC instant, if set and in range.
    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
    }
}

/// Tracking data for apps shipped pre-installed on devices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreloadInfo {
    /// Identifier of the tracker.
    pub tracking_id: String,
    /// Extra key/value pairs. Number and boolean values are kept as text.
    #[serde(
        default,
        deserialize_with = "lenient::scalar_strings",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_info: Option<BTreeMap<String, String>>,
}

impl PreloadInfo {
    pub fn new(tracking_id: impl Into<String>) -> Self {
        Self {
            tracking_id: tracking_id.into(),
            additional_info: None,
        }
    }

    /// Add one key/value pair to the additional info.
    pub fn with_info(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.additional_info
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }
}

/// A named event with optional parameters. Sent once, then dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub name: String,
    pub params: Option<EventParams>,
}

impl Event {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: None,
        }
    }

    pub fn with_params(mut self, params: EventParams) -> Self {
        self.params = Some(params);
        self
    }
}

/// A named error with an optional free-text reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    pub name: String,
    pub reason: Option<String>,
}

impl ErrorReport {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: None,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

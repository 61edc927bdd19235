// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Typed commands and their positional argument encoding.
//
// The client encodes a `Command` into a `NativeCall`; a host receiving
// `(name, args)` decodes it back. Both directions live here so the argument
// order for each operation is written down once.

use metrica_core::error::{MetricaError, Result};
use metrica_core::lenient;
use metrica_core::{Configuration, ErrorReport, Event, Location, Operation};
use serde_json::Value;

use crate::traits::NativeCall;

static NULL: Value = Value::Null;

/// A fully-typed native operation with its arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Activate(Configuration),
    ReportEvent(Event),
    ReportError(ErrorReport),
    /// `None` clears a previously set custom version.
    SetCustomAppVersion(Option<String>),
    /// `None` drops the custom location.
    SetLocation(Option<Location>),
    SetTrackLocationEnabled(bool),
    /// `value: None` removes `key`.
    SetEnvironmentValue { key: String, value: Option<String> },
    SetSessionTimeout(u32),
    SetReportCrashesEnabled(bool),
    SetLoggingEnabled,
    SetCollectInstalledAppsEnabled(bool),
}

impl Command {
    pub fn operation(&self) -> Operation {
        match self {
            Self::Activate(_) => Operation::Activate,
            Self::ReportEvent(_) => Operation::ReportEvent,
            Self::ReportError(_) => Operation::ReportError,
            Self::SetCustomAppVersion(_) => Operation::SetCustomAppVersion,
            Self::SetLocation(_) => Operation::SetLocation,
            Self::SetTrackLocationEnabled(_) => Operation::SetTrackLocationEnabled,
            Self::SetEnvironmentValue { .. } => Operation::SetEnvironmentValue,
            Self::SetSessionTimeout(_) => Operation::SetSessionTimeout,
            Self::SetReportCrashesEnabled(_) => Operation::SetReportCrashesEnabled,
            Self::SetLoggingEnabled => Operation::SetLoggingEnabled,
            Self::SetCollectInstalledAppsEnabled(_) => Operation::SetCollectInstalledAppsEnabled,
        }
    }

    /// Package the arguments in the order the native operation reads them.
    pub fn encode(&self) -> Result<NativeCall> {
        let args = match self {
            Self::Activate(config) => vec![serde_json::to_value(config)?],
            Self::ReportEvent(event) => vec![
                Value::String(event.name.clone()),
                event.params.clone().map_or(Value::Null, Value::Object),
            ],
            Self::ReportError(report) => vec![
                Value::String(report.name.clone()),
                optional_string(report.reason.as_deref()),
            ],
            Self::SetCustomAppVersion(version) => vec![optional_string(version.as_deref())],
            Self::SetLocation(location) => vec![match location {
                Some(location) => serde_json::to_value(location)?,
                None => Value::Null,
            }],
            Self::SetTrackLocationEnabled(enabled)
            | Self::SetReportCrashesEnabled(enabled)
            | Self::SetCollectInstalledAppsEnabled(enabled) => vec![Value::Bool(*enabled)],
            Self::SetEnvironmentValue { key, value } => {
                vec![Value::String(key.clone()), optional_string(value.as_deref())]
            }
            Self::SetSessionTimeout(seconds) => vec![Value::from(*seconds)],
            Self::SetLoggingEnabled => Vec::new(),
        };
        Ok(NativeCall::new(self.operation(), args))
    }

    /// Decode a call addressed by name, as a host receives it.
    pub fn decode_named(name: &str, args: &[Value]) -> Result<Self> {
        Self::decode(name.parse()?, args)
    }

    /// Decode positional `args` for `operation`.
    ///
    /// Missing trailing arguments read as null. Event parameters and error
    /// reasons of the wrong shape read as absent; anything else of the wrong
    /// shape is an error.
    pub fn decode(operation: Operation, args: &[Value]) -> Result<Self> {
        let arg = |i: usize| args.get(i).unwrap_or(&NULL);
        let op = operation.as_str();

        let command = match operation {
            Operation::Activate => {
                if !arg(0).is_object() {
                    return Err(malformed(op, 0, "must be a configuration object"));
                }
                Self::Activate(serde_json::from_value(arg(0).clone())?)
            }
            Operation::ReportEvent => Self::ReportEvent(Event {
                name: required_string(op, 0, arg(0))?,
                params: arg(1).as_object().cloned(),
            }),
            Operation::ReportError => Self::ReportError(ErrorReport {
                name: required_string(op, 0, arg(0))?,
                reason: arg(1).as_str().map(str::to_string),
            }),
            Operation::SetCustomAppVersion => {
                Self::SetCustomAppVersion(nullable_string(op, 0, arg(0))?)
            }
            Operation::SetLocation => Self::SetLocation(match arg(0) {
                Value::Null => None,
                Value::Object(_) => Some(serde_json::from_value(arg(0).clone())?),
                _ => return Err(malformed(op, 0, "must be a location object or null")),
            }),
            Operation::SetTrackLocationEnabled => {
                Self::SetTrackLocationEnabled(required_bool(op, 0, arg(0))?)
            }
            Operation::SetEnvironmentValue => Self::SetEnvironmentValue {
                key: required_string(op, 0, arg(0))?,
                value: nullable_string(op, 1, arg(1))?,
            },
            Operation::SetSessionTimeout => {
                let seconds = lenient::non_negative_u32(arg(0))
                    .ok_or_else(|| malformed(op, 0, "must be a non-negative number"))?;
                Self::SetSessionTimeout(seconds)
            }
            Operation::SetReportCrashesEnabled => {
                Self::SetReportCrashesEnabled(required_bool(op, 0, arg(0))?)
            }
            Operation::SetLoggingEnabled => Self::SetLoggingEnabled,
            Operation::SetCollectInstalledAppsEnabled => {
                Self::SetCollectInstalledAppsEnabled(required_bool(op, 0, arg(0))?)
            }
        };
        Ok(command)
    }
}

fn optional_string(value: Option<&str>) -> Value {
    value.map_or(Value::Null, |s| Value::String(s.to_string()))
}

fn malformed(operation: &'static str, position: usize, expected: &'static str) -> MetricaError {
    MetricaError::MalformedArgument {
        operation,
        position,
        expected,
    }
}

fn required_string(op: &'static str, position: usize, value: &Value) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| malformed(op, position, "must be a string"))
}

fn nullable_string(op: &'static str, position: usize, value: &Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        _ => Err(malformed(op, position, "must be a string or null")),
    }
}

fn required_bool(op: &'static str, position: usize, value: &Value) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| malformed(op, position, "must be a boolean"))
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The fixed set of operations the native analytics component understands.
//
// Names are the wire contract: they are what the host dispatcher looks up, so
// they must match the native plugin's method names byte for byte.

use std::fmt;
use std::str::FromStr;

use crate::error::MetricaError;

/// A named native operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Activate,
    ReportEvent,
    ReportError,
    SetCustomAppVersion,
    SetLocation,
    SetTrackLocationEnabled,
    SetEnvironmentValue,
    SetSessionTimeout,
    SetReportCrashesEnabled,
    SetLoggingEnabled,
    /// Android only; iOS hosts ignore it.
    SetCollectInstalledAppsEnabled,
}

impl Operation {
    /// Every operation, in declaration order.
    pub const ALL: [Operation; 11] = [
        Self::Activate,
        Self::ReportEvent,
        Self::ReportError,
        Self::SetCustomAppVersion,
        Self::SetLocation,
        Self::SetTrackLocationEnabled,
        Self::SetEnvironmentValue,
        Self::SetSessionTimeout,
        Self::SetReportCrashesEnabled,
        Self::SetLoggingEnabled,
        Self::SetCollectInstalledAppsEnabled,
    ];

    /// Name the native dispatcher resolves.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Activate => "activate",
            Self::ReportEvent => "reportEvent",
            Self::ReportError => "reportError",
            Self::SetCustomAppVersion => "setCustomAppVersion",
            Self::SetLocation => "setLocation",
            Self::SetTrackLocationEnabled => "setTrackLocationEnabled",
            Self::SetEnvironmentValue => "setEnvironmentValue",
            Self::SetSessionTimeout => "setSessionTimeout",
            Self::SetReportCrashesEnabled => "setReportCrashesEnabled",
            Self::SetLoggingEnabled => "setLoggingEnabled",
            Self::SetCollectInstalledAppsEnabled => "setCollectInstalledAppsEnabled",
        }
    }

    /// Number of positional arguments the native side reads.
    pub fn arity(&self) -> usize {
        match self {
            Self::SetLoggingEnabled => 0,
            Self::ReportEvent | Self::ReportError | Self::SetEnvironmentValue => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = MetricaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| MetricaError::UnknownOperation(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_parse_back() {
        for op in Operation::ALL {
            assert_eq!(op.as_str().parse::<Operation>().unwrap(), op);
        }
    }

    #[test]
    fn alias_is_not_a_native_name() {
        let err = "setLocationTracking".parse::<Operation>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown action: setLocationTracking");
    }

    #[test]
    fn logging_takes_no_arguments() {
        assert_eq!(Operation::SetLoggingEnabled.arity(), 0);
        assert_eq!(Operation::ReportEvent.arity(), 2);
        assert_eq!(Operation::Activate.arity(), 1);
    }
}

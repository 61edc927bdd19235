// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Typed client for the native analytics component.
//
// Every operation is fire-and-forget: it packages its arguments, hands them to
// the dispatcher and returns. Failures are reported once, as a warning, by
// `log_and_drop` and never reach the caller.

use std::sync::Arc;

use metrica_core::{
    BridgeSettings, Configuration, ErrorReport, Event, EventParams, Location,
};
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::command::Command;
use crate::notify::{ConfigurationNotifier, ConfigurationUpdated};
use crate::traits::{DispatchOutcome, NativeCall, NativeDispatch};

/// The only sanctioned handling of a dispatch outcome: success is ignored,
/// failure becomes a diagnostic naming the operation.
pub fn log_and_drop(service: &str, operation: &str, outcome: DispatchOutcome) {
    if let Err(e) = outcome {
        warn!(
            operation = %operation,
            error = %e,
            "{service}:exec({service}.{operation}): {e}"
        );
    }
}

/// Handle for reporting to the native analytics component.
///
/// Cheap to clone; clones share the dispatcher and the notification hub.
#[derive(Clone)]
pub struct MetricaClient {
    dispatcher: Arc<dyn NativeDispatch>,
    notifier: ConfigurationNotifier,
    service: Arc<str>,
}

impl MetricaClient {
    pub fn new(dispatcher: Arc<dyn NativeDispatch>, settings: &BridgeSettings) -> Self {
        Self {
            dispatcher,
            notifier: ConfigurationNotifier::new(
                settings.configuration_event.clone(),
                settings.notification_capacity,
            ),
            service: Arc::from(settings.service_name.as_str()),
        }
    }

    /// Client bound to the dispatcher for the compile target.
    pub fn for_platform(settings: &BridgeSettings) -> Self {
        Self::new(crate::platform_dispatcher(settings), settings)
    }

    pub fn platform_name(&self) -> &str {
        self.dispatcher.platform_name()
    }

    /// Receive a [`ConfigurationUpdated`] for every subsequent `activate`.
    pub fn subscribe(&self) -> broadcast::Receiver<ConfigurationUpdated> {
        self.notifier.subscribe()
    }

    // -- Operations -----------------------------------------------------------

    /// Activate the SDK, then announce `config` locally.
    ///
    /// The notification is published whatever the native outcome.
    pub fn activate(&self, config: &Configuration) {
        self.send(Command::Activate(config.clone()));
        self.notifier.publish(config.clone());
    }

    pub fn report_event(&self, name: impl Into<String>, params: Option<EventParams>) {
        self.send(Command::ReportEvent(Event {
            name: name.into(),
            params,
        }));
    }

    pub fn report_error(&self, name: impl Into<String>, reason: Option<&str>) {
        self.send(Command::ReportError(ErrorReport {
            name: name.into(),
            reason: reason.map(str::to_string),
        }));
    }

    pub fn set_custom_app_version(&self, version: Option<&str>) {
        self.send(Command::SetCustomAppVersion(version.map(str::to_string)));
    }

    pub fn set_location(&self, location: Option<&Location>) {
        self.send(Command::SetLocation(location.cloned()));
    }

    pub fn set_track_location_enabled(&self, enabled: bool) {
        self.send(Command::SetTrackLocationEnabled(enabled));
    }

    /// Same native operation as [`set_track_location_enabled`](Self::set_track_location_enabled).
    pub fn set_location_tracking(&self, enabled: bool) {
        self.set_track_location_enabled(enabled);
    }

    /// Attach `key` to future crash reports; `None` removes it.
    pub fn set_environment_value(&self, key: impl Into<String>, value: Option<&str>) {
        self.send(Command::SetEnvironmentValue {
            key: key.into(),
            value: value.map(str::to_string),
        });
    }

    pub fn set_session_timeout(&self, seconds: u32) {
        self.send(Command::SetSessionTimeout(seconds));
    }

    pub fn set_report_crashes_enabled(&self, enabled: bool) {
        self.send(Command::SetReportCrashesEnabled(enabled));
    }

    pub fn set_logging_enabled(&self) {
        self.send(Command::SetLoggingEnabled);
    }

    /// Android only.
    pub fn set_collect_installed_apps_enabled(&self, enabled: bool) {
        self.send(Command::SetCollectInstalledAppsEnabled(enabled));
    }

    // -- Dispatch ---------------------------------------------------------------

    fn send(&self, command: Command) {
        let operation = command.operation().as_str();
        match command.encode() {
            Ok(call) => self.invoke(call),
            Err(e) => log_and_drop(&self.service, operation, Err(e)),
        }
    }

    /// Hand `call` to the dispatcher with a log-and-drop completion.
    fn invoke(&self, call: NativeCall) {
        debug!(operation = call.name(), args = call.args.len(), "dispatching");
        let service = Arc::clone(&self.service);
        let operation = call.name();
        self.dispatcher.dispatch(
            call,
            Box::new(move |outcome| log_and_drop(&service, operation, outcome)),
        );
    }
}

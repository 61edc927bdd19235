// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Receiving end of the native boundary.
//
// `PluginHost` decodes `(name, args)` into a `Command` and forwards it to an
// `AnalyticsSdk`. It also owns the small amount of plugin state the SDK
// needs: whether activation has happened and whether the hosting activity is
// in the foreground, so app-open and session resume/pause are reported at
// the right moments.

use std::sync::{Mutex, MutexGuard, PoisonError};

use metrica_core::error::Result;
use metrica_core::{Configuration, ErrorReport, Event, Location};
use serde_json::Value;
use tracing::{debug, info};

use crate::command::Command;
use crate::traits::{Completion, NativeCall, NativeDispatch};

/// Entry points of the native analytics SDK the host forwards to.
pub trait AnalyticsSdk: Send {
    fn activate(&mut self, config: &Configuration);
    fn report_app_open(&mut self);
    fn resume_session(&mut self);
    fn pause_session(&mut self);
    fn report_event(&mut self, event: &Event);
    fn report_error(&mut self, report: &ErrorReport);
    fn set_custom_app_version(&mut self, version: Option<&str>);
    fn set_location(&mut self, location: Option<&Location>);
    fn set_track_location_enabled(&mut self, enabled: bool);
    fn set_environment_value(&mut self, key: &str, value: Option<&str>);
    fn set_session_timeout(&mut self, seconds: u32);
    fn set_report_crashes_enabled(&mut self, enabled: bool);
    fn set_logging_enabled(&mut self);
    fn set_collect_installed_apps_enabled(&mut self, enabled: bool);
}

struct HostState<S> {
    sdk: S,
    activated: bool,
    paused: bool,
}

/// In-process plugin host wrapping an [`AnalyticsSdk`].
///
/// Commands and lifecycle callbacks are serialised through one lock, so the
/// SDK sees them in arrival order.
pub struct PluginHost<S> {
    state: Mutex<HostState<S>>,
}

impl<S: AnalyticsSdk> PluginHost<S> {
    /// The hosting activity starts out paused until `on_resume`.
    pub fn new(sdk: S) -> Self {
        Self {
            state: Mutex::new(HostState {
                sdk,
                activated: false,
                paused: true,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, HostState<S>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_activated(&self) -> bool {
        self.state().activated
    }

    /// Execute a call as it arrives from a foreign runtime: an action name and
    /// a JSON-encoded argument array.
    pub fn execute(&self, action: &str, args_json: &str) -> Result<()> {
        let args: Vec<Value> = serde_json::from_str(args_json)?;
        self.apply(Command::decode_named(action, &args)?);
        Ok(())
    }

    /// Forward a decoded command to the SDK.
    pub fn apply(&self, command: Command) {
        let mut state = self.state();
        debug!(operation = %command.operation(), "host applying command");

        match command {
            Command::Activate(config) => {
                state.sdk.activate(&config);
                if !state.activated {
                    info!("analytics activated");
                    state.sdk.report_app_open();
                    if !state.paused {
                        state.sdk.resume_session();
                    }
                }
                state.activated = true;
            }
            Command::ReportEvent(event) => state.sdk.report_event(&event),
            Command::ReportError(report) => state.sdk.report_error(&report),
            Command::SetCustomAppVersion(version) => {
                state.sdk.set_custom_app_version(version.as_deref())
            }
            Command::SetLocation(location) => state.sdk.set_location(location.as_ref()),
            Command::SetTrackLocationEnabled(enabled) => {
                state.sdk.set_track_location_enabled(enabled)
            }
            Command::SetEnvironmentValue { key, value } => {
                state.sdk.set_environment_value(&key, value.as_deref())
            }
            Command::SetSessionTimeout(seconds) => state.sdk.set_session_timeout(seconds),
            Command::SetReportCrashesEnabled(enabled) => {
                state.sdk.set_report_crashes_enabled(enabled)
            }
            Command::SetLoggingEnabled => state.sdk.set_logging_enabled(),
            Command::SetCollectInstalledAppsEnabled(enabled) => {
                state.sdk.set_collect_installed_apps_enabled(enabled)
            }
        }
    }

    // -- Activity lifecycle -----------------------------------------------------

    pub fn on_pause(&self) {
        let mut state = self.state();
        state.paused = true;
        if state.activated {
            state.sdk.pause_session();
        }
    }

    pub fn on_resume(&self) {
        let mut state = self.state();
        state.paused = false;
        if state.activated {
            state.sdk.resume_session();
        }
    }

    /// The app was reopened through a new intent or URL.
    pub fn on_new_intent(&self) {
        let mut state = self.state();
        if state.activated {
            state.sdk.report_app_open();
        }
    }

    /// Run `f` against the wrapped SDK.
    pub fn with_sdk<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        f(&mut self.state().sdk)
    }
}

impl<S: AnalyticsSdk> NativeDispatch for PluginHost<S> {
    fn platform_name(&self) -> &str {
        "In-process"
    }

    fn dispatch(&self, call: NativeCall, on_complete: Completion) {
        let outcome = Command::decode(call.operation, &call.args).map(|command| self.apply(command));
        on_complete(outcome);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::client::MetricaClient;
    use metrica_core::BridgeSettings;
    use metrica_core::error::MetricaError;

    /// Records SDK entry points as short strings.
    #[derive(Default)]
    struct Journal(Vec<String>);

    impl AnalyticsSdk for Journal {
        fn activate(&mut self, config: &Configuration) {
            self.0.push(format!("activate {}", config.api_key));
        }
        fn report_app_open(&mut self) {
            self.0.push("app_open".into());
        }
        fn resume_session(&mut self) {
            self.0.push("resume".into());
        }
        fn pause_session(&mut self) {
            self.0.push("pause".into());
        }
        fn report_event(&mut self, event: &Event) {
            self.0.push(format!("event {} {:?}", event.name, event.params));
        }
        fn report_error(&mut self, report: &ErrorReport) {
            self.0.push(format!("error {} {:?}", report.name, report.reason));
        }
        fn set_custom_app_version(&mut self, version: Option<&str>) {
            self.0.push(format!("app_version {version:?}"));
        }
        fn set_location(&mut self, location: Option<&Location>) {
            self.0.push(format!("location {:?}", location.map(|l| l.latitude)));
        }
        fn set_track_location_enabled(&mut self, enabled: bool) {
            self.0.push(format!("track_location {enabled}"));
        }
        fn set_environment_value(&mut self, key: &str, value: Option<&str>) {
            self.0.push(format!("env {key} {value:?}"));
        }
        fn set_session_timeout(&mut self, seconds: u32) {
            self.0.push(format!("timeout {seconds}"));
        }
        fn set_report_crashes_enabled(&mut self, enabled: bool) {
            self.0.push(format!("crashes {enabled}"));
        }
        fn set_logging_enabled(&mut self) {
            self.0.push("logging".into());
        }
        fn set_collect_installed_apps_enabled(&mut self, enabled: bool) {
            self.0.push(format!("installed_apps {enabled}"));
        }
    }

    fn journal(host: &PluginHost<Journal>) -> Vec<String> {
        host.with_sdk(|sdk| sdk.0.clone())
    }

    #[test]
    fn first_activation_in_background_reports_app_open_only() {
        let host = PluginHost::new(Journal::default());
        host.execute("activate", r#"[{"apiKey":"k"}]"#).unwrap();

        assert!(host.is_activated());
        assert_eq!(journal(&host), ["activate k", "app_open"]);
    }

    #[test]
    fn first_activation_in_foreground_resumes_session() {
        let host = PluginHost::new(Journal::default());
        host.on_resume();
        host.execute("activate", r#"[{"apiKey":"k"}]"#).unwrap();
        host.execute("activate", r#"[{"apiKey":"k2"}]"#).unwrap();

        assert_eq!(journal(&host), ["activate k", "app_open", "resume", "activate k2"]);
    }

    #[test]
    fn lifecycle_is_ignored_before_activation() {
        let host = PluginHost::new(Journal::default());
        host.on_resume();
        host.on_new_intent();
        host.on_pause();
        assert!(journal(&host).is_empty());

        host.execute("activate", r#"[{"apiKey":"k"}]"#).unwrap();
        host.on_resume();
        host.on_new_intent();
        host.on_pause();
        assert_eq!(
            journal(&host),
            ["activate k", "app_open", "resume", "app_open", "pause"]
        );
    }

    #[test]
    fn unknown_action_is_an_error() {
        let host = PluginHost::new(Journal::default());
        let err = host.execute("reportRevenue", "[]").unwrap_err();
        assert!(matches!(err, MetricaError::UnknownOperation(name) if name == "reportRevenue"));
    }

    #[test]
    fn client_traffic_reaches_the_sdk() {
        let host = Arc::new(PluginHost::new(Journal::default()));
        let client = MetricaClient::new(host.clone(), &BridgeSettings::default());

        client.report_event("Test event", None);
        client.report_error("Test error", Some("Error reason"));
        client.set_environment_value("k", None);
        client.set_location(None);
        client.set_session_timeout(30);
        client.set_logging_enabled();

        assert_eq!(
            journal(&host),
            [
                "event Test event None",
                "error Test error Some(\"Error reason\")",
                "env k None",
                "location None",
                "timeout 30",
                "logging",
            ]
        );
    }

    #[test]
    fn fractional_numbers_and_scalar_info_are_accepted() {
        let host = PluginHost::new(Journal::default());
        host.execute("setSessionTimeout", "[30.0]").unwrap();
        host.execute(
            "activate",
            r#"[{"apiKey":"k",
                "location":{"latitude":53.9,"longitude":27.5,"timestamp":1490352300.5},
                "preloadInfo":{"trackingId":"t","additionalInfo":{"n":1}}}]"#,
        )
        .unwrap();
        assert_eq!(journal(&host), ["timeout 30", "activate k", "app_open"]);
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Demo harness: the sample app's buttons and checkbox wired to the client,
// plus a device geolocation query that never touches the bridge.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use metrica_bridge::MetricaClient;
use metrica_bridge::recording::RecordingDispatch;
use metrica_core::{BridgeSettings, Configuration, EventParams, Location, Operation};
use serde_json::{Value, json};

const DEMO_API_KEY: &str = "5012c3cc-20a4-4dac-92d1-83ebc27c0fa9";

// ---------------------------------------------------------------------------
// Platform geolocation
// ---------------------------------------------------------------------------

struct Coordinates {
    latitude: f64,
    longitude: f64,
    altitude: Option<f64>,
    accuracy: f64,
    altitude_accuracy: Option<f64>,
    heading: Option<f64>,
    speed: Option<f64>,
}

struct Position {
    coords: Coordinates,
    /// Milliseconds since the Unix epoch.
    timestamp: i64,
}

struct PositionError {
    code: u16,
    message: String,
}

type OnPosition = Box<dyn FnOnce(Position)>;
type OnPositionError = Box<dyn FnOnce(PositionError)>;

/// Asynchronous current-position query; exactly one callback fires.
trait Geolocation {
    fn current_position(&self, on_success: OnPosition, on_error: OnPositionError);
}

/// Holds the outstanding request until the test resolves it.
#[derive(Default)]
struct FakeGeolocation {
    pending: RefCell<Option<(OnPosition, OnPositionError)>>,
}

impl FakeGeolocation {
    fn resolve(&self, result: Result<Position, PositionError>) {
        let (on_success, on_error) = self
            .pending
            .borrow_mut()
            .take()
            .expect("no outstanding position request");
        match result {
            Ok(position) => on_success(position),
            Err(error) => on_error(error),
        }
    }

    fn has_pending(&self) -> bool {
        self.pending.borrow().is_some()
    }
}

impl Geolocation for FakeGeolocation {
    fn current_position(&self, on_success: OnPosition, on_error: OnPositionError) {
        *self.pending.borrow_mut() = Some((on_success, on_error));
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

fn or_null(value: Option<f64>) -> String {
    value.map_or_else(|| "null".to_string(), |v| v.to_string())
}

struct DemoHarness<G> {
    client: MetricaClient,
    geolocation: G,
    configuration: Configuration,
    alerts: Rc<RefCell<Vec<String>>>,
}

impl<G: Geolocation> DemoHarness<G> {
    fn new(client: MetricaClient, geolocation: G) -> Self {
        Self {
            client,
            geolocation,
            configuration: Configuration::new(DEMO_API_KEY),
            alerts: Rc::default(),
        }
    }

    fn on_device_ready(&self) {
        self.client.activate(&self.configuration);
    }

    /// A click on the control with id `control`; `checked` is the checkbox
    /// state after the click and is ignored for buttons.
    fn click(&self, control: &str, checked: bool) {
        match control {
            "reportEventBtn" => self.client.report_event("Test event", None),
            "reportEventWithParametersBtn" => {
                let mut params = EventParams::new();
                params.insert("foo".into(), json!("bar"));
                self.client.report_event("Test event", Some(params));
            }
            "reportErrorBtn" => self.client.report_error("Test error", Some("Error reason")),
            "setMinskBtn" => self.client.set_location(Some(&minsk())),
            "setMoscowBtn" => self.client.set_location(Some(
                &Location::new(55.734417, 37.588029)
                    .with_altitude(157.0)
                    .with_accuracy(45.0, 25.0)
                    .with_movement(42.0, 1.0)
                    .with_timestamp(1_490_352_342),
            )),
            "locationTracking" => self.client.set_location_tracking(checked),
            "requestLocation" => self.request_location(),
            _ => {}
        }
    }

    fn request_location(&self) {
        let on_success = {
            let alerts = Rc::clone(&self.alerts);
            Box::new(move |position: Position| {
                let c = &position.coords;
                alerts.borrow_mut().push(format!(
                    "Latitude: {}\nLongitude: {}\nAltitude: {}\nAccuracy: {}\n\
                     Altitude Accuracy: {}\nHeading: {}\nSpeed: {}\nTimestamp: {}\n",
                    c.latitude,
                    c.longitude,
                    or_null(c.altitude),
                    c.accuracy,
                    or_null(c.altitude_accuracy),
                    or_null(c.heading),
                    or_null(c.speed),
                    position.timestamp,
                ));
            })
        };
        let on_error = {
            let alerts = Rc::clone(&self.alerts);
            Box::new(move |error: PositionError| {
                alerts
                    .borrow_mut()
                    .push(format!("code: {}\nmessage: {}\n", error.code, error.message));
            })
        };
        self.geolocation.current_position(on_success, on_error);
    }

    fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }
}

fn minsk() -> Location {
    Location::new(53.890651, 27.525408)
        .with_altitude(224.0)
        .with_accuracy(30.0, 10.0)
        .with_movement(23.0, 2.0)
        .with_timestamp(1_490_352_300)
}

fn harness() -> (DemoHarness<FakeGeolocation>, RecordingDispatch) {
    let recorder = RecordingDispatch::new();
    let client = MetricaClient::new(Arc::new(recorder.clone()), &BridgeSettings::default());
    let harness = DemoHarness::new(client, FakeGeolocation::default());
    harness.on_device_ready();
    (harness, recorder)
}

fn last_call(recorder: &RecordingDispatch) -> (Operation, Vec<Value>) {
    let call = recorder.calls().pop().expect("no calls recorded");
    (call.operation, call.args)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn device_ready_activates_and_announces_configuration() {
    let recorder = RecordingDispatch::new();
    let client = MetricaClient::new(Arc::new(recorder.clone()), &BridgeSettings::default());
    let mut updates = client.subscribe();
    let harness = DemoHarness::new(client, FakeGeolocation::default());

    harness.on_device_ready();

    assert_eq!(
        last_call(&recorder),
        (Operation::Activate, vec![json!({ "apiKey": DEMO_API_KEY })])
    );
    assert_eq!(updates.try_recv().unwrap().config.api_key, DEMO_API_KEY);
}

#[test]
fn event_buttons() {
    let (harness, recorder) = harness();

    harness.click("reportEventBtn", false);
    assert_eq!(
        last_call(&recorder),
        (Operation::ReportEvent, vec![json!("Test event"), Value::Null])
    );

    harness.click("reportEventWithParametersBtn", false);
    assert_eq!(
        last_call(&recorder),
        (
            Operation::ReportEvent,
            vec![json!("Test event"), json!({ "foo": "bar" })]
        )
    );
}

#[test]
fn error_button() {
    let (harness, recorder) = harness();
    harness.click("reportErrorBtn", false);
    assert_eq!(
        last_call(&recorder),
        (
            Operation::ReportError,
            vec![json!("Test error"), json!("Error reason")]
        )
    );
}

#[test]
fn minsk_button_sends_full_location() {
    let (harness, recorder) = harness();
    harness.click("setMinskBtn", false);

    let (operation, args) = last_call(&recorder);
    assert_eq!(operation, Operation::SetLocation);
    assert_eq!(args.len(), 1);
    let sent: Location = serde_json::from_value(args[0].clone()).unwrap();
    assert_eq!(sent, minsk());
}

#[test]
fn moscow_button_sends_its_own_coordinates() {
    let (harness, recorder) = harness();
    harness.click("setMoscowBtn", false);

    let (_, args) = last_call(&recorder);
    assert_eq!(args[0]["latitude"], json!(55.734417));
    assert_eq!(args[0]["timestamp"], json!(1_490_352_342));
}

#[test]
fn tracking_checkbox_follows_checked_state() {
    let (harness, recorder) = harness();

    harness.click("locationTracking", true);
    assert_eq!(
        last_call(&recorder),
        (Operation::SetTrackLocationEnabled, vec![json!(true)])
    );

    harness.click("locationTracking", false);
    assert_eq!(
        last_call(&recorder),
        (Operation::SetTrackLocationEnabled, vec![json!(false)])
    );
}

#[test]
fn denied_location_request_alerts_without_bridge_call() {
    let (harness, recorder) = harness();
    let before = recorder.calls().len();

    harness.click("requestLocation", false);
    assert!(harness.geolocation.has_pending());
    assert!(harness.alerts().is_empty());

    harness.geolocation.resolve(Err(PositionError {
        code: 1,
        message: "User denied Geolocation".into(),
    }));

    let alerts = harness.alerts();
    assert_eq!(alerts.len(), 1);
    assert!(alerts[0].contains("code: 1"));
    assert!(alerts[0].contains("message: User denied Geolocation"));
    assert_eq!(recorder.calls().len(), before);
}

#[test]
fn granted_location_request_shows_position() {
    let (harness, recorder) = harness();
    let before = recorder.calls().len();

    harness.click("requestLocation", false);
    harness.geolocation.resolve(Ok(Position {
        coords: Coordinates {
            latitude: 53.9,
            longitude: 27.5,
            altitude: None,
            accuracy: 20.0,
            altitude_accuracy: None,
            heading: Some(90.0),
            speed: None,
        },
        timestamp: 1_490_352_300_000,
    }));

    let alerts = harness.alerts();
    assert_eq!(alerts.len(), 1);
    assert!(alerts[0].starts_with("Latitude: 53.9\nLongitude: 27.5\nAltitude: null\n"));
    assert!(alerts[0].contains("Heading: 90\n"));
    assert!(alerts[0].contains("Timestamp: 1490352300000\n"));
    assert!(!harness.geolocation.has_pending());
    assert_eq!(recorder.calls().len(), before);
}

#[test]
fn unknown_control_does_nothing() {
    let (harness, recorder) = harness();
    let before = recorder.calls().len();
    harness.click("doesNotExist", true);
    assert_eq!(recorder.calls().len(), before);
    assert!(harness.alerts().is_empty());
}

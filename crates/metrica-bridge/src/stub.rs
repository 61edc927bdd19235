// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub dispatcher for desktop/CI builds where no native analytics component
// exists.
//
// Every call completes with `PlatformUnavailable`, which the client turns into
// a single warning. Real implementations live in the `ios` and `android`
// modules.

use metrica_core::error::MetricaError;

use crate::traits::{Completion, NativeCall, NativeDispatch};

/// No-op dispatcher returned on non-mobile platforms.
pub struct StubDispatch;

impl NativeDispatch for StubDispatch {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }

    fn dispatch(&self, call: NativeCall, on_complete: Completion) {
        tracing::debug!(operation = call.name(), "native call reached stub dispatcher");
        on_complete(Err(MetricaError::PlatformUnavailable));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use metrica_core::Operation;
    use serde_json::json;

    use super::*;

    #[test]
    fn every_call_completes_as_platform_unavailable() {
        let (tx, rx) = mpsc::channel();
        StubDispatch.dispatch(
            NativeCall::new(Operation::ReportEvent, vec![json!("Test event"), json!(null)]),
            Box::new(move |outcome| tx.send(outcome).unwrap()),
        );
        assert!(matches!(
            rx.try_recv().unwrap(),
            Err(MetricaError::PlatformUnavailable)
        ));
    }

    #[test]
    fn reports_desktop_platform() {
        assert_eq!(StubDispatch.platform_name(), "Desktop (stub)");
    }
}

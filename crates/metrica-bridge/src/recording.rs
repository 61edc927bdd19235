// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory dispatcher that records every call instead of reaching a native
// side. Compiled for unit tests and behind the `testing` feature.

use std::sync::{Arc, Mutex, PoisonError};

use metrica_core::error::MetricaError;

use crate::traits::{Completion, NativeCall, NativeDispatch};

/// Records calls in arrival order and completes each one immediately.
#[derive(Debug, Clone, Default)]
pub struct RecordingDispatch {
    calls: Arc<Mutex<Vec<NativeCall>>>,
    failure: Option<String>,
}

impl RecordingDispatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder that completes every call with a dispatch failure carrying
    /// `description`.
    pub fn failing(description: impl Into<String>) -> Self {
        Self {
            calls: Arc::default(),
            failure: Some(description.into()),
        }
    }

    /// Snapshot of recorded calls.
    pub fn calls(&self) -> Vec<NativeCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl NativeDispatch for RecordingDispatch {
    fn platform_name(&self) -> &str {
        "Recording"
    }

    fn dispatch(&self, call: NativeCall, on_complete: Completion) {
        let operation = call.name();
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);

        let outcome = match &self.failure {
            Some(description) => Err(MetricaError::Dispatch {
                operation: operation.to_string(),
                description: description.clone(),
            }),
            None => Ok(()),
        };
        on_complete(outcome);
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic dispatch capability.
//
// The typed client knows nothing about JNI, Objective-C or in-process hosts.
// It hands a `NativeCall` to whatever `NativeDispatch` it was built with and
// supplies a completion that receives the outcome.

use metrica_core::Operation;
use metrica_core::error::Result;
use serde_json::Value;

/// One invocation crossing the native boundary.
///
/// `args` is positional and always complete: an unset optional argument is
/// present as `Value::Null`, never omitted.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeCall {
    pub operation: Operation,
    pub args: Vec<Value>,
}

impl NativeCall {
    pub fn new(operation: Operation, args: Vec<Value>) -> Self {
        Self { operation, args }
    }

    /// Name the native dispatcher resolves.
    pub fn name(&self) -> &'static str {
        self.operation.as_str()
    }

    /// Argument list as the JSON array the native side parses.
    pub fn args_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.args)?)
    }
}

/// Outcome of a native call. `Ok` carries nothing: no return values are
/// consumed from the native side.
pub type DispatchOutcome = Result<()>;

/// Continuation invoked exactly once with the outcome, possibly on another
/// thread and after `dispatch` has returned.
pub type Completion = Box<dyn FnOnce(DispatchOutcome) + Send + 'static>;

/// Executes named native operations.
///
/// Implementations must not block the caller for longer than it takes to hand
/// the call to the platform, and must invoke `on_complete` exactly once.
pub trait NativeDispatch: Send + Sync {
    /// Human-readable platform name (e.g. "Android", "iOS").
    fn platform_name(&self) -> &str;

    /// Hand `call` to the native side.
    fn dispatch(&self, call: NativeCall, on_complete: Completion);
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// iOS dispatcher via objc2.
//
// Requires compilation with the iOS SDK (Xcode). Each call becomes one class
// message send:
//
//     + (BOOL)executeAction:(NSString *)action arguments:(NSString *)json;
//
// on the configured dispatcher class, which runs the analytics SDK call and
// returns NO if it did not recognise the action. The selector is checked
// before sending, since messaging a class that lacks it raises an
// Objective-C exception.

#![cfg(target_os = "ios")]

use std::ffi::CString;

use objc2::runtime::{AnyClass, Bool};
use objc2::{msg_send, sel};
use objc2_foundation::NSString;

use metrica_core::error::{MetricaError, Result};

use crate::traits::{Completion, NativeCall, NativeDispatch};

/// iOS implementation of [`NativeDispatch`].
pub struct IosDispatch {
    class_name: String,
}

impl IosDispatch {
    pub fn new(class_name: &str) -> Self {
        Self {
            class_name: class_name.to_string(),
        }
    }

    fn dispatcher_class(&self) -> Result<&'static AnyClass> {
        let name = CString::new(self.class_name.as_str())
            .map_err(|_| MetricaError::Bridge("dispatcher class name contains NUL".into()))?;
        let class = AnyClass::get(&name).ok_or_else(|| {
            MetricaError::Bridge(format!("class {} is not registered", self.class_name))
        })?;
        if class.class_method(sel!(executeAction:arguments:)).is_none() {
            return Err(MetricaError::Bridge(format!(
                "{} does not implement +executeAction:arguments:",
                self.class_name
            )));
        }
        Ok(class)
    }

    fn execute(&self, call: &NativeCall) -> Result<()> {
        let class = self.dispatcher_class()?;
        let ns_action = NSString::from_str(call.name());
        let ns_args = NSString::from_str(&call.args_json()?);

        // SAFETY: the selector was verified to exist on `class` above, and
        // both arguments are live NSString instances for the duration of the
        // send.
        let handled: Bool =
            unsafe { msg_send![class, executeAction: &*ns_action, arguments: &*ns_args] };

        if handled.as_bool() {
            Ok(())
        } else {
            Err(MetricaError::Dispatch {
                operation: call.name().to_string(),
                description: format!("Unknown action: {}", call.name()),
            })
        }
    }
}

impl NativeDispatch for IosDispatch {
    fn platform_name(&self) -> &str {
        "iOS"
    }

    fn dispatch(&self, call: NativeCall, on_complete: Completion) {
        on_complete(self.execute(&call));
    }
}

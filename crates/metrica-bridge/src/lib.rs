// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! Metrica — typed bridge to the native analytics SDK.
//!
//! [`client::MetricaClient`] exposes one method per native operation and
//! forwards each call, fire-and-forget, through a [`traits::NativeDispatch`].
//! Dispatchers exist per platform: JNI on Android, Objective-C message sends
//! on iOS, and a stub everywhere else. [`host::PluginHost`] is the receiving
//! side for hosts that run the SDK adapter in-process.

pub mod client;
pub mod command;
pub mod host;
pub mod notify;
pub mod traits;

mod resolve;

/// In-memory [`NativeDispatch`] for tests; enable the `testing` feature.
#[cfg(any(test, feature = "testing"))]
pub mod recording;

#[cfg(target_os = "ios")]
pub mod ios;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(not(any(target_os = "ios", target_os = "android")))]
pub mod stub;

use std::sync::Arc;

use metrica_core::BridgeSettings;

pub use client::{MetricaClient, log_and_drop};
pub use notify::ConfigurationUpdated;
pub use traits::{Completion, DispatchOutcome, NativeCall, NativeDispatch};

/// Dispatcher for the target operating system.
pub fn platform_dispatcher(settings: &BridgeSettings) -> Arc<dyn NativeDispatch> {
    #[cfg(target_os = "ios")]
    {
        Arc::new(ios::IosDispatch::new(&settings.ios_dispatcher_class))
    }
    #[cfg(target_os = "android")]
    {
        Arc::new(android::AndroidDispatch::new(&settings.android_dispatcher_class))
    }
    #[cfg(not(any(target_os = "ios", target_os = "android")))]
    {
        let _ = settings;
        Arc::new(stub::StubDispatch)
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// One-shot resolution of a native handle. The first outcome, success or
// failure, is kept; later callers never retry.

#![cfg_attr(not(target_os = "android"), allow(dead_code))]

use metrica_core::error::{MetricaError, Result};

pub(crate) struct ResolveOnce<T> {
    slot: Option<std::result::Result<T, String>>,
}

impl<T> ResolveOnce<T> {
    pub(crate) fn new() -> Self {
        Self { slot: None }
    }

    /// Run `resolve` on first use only. A cached failure is returned as
    /// [`MetricaError::Bridge`] carrying the original message.
    pub(crate) fn get_or_resolve(&mut self, resolve: impl FnOnce() -> Result<T>) -> Result<&T> {
        self.slot
            .get_or_insert_with(|| resolve().map_err(|e| e.to_string()))
            .as_ref()
            .map_err(|reason| MetricaError::Bridge(reason.clone()))
    }
}

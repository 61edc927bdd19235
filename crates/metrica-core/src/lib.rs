// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Metrica — Core types, operation names and error definitions shared across
// all crates.

pub mod config;
pub mod error;
pub mod lenient;
pub mod operation;
pub mod types;

pub use config::BridgeSettings;
pub use error::MetricaError;
pub use operation::Operation;
pub use types::*;

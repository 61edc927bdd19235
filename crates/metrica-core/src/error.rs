// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for the Metrica bridge.

use thiserror::Error;

/// Top-level error type for all Metrica bridge operations.
///
/// None of these ever reach a caller of the typed client operations; the
/// client funnels dispatch failures into its log-and-drop sink. They are
/// returned by the settings loader, the host-side decoder and the platform
/// adapters.
#[derive(Debug, Error)]
pub enum MetricaError {
    // -- Dispatch --
    #[error("{operation}: {description}")]
    Dispatch {
        operation: String,
        description: String,
    },

    #[error("Unknown action: {0}")]
    UnknownOperation(String),

    #[error("{operation}: argument {position} {expected}")]
    MalformedArgument {
        operation: &'static str,
        position: usize,
        expected: &'static str,
    },

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("native analytics component not available on this platform")]
    PlatformUnavailable,

    // -- Settings / serialization --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, MetricaError>;

// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for sample decoding.

/// Errors that can occur when decoding a wire record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The input was not exactly one record long.
    ///
    /// Callers treat this as a transient short read and wait for the next
    /// readiness event rather than aborting the session.
    #[error("unexpected record size {actual} (expected {expected})")]
    SizeMismatch { expected: usize, actual: usize },
}

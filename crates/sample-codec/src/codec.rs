// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Fixed-size little-endian record codec.

use crate::{CodecError, Sample};

/// Size of one wire record in bytes: `i64` timestamp + `i32` temperature, packed.
pub const SAMPLE_SIZE: usize = 12;

const TIMESTAMP_LEN: usize = 8;

/// Decodes exactly one wire record.
///
/// Any bit pattern of the right length decodes successfully. Inputs of any
/// other length yield [`CodecError::SizeMismatch`].
pub fn decode(bytes: &[u8]) -> Result<Sample, CodecError> {
    let record: &[u8; SAMPLE_SIZE] = bytes.try_into().map_err(|_| CodecError::SizeMismatch {
        expected: SAMPLE_SIZE,
        actual: bytes.len(),
    })?;

    let (ts, temp) = record.split_at(TIMESTAMP_LEN);
    let mut ts_bytes = [0u8; TIMESTAMP_LEN];
    ts_bytes.copy_from_slice(ts);
    let mut temp_bytes = [0u8; SAMPLE_SIZE - TIMESTAMP_LEN];
    temp_bytes.copy_from_slice(temp);

    Ok(Sample {
        timestamp_ns: i64::from_le_bytes(ts_bytes),
        temperature_milli_c: i32::from_le_bytes(temp_bytes),
    })
}

/// Encodes a sample into its wire representation.
///
/// The monitor only ever reads; this exists for fixtures and tooling that
/// need to fabricate device output.
pub fn encode(sample: &Sample) -> [u8; SAMPLE_SIZE] {
    let mut out = [0u8; SAMPLE_SIZE];
    out[..TIMESTAMP_LEN].copy_from_slice(&sample.timestamp_ns.to_le_bytes());
    out[TIMESTAMP_LEN..].copy_from_slice(&sample.temperature_milli_c.to_le_bytes());
    out
}

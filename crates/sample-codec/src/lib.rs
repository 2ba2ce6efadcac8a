// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # sample-codec
//!
//! Wire format of the samples produced by the `simtemp` character device.
//!
//! Each record on the device byte stream is exactly [`SAMPLE_SIZE`] bytes:
//!
//! ```text
//! offset  size  field
//! 0       8     timestamp_ns          (i64, little-endian, ns since Unix epoch)
//! 8       4     temperature_milli_c   (i32, little-endian, thousandths of °C)
//! ```
//!
//! There is no framing, length prefix, or checksum. Record boundaries are
//! defined purely by the fixed size, so any read that does not return
//! exactly 12 bytes is rejected by [`decode`].
//!
//! Alert status is *not* part of the payload. It is carried by the readiness
//! event that delivered the record and attached afterwards via
//! [`ClassifiedSample`].
//!
//! # Example
//! ```
//! use sample_codec::{decode, encode, Sample};
//!
//! let sample = Sample::new(1_700_000_000_123_456_789, 45_250);
//! let bytes = encode(&sample);
//! assert_eq!(decode(&bytes).unwrap(), sample);
//! assert_eq!(format!("{:.2}", sample.celsius()), "45.25");
//! ```

mod codec;
mod error;
mod sample;
mod timestamp;

pub use codec::{decode, encode, SAMPLE_SIZE};
pub use error::CodecError;
pub use sample::{ClassifiedSample, Sample};
pub use timestamp::format_timestamp_ns;

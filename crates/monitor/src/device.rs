// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Exclusive handle on the sensor's character device.
//!
//! The device is opened `O_RDONLY | O_NONBLOCK` so a read after a spurious
//! wake-up returns `EAGAIN` instead of blocking the loop. The descriptor is
//! closed when the [`SensorDevice`] is dropped, on every exit path.

use crate::MonitorError;
use nix::fcntl::OFlag;
use std::fs::{File, OpenOptions};
use std::io::{self, Read};
use std::os::fd::{AsFd, BorrowedFd};
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

/// An open, non-blocking sensor device.
#[derive(Debug)]
pub struct SensorDevice {
    path: PathBuf,
    file: File,
}

impl SensorDevice {
    /// Opens the device for non-blocking reads.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, MonitorError> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .custom_flags(OFlag::O_NONBLOCK.bits())
            .open(path)
            .map_err(|e| MonitorError::DeviceOpen {
                path: path.display().to_string(),
                source: e,
            })?;
        tracing::debug!("opened {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    /// Returns the path the device was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AsFd for SensorDevice {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.file.as_fd()
    }
}

// Reads through a shared reference so the descriptor can stay registered
// with the poller while samples are drained.
impl Read for &SensorDevice {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        (&self.file).read(buf)
    }
}

impl Drop for SensorDevice {
    fn drop(&mut self) {
        tracing::debug!("closing {}", self.path.display());
    }
}

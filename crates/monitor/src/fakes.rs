// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Scripted stand-ins for the poller and the device, used by unit tests.

use crate::{ReadyEvent, ReadyFlags, Readiness};
use std::collections::VecDeque;
use std::io::{self, Read};
use std::time::Duration;

/// Replays one scripted wait result per call. An exhausted script fails the wait.
#[derive(Debug, Default)]
pub(crate) struct ScriptedReadiness {
    cycles: VecDeque<io::Result<Vec<ReadyFlags>>>,
    pub(crate) waits: usize,
    pub(crate) timeouts_seen: Vec<Duration>,
    pub(crate) interest: Option<ReadyFlags>,
}

impl ScriptedReadiness {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds a wait that reports the given events for the registered descriptor.
    pub(crate) fn events(mut self, flags: &[ReadyFlags]) -> Self {
        self.cycles.push_back(Ok(flags.to_vec()));
        self
    }

    /// Adds a wait that times out.
    pub(crate) fn timeout(mut self) -> Self {
        self.cycles.push_back(Ok(Vec::new()));
        self
    }

    /// Adds a wait that fails.
    pub(crate) fn failure(mut self, kind: io::ErrorKind) -> Self {
        self.cycles.push_back(Err(io::Error::from(kind)));
        self
    }
}

impl Readiness for ScriptedReadiness {
    type Descriptor = ();

    fn register(&mut self, _descriptor: (), interest: ReadyFlags) -> usize {
        self.interest = Some(interest);
        0
    }

    fn wait(&mut self, timeout: Duration) -> io::Result<Vec<ReadyEvent>> {
        self.waits += 1;
        self.timeouts_seen.push(timeout);
        let flags = self
            .cycles
            .pop_front()
            .unwrap_or_else(|| Err(io::Error::other("wait script exhausted")))?;
        Ok(flags
            .into_iter()
            .map(|flags| ReadyEvent { token: 0, flags })
            .collect())
    }
}

/// Returns one scripted read result per call. An exhausted script would block.
#[derive(Debug, Default)]
pub(crate) struct ScriptedDevice {
    reads: VecDeque<io::Result<Vec<u8>>>,
    pub(crate) read_calls: usize,
}

impl ScriptedDevice {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn bytes(mut self, bytes: &[u8]) -> Self {
        self.reads.push_back(Ok(bytes.to_vec()));
        self
    }

    pub(crate) fn error(mut self, kind: io::ErrorKind) -> Self {
        self.reads.push_back(Err(io::Error::from(kind)));
        self
    }
}

impl Read for ScriptedDevice {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.read_calls += 1;
        let bytes = self
            .reads
            .pop_front()
            .unwrap_or_else(|| Err(io::Error::from(io::ErrorKind::WouldBlock)))?;
        let n = bytes.len().min(buf.len());
        buf[..n].copy_from_slice(&bytes[..n]);
        Ok(n)
    }
}

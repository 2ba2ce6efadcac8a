// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Readiness multiplexing behind a small capability trait.
//!
//! [`PollReadiness`] maps onto `poll(2)` via `nix`. The poll loop only sees
//! the [`Readiness`] trait, so tests drive it with scripted events.

use nix::errno::Errno;
use nix::poll::{poll, PollFd, PollFlags, PollTimeout};
use std::io;
use std::os::fd::BorrowedFd;
use std::time::{Duration, Instant};

/// Readiness conditions, used both as interest set and as observed flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadyFlags {
    /// Normal data is available (`POLLIN`).
    pub readable: bool,
    /// Urgent/out-of-band condition (`POLLPRI`). The driver raises it for alert samples.
    pub priority: bool,
}

impl ReadyFlags {
    /// Data available, no alert.
    pub const READABLE: Self = Self {
        readable: true,
        priority: false,
    };

    /// Data available with the alert condition raised.
    pub const ALERT: Self = Self {
        readable: true,
        priority: true,
    };

    /// Returns `true` if no condition is set.
    pub fn is_empty(self) -> bool {
        !self.readable && !self.priority
    }

    fn to_poll_flags(self) -> PollFlags {
        let mut flags = PollFlags::empty();
        if self.readable {
            flags |= PollFlags::POLLIN;
        }
        if self.priority {
            flags |= PollFlags::POLLPRI;
        }
        flags
    }

    fn from_poll_flags(flags: PollFlags) -> Self {
        Self {
            readable: flags.contains(PollFlags::POLLIN),
            priority: flags.contains(PollFlags::POLLPRI),
        }
    }
}

/// One descriptor reported ready by a wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadyEvent {
    /// Token returned by [`Readiness::register`] for the descriptor.
    pub token: usize,
    /// Conditions observed on the descriptor.
    pub flags: ReadyFlags,
}

/// A readiness-multiplexing facility.
pub trait Readiness {
    /// The handle type this facility watches.
    type Descriptor;

    /// Adds `descriptor` to the watched set and returns its event token.
    fn register(&mut self, descriptor: Self::Descriptor, interest: ReadyFlags) -> usize;

    /// Blocks until at least one registered descriptor is ready or `timeout` elapses.
    ///
    /// An empty vector means the timeout elapsed with no events.
    fn wait(&mut self, timeout: Duration) -> io::Result<Vec<ReadyEvent>>;
}

/// `poll(2)`-backed readiness over borrowed file descriptors.
#[derive(Debug, Default)]
pub struct PollReadiness<'fd> {
    registered: Vec<(BorrowedFd<'fd>, PollFlags)>,
}

impl<'fd> PollReadiness<'fd> {
    /// Creates an empty poll set.
    pub fn new() -> Self {
        Self {
            registered: Vec::new(),
        }
    }
}

impl<'fd> Readiness for PollReadiness<'fd> {
    type Descriptor = BorrowedFd<'fd>;

    fn register(&mut self, descriptor: BorrowedFd<'fd>, interest: ReadyFlags) -> usize {
        self.registered.push((descriptor, interest.to_poll_flags()));
        self.registered.len() - 1
    }

    fn wait(&mut self, timeout: Duration) -> io::Result<Vec<ReadyEvent>> {
        let started = Instant::now();
        let mut fds: Vec<PollFd<'fd>> = self
            .registered
            .iter()
            .map(|(fd, flags)| PollFd::new(*fd, *flags))
            .collect();

        loop {
            let millis = remaining_millis(timeout, started.elapsed());
            let poll_timeout = PollTimeout::try_from(millis).map_err(|_| {
                io::Error::new(io::ErrorKind::InvalidInput, "poll timeout out of range")
            })?;
            match poll(&mut fds, poll_timeout) {
                Ok(0) => return Ok(Vec::new()),
                Ok(_) => break,
                Err(Errno::EINTR) => {
                    tracing::trace!("poll interrupted, retrying");
                    continue;
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(fds
            .iter()
            .enumerate()
            .filter_map(|(token, fd)| {
                let revents = fd.revents()?;
                if revents.is_empty() {
                    return None;
                }
                Some(ReadyEvent {
                    token,
                    flags: ReadyFlags::from_poll_flags(revents),
                })
            })
            .collect())
    }
}

/// Milliseconds left of `timeout` after `elapsed`, clamped to what `poll(2)` accepts.
fn remaining_millis(timeout: Duration, elapsed: Duration) -> i32 {
    let left = timeout.saturating_sub(elapsed);
    i32::try_from(left.as_millis()).unwrap_or(i32::MAX)
}

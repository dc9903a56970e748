//! Command/reply correlation
//!
//! Every vendor command path has the same shape: write one command frame, then
//! read reports until one of them is the reply to that command. Unsolicited
//! input reports share the endpoint with replies, and devices routinely drop a
//! read cycle, so both a timeout and an unrelated report just consume one
//! attempt. A reply that claims to answer a *different* command means the
//! command stream is out of step with the device and fails at once.
//!
//! | Read outcome                         | Effect                                  |
//! |--------------------------------------|-----------------------------------------|
//! | `Timeout`                            | consume an attempt, keep reading        |
//! | [`ReplyMatch::Unrelated`]            | consume an attempt, keep reading        |
//! | [`ReplyMatch::Mismatched`]           | `InvalidReplies`, no retry              |
//! | [`ReplyMatch::Matched`]              | success, counter advances               |
//! | `Disconnected` / other error         | propagated immediately                  |
//!
//! When the budget runs out, an exchange marked `allow_failure` is a soft
//! success. Otherwise the result is `Timeout` if every attempt timed out and
//! `InvalidReplies` if the device answered with something else.

use padlink_errors::{SessionError, SessionResult, TransportError};
use padlink_hid_common::Transport;
use tracing::{debug, warn};

/// Rolling packet counter, modulo 16.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommandCounter {
    value: u8,
}

impl CommandCounter {
    pub const MODULUS: u8 = 16;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(self) -> u8 {
        self.value
    }

    pub fn advance(&mut self) {
        self.value = (self.value + 1) % Self::MODULUS;
    }
}

/// How many reads an exchange may spend, and how long each may block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub timeout_ms: u32,
}

impl RetryPolicy {
    /// Write only. Pair with `allow_failure` for commands that are never answered.
    pub const NO_REPLY: RetryPolicy = RetryPolicy::new(0, 0);

    pub const fn new(attempts: u32, timeout_ms: u32) -> Self {
        Self {
            attempts,
            timeout_ms,
        }
    }
}

/// Verdict of a reply classifier on one received report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyMatch<T> {
    /// The reply to this command.
    Matched(T),
    /// Some other report (input, status, ...) sharing the endpoint.
    Unrelated,
    /// A reply, but to a different command.
    Mismatched(String),
}

/// One outgoing command and the rules for awaiting its reply.
#[derive(Debug, Clone)]
pub struct CommandExchange<'a> {
    pub name: &'static str,
    pub frame: &'a [u8],
    pub write_timeout_ms: u32,
    pub read_len: usize,
    pub policy: RetryPolicy,
    pub allow_failure: bool,
    /// The frame carries the rolling counter, so success advances it.
    pub sequenced: bool,
}

impl<'a> CommandExchange<'a> {
    pub fn new(name: &'static str, frame: &'a [u8], read_len: usize, policy: RetryPolicy) -> Self {
        Self {
            name,
            frame,
            write_timeout_ms: policy.timeout_ms,
            read_len,
            policy,
            allow_failure: false,
            sequenced: false,
        }
    }

    pub fn write_timeout(mut self, timeout_ms: u32) -> Self {
        self.write_timeout_ms = timeout_ms;
        self
    }

    pub fn allow_failure(mut self, allow: bool) -> Self {
        self.allow_failure = allow;
        self
    }

    pub fn sequenced(mut self) -> Self {
        self.sequenced = true;
        self
    }
}

/// Per-session correlation state: the rolling counter and nothing else.
#[derive(Debug, Clone, Default)]
pub struct Correlator {
    counter: CommandCounter,
}

impl Correlator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counter(&self) -> CommandCounter {
        self.counter
    }

    /// Write `exchange.frame` and read until `classify` accepts a reply.
    ///
    /// Returns `Ok(None)` only for an `allow_failure` exchange whose budget ran
    /// out without a reply.
    pub fn submit<T, F>(
        &mut self,
        transport: &mut dyn Transport,
        exchange: &CommandExchange<'_>,
        mut classify: F,
    ) -> SessionResult<Option<T>>
    where
        F: FnMut(&[u8]) -> ReplyMatch<T>,
    {
        debug!(
            command = exchange.name,
            counter = self.counter.value(),
            "Submitting command"
        );
        transport.write(exchange.frame, exchange.write_timeout_ms)?;

        let mut buf = vec![0u8; exchange.read_len];
        let mut unrelated = 0u32;
        for attempt in 1..=exchange.policy.attempts {
            let n = match transport.read(&mut buf, exchange.policy.timeout_ms) {
                Ok(n) => n,
                Err(TransportError::Timeout { .. }) => {
                    debug!(command = exchange.name, attempt, "Reply read timed out");
                    continue;
                }
                Err(TransportError::Incomplete { expected, actual }) => {
                    debug!(
                        command = exchange.name,
                        attempt, expected, actual, "Incomplete reply frame"
                    );
                    unrelated += 1;
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            match classify(buf.get(..n).unwrap_or(&[])) {
                ReplyMatch::Matched(reply) => {
                    if exchange.sequenced {
                        self.counter.advance();
                    }
                    debug!(command = exchange.name, attempt, "Command acknowledged");
                    return Ok(Some(reply));
                }
                ReplyMatch::Unrelated => {
                    debug!(
                        command = exchange.name,
                        attempt,
                        report_id = buf.first().copied().unwrap_or_default(),
                        "Skipping unrelated report"
                    );
                    unrelated += 1;
                }
                ReplyMatch::Mismatched(reason) => {
                    warn!(command = exchange.name, attempt, "Reply out of step: {reason}");
                    return Err(SessionError::invalid_replies(format!(
                        "{}: {reason}",
                        exchange.name
                    )));
                }
            }
        }

        if exchange.allow_failure {
            debug!(
                command = exchange.name,
                "No reply within budget, continuing without acknowledgement"
            );
            return Ok(None);
        }

        if unrelated == 0 {
            Err(SessionError::timeout(exchange.policy.timeout_ms))
        } else {
            Err(SessionError::invalid_replies(format!(
                "{}: no matching reply in {} attempts ({unrelated} unrelated)",
                exchange.name, exchange.policy.attempts
            )))
        }
    }
}

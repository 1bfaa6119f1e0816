// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One-shot release signals returned from condition waits.
//!
//! A signal starts armed and is released exactly once, either normally (the
//! condition reached the awaited state) or with a closed marker (the
//! condition was terminated). A released signal stays released: polling it
//! again keeps returning the same outcome, which lets the composite driver
//! scan a whole set of signals without consuming them.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use thiserror::Error;
use tokio::sync::oneshot;

/// Marker delivered through a signal when the condition it belongs to was
/// closed while the signal was still armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("condition was closed")]
pub struct ConditionClosed;

type Release = Result<(), ConditionClosed>;

/// Create an armed signal together with its releasing half.
///
/// Beyond condition internals, a pair also serves as a stop handle: a
/// driver or watch loop holds the [`Signal`] and whoever owns it releases
/// the [`SignalSender`] to request termination.
pub fn pair() -> (SignalSender, Signal) {
    let (tx, rx) = oneshot::channel();
    (
        SignalSender { tx },
        Signal {
            rx: Some(rx),
            released: None,
        },
    )
}

/// The releasing half of a signal. Held by the condition that handed the
/// signal out; dropping it without releasing counts as a close.
pub struct SignalSender {
    tx: oneshot::Sender<Release>,
}

impl SignalSender {
    /// Release the signal normally.
    pub fn release(self) {
        let _ = self.tx.send(Ok(()));
    }

    /// Release the signal with the closed marker.
    pub fn close(self) {
        let _ = self.tx.send(Err(ConditionClosed));
    }
}

/// A one-shot signal resolving to `Ok(())` on a normal release or
/// `Err(ConditionClosed)` when the condition terminated.
///
/// `Signal` is a future; awaiting it suspends until the release. Once
/// released, further polls return the cached outcome.
#[derive(Debug)]
pub struct Signal {
    rx: Option<oneshot::Receiver<Release>>,
    released: Option<Release>,
}

impl Signal {
    /// A signal that was already released normally.
    pub fn released() -> Self {
        Signal {
            rx: None,
            released: Some(Ok(())),
        }
    }

    /// A signal that was already released with the closed marker.
    pub fn closed() -> Self {
        Signal {
            rx: None,
            released: Some(Err(ConditionClosed)),
        }
    }
}

impl Future for Signal {
    type Output = Release;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        if let Some(outcome) = this.released {
            return Poll::Ready(outcome);
        }

        let Some(rx) = this.rx.as_mut() else {
            return Poll::Ready(Err(ConditionClosed));
        };

        match Pin::new(rx).poll(cx) {
            // A dropped sender means the condition went away without a
            // proper close; waiters observe that as a close.
            Poll::Ready(outcome) => {
                let outcome = outcome.unwrap_or(Err(ConditionClosed));
                this.released = Some(outcome);
                this.rx = None;
                Poll::Ready(outcome)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

#[cfg(test)]
#[path = "signal_tests.rs"]
mod tests;

//! Search-input debouncing.
//!
//! Rapid keystrokes must not each trigger a pipeline run. Only the value that
//! settles after a quiescence window (300 ms by default) is delivered; values
//! superseded inside the window are dropped, never queued.
//!
//! - [`Debounce`] is the clock-free core: callers pass `now` explicitly, which
//!   keeps it deterministic and easy to test.
//! - [`Debouncer`] drives a `Debounce` on a background thread fed by a channel
//!   and invokes a callback with each settled value.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{ListqError, Result};

pub const DEFAULT_QUIESCENCE_MS: u64 = 300;

#[derive(Debug)]
pub struct Debounce<T> {
    window: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debounce<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Replace any pending value and re-arm the window from `now`.
    ///
    /// Returns `true` if a pending value was superseded.
    pub fn push(&mut self, value: T, now: Instant) -> bool {
        let superseded = self.pending.is_some();
        self.pending = Some((value, now + self.window));
        superseded
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending value once its window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.deadline() {
            Some(deadline) if now >= deadline => self.take(),
            _ => None,
        }
    }

    /// Take the pending value regardless of the window.
    pub fn take(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

enum Msg<T> {
    Value(T),
    Cancel,
    Flush,
}

/// Background debouncer delivering settled values to a callback.
///
/// Dropping the handle stops the worker thread. A value still inside its
/// window at that point is discarded.
pub struct Debouncer<T: Send + 'static> {
    tx: Option<mpsc::Sender<Msg<T>>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn start<F>(window: Duration, on_settle: F) -> Self
    where
        F: FnMut(T) + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let handle = thread::spawn(move || debounce_loop(rx, Debounce::new(window), on_settle));
        Self {
            tx: Some(tx),
            handle: Some(handle),
        }
    }

    pub fn push(&self, value: T) -> Result<()> {
        self.send(Msg::Value(value))
    }

    /// Drop the pending value, if any, without delivering it.
    pub fn cancel(&self) -> Result<()> {
        self.send(Msg::Cancel)
    }

    /// Deliver the pending value now instead of waiting out the window.
    pub fn flush(&self) -> Result<()> {
        self.send(Msg::Flush)
    }

    fn send(&self, msg: Msg<T>) -> Result<()> {
        self.tx
            .as_ref()
            .ok_or(ListqError::DebouncerStopped)?
            .send(msg)
            .map_err(|_| ListqError::DebouncerStopped)
    }
}

impl<T: Send + 'static> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.tx.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("debounce: worker thread panicked in settle callback");
            }
        }
    }
}

fn debounce_loop<T, F>(rx: mpsc::Receiver<Msg<T>>, mut core: Debounce<T>, mut on_settle: F)
where
    F: FnMut(T),
{
    loop {
        let msg = match core.deadline() {
            None => match rx.recv() {
                Ok(msg) => Some(msg),
                Err(_) => break,
            },
            Some(deadline) => {
                let timeout = deadline.saturating_duration_since(Instant::now());
                match rx.recv_timeout(timeout) {
                    Ok(msg) => Some(msg),
                    Err(RecvTimeoutError::Timeout) => None,
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        };

        let now = Instant::now();
        let settled = match msg {
            Some(Msg::Value(value)) => {
                if core.push(value, now) {
                    tracing::trace!("debounce: superseded pending value");
                }
                None
            }
            Some(Msg::Cancel) => {
                core.cancel();
                None
            }
            Some(Msg::Flush) => core.take(),
            None => core.poll(now),
        };

        if let Some(value) = settled {
            tracing::trace!("debounce: value settled");
            on_settle(value);
        }
    }

    if core.is_pending() {
        tracing::trace!("debounce: discarding pending value on shutdown");
    }
}

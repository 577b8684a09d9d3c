//! Deferred measurement: readiness gates, bounded waits and last-write-wins sessions.
//!
//! Runtime-agnostic: timeouts are whatever future the caller passes as a deadline (a timer
//! from their executor, or `future::ready(())` to skip waiting).

use crate::reconcile::{LayoutResult, MeasurementSource};
use futures::FutureExt;
use futures::channel::oneshot;
use futures::future::{self, Either, Shared};
use plategen_core::{
    AssembledPlate, Chrome, Country, PlateConfiguration, PlateShape, TokenSequence, WidthMode,
};
use std::future::Future;
use std::pin::pin;

/// One-shot signal that a precondition of measurement holds (plate font loaded, content
/// committed). Cloning shares the same underlying signal.
#[derive(Clone)]
pub struct Readiness {
    inner: Shared<oneshot::Receiver<()>>,
}

/// Sending half of a [`Readiness`]. Dropping it without firing marks the readiness as failed.
pub struct ReadySignal {
    tx: oneshot::Sender<()>,
}

pub fn readiness() -> (ReadySignal, Readiness) {
    let (tx, rx) = oneshot::channel();
    (ReadySignal { tx }, Readiness { inner: rx.shared() })
}

impl ReadySignal {
    pub fn fire(self) {
        // A receiver that is already gone has nobody left to notify.
        let _ = self.tx.send(());
    }
}

impl Readiness {
    /// A readiness that has already fired.
    pub fn ready() -> Self {
        let (signal, readiness) = readiness();
        signal.fire();
        readiness
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.inner.clone().now_or_never(), Some(Ok(())))
    }

    /// Resolves to `true` once fired, `false` if the signal was dropped.
    pub fn wait(&self) -> impl Future<Output = bool> + Unpin + use<> {
        self.inner.clone().map(|res| res.is_ok())
    }
}

impl std::fmt::Debug for Readiness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Readiness")
            .field("ready", &self.is_ready())
            .finish()
    }
}

/// Both preconditions of a final measurement.
#[derive(Debug, Clone)]
pub struct SettleGate {
    pub font: Readiness,
    pub committed: Readiness,
}

impl SettleGate {
    pub fn ready() -> Self {
        Self {
            font: Readiness::ready(),
            committed: Readiness::ready(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.font.is_ready() && self.committed.is_ready()
    }

    async fn wait(&self) -> bool {
        let (font, committed) = future::join(self.font.wait(), self.committed.wait()).await;
        font && committed
    }
}

/// Runs `measure` once the gate opens, or `estimate` if the deadline fires first or a signal
/// is dropped.
pub async fn settle<D>(
    gate: &SettleGate,
    deadline: D,
    measure: impl FnOnce() -> LayoutResult,
    estimate: impl FnOnce() -> LayoutResult,
) -> LayoutResult
where
    D: Future<Output = ()>,
{
    let open = pin!(gate.wait());
    let deadline = pin!(deadline);
    match future::select(open, deadline).await {
        Either::Left((true, _)) => measure(),
        Either::Left((false, _)) => {
            tracing::warn!("readiness signal dropped; using estimated layout");
            estimate()
        }
        Either::Right(((), _)) => {
            tracing::warn!("plate font not ready before deadline; using estimated layout");
            estimate()
        }
    }
}

/// Inputs whose change requires a new measurement pass. Style and colors are not part of it.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasureKey {
    pub country: Country,
    pub shape: PlateShape,
    pub tokens: TokenSequence,
    pub chrome: Chrome,
    pub width_mode: WidthMode,
    pub scale: f64,
}

impl MeasureKey {
    pub fn new(config: &PlateConfiguration, assembled: &AssembledPlate, scale: f64) -> Self {
        Self {
            country: assembled.country,
            shape: assembled.shape.clone(),
            tokens: assembled.tokens.clone(),
            chrome: assembled.chrome.clone(),
            width_mode: config.width_mode,
            scale,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PassTicket {
    generation: u64,
    key: MeasureKey,
}

impl PassTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn key(&self) -> &MeasureKey {
        &self.key
    }
}

#[derive(Debug)]
struct Settled<T> {
    generation: u64,
    key: MeasureKey,
    source: MeasurementSource,
    value: T,
}

/// Tracks overlapping measurement passes; only the most recently started pass may settle.
#[derive(Debug)]
pub struct LayoutSession<T> {
    generation: u64,
    settled: Option<Settled<T>>,
}

impl<T> Default for LayoutSession<T> {
    fn default() -> Self {
        Self {
            generation: 0,
            settled: None,
        }
    }
}

impl<T> LayoutSession<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a pass, or returns `None` when a measured result already covers `key`.
    ///
    /// An estimated result never covers its key: the next pass re-measures it.
    pub fn begin(&mut self, key: MeasureKey) -> Option<PassTicket> {
        let covered = self
            .settled
            .as_ref()
            .is_some_and(|s| s.source == MeasurementSource::Measured && s.key == key);
        if covered && !self.is_in_flight() {
            tracing::debug!("measurement inputs unchanged; skipping pass");
            return None;
        }
        self.generation += 1;
        Some(PassTicket {
            generation: self.generation,
            key,
        })
    }

    /// Stores a measured pass result if no newer pass has started. Returns whether it was
    /// accepted.
    pub fn finish(&mut self, ticket: PassTicket, value: T) -> bool {
        self.finish_with(ticket, MeasurementSource::Measured, value)
    }

    /// Like [`LayoutSession::finish`], recording where the width came from.
    pub fn finish_with(
        &mut self,
        ticket: PassTicket,
        source: MeasurementSource,
        value: T,
    ) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                stale = ticket.generation,
                current = self.generation,
                "discarding superseded measurement pass"
            );
            return false;
        }
        self.settled = Some(Settled {
            generation: ticket.generation,
            key: ticket.key,
            source,
            value,
        });
        true
    }

    pub fn is_in_flight(&self) -> bool {
        self.settled
            .as_ref()
            .map_or(self.generation > 0, |s| s.generation != self.generation)
    }

    /// The settled value, unavailable while a newer pass is in flight.
    pub fn settled(&self) -> Option<&T> {
        if self.is_in_flight() {
            return None;
        }
        self.settled.as_ref().map(|s| &s.value)
    }

    /// Where the settled value's width came from.
    pub fn settled_source(&self) -> Option<MeasurementSource> {
        self.settled.as_ref().map(|s| s.source)
    }

    /// The most recent settled value, even if a newer pass is running.
    pub fn latest(&self) -> Option<&T> {
        self.settled.as_ref().map(|s| &s.value)
    }
}

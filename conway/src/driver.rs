// driver.rs - Fixed-period tick loop for running the evolver without a window

use crate::evolver::GridEvolver;
use crate::render::{RenderStyle, Surface, SurfaceSize};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

const MIN_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DriverEvent {
    Resize(SurfaceSize),
    Stop,
}

/// Sending side of a running driver. Dropping every handle stops it.
#[derive(Debug, Clone)]
pub struct DriverHandle {
    tx: mpsc::UnboundedSender<DriverEvent>,
}

impl DriverHandle {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<DriverEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Returns false once the driver has exited.
    pub fn resize(&self, size: SurfaceSize) -> bool {
        self.tx.send(DriverEvent::Resize(size)).is_ok()
    }

    pub fn stop(&self) -> bool {
        self.tx.send(DriverEvent::Stop).is_ok()
    }
}

/// Ticks `evolver` every `period` until stopped, drawing each generation on `surface`.
///
/// Resize events only mark the grid for replacement; the new grid appears at the
/// start of the following tick. The first tick happens one period after start.
/// Periods shorter than a millisecond are raised to one.
pub async fn run<S: Surface + ?Sized>(
    mut evolver: GridEvolver,
    surface: &mut S,
    style: RenderStyle,
    period: Duration,
    mut events: mpsc::UnboundedReceiver<DriverEvent>,
) -> GridEvolver {
    let period = period.max(MIN_PERIOD);
    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker.tick().await;

    info!(period_ms = period.as_millis() as u64, "driver started");
    loop {
        tokio::select! {
            biased;

            event = events.recv() => match event {
                Some(DriverEvent::Resize(size)) => {
                    debug!(?size, "resize requested");
                    evolver.request_resize(size);
                }
                Some(DriverEvent::Stop) | None => break,
            },
            _ = ticker.tick() => {
                evolver.tick_cooperative(surface, &style).await;
            }
        }
    }
    info!(generation = evolver.generation(), "driver stopped");
    evolver
}

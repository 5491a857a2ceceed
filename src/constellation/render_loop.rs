use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, trace};

use super::snapshot::WorldSnapshot;

#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

#[derive(Debug)]
#[must_use = "a scheduled tick does nothing unless it is run"]
pub struct ScheduledTick {
    token: CancellationToken,
    frame: u64,
}

impl ScheduledTick {
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn is_stale(&self) -> bool {
        self.token.is_cancelled()
    }
}

#[derive(Debug)]
pub enum TickOutcome {
    Advanced {
        next: ScheduledTick,
        snapshot: WorldSnapshot,
    },
    Dropped,
}

/// Lifecycle of the frame-driven simulation loop.
///
/// Every call to [`RenderLoop::start`] hands out tickets bound to a fresh
/// token; [`RenderLoop::stop`] cancels it, so tickets issued before the stop
/// can no longer be redeemed.
#[derive(Debug, Default)]
pub struct RenderLoop {
    token: Option<CancellationToken>,
    frame: u64,
}

impl RenderLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.token
            .as_ref()
            .is_some_and(|token| !token.is_cancelled())
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn start(&mut self) -> Option<ScheduledTick> {
        if self.is_running() {
            return None;
        }

        let token = CancellationToken::new();
        self.token = Some(token.clone());
        debug!("event=render_loop_start frame={}", self.frame);
        Some(ScheduledTick {
            token,
            frame: self.frame,
        })
    }

    pub fn stop(&mut self) {
        if let Some(token) = self.token.take() {
            token.cancel();
            debug!("event=render_loop_stop frame={}", self.frame);
        }
    }

    /// Checks a ticket at the top of a tick. Returns false for stale tickets.
    pub fn admit(&self, ticket: &ScheduledTick) -> bool {
        if ticket.is_stale() {
            trace!("event=stale_tick_dropped frame={}", ticket.frame);
            return false;
        }

        self.token
            .as_ref()
            .is_some_and(|token| Arc::ptr_eq(&token.cancelled, &ticket.token.cancelled))
    }

    pub fn reschedule(&mut self, ticket: ScheduledTick) -> ScheduledTick {
        self.frame = self.frame.wrapping_add(1);
        ScheduledTick {
            token: ticket.token,
            frame: self.frame,
        }
    }
}

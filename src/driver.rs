//! Periodic tick driver.
//!
//! A [`TickDriver`] is the arm/disarm handle around `bubbletea_rs::tick`.
//! Each armed driver schedules one [`TickMsg`] at a time and schedules the
//! next one only when the owner asks for it with [`TickDriver::next`].
//!
//! Disarming cannot cancel a tick that is already in flight, so every
//! message carries the driver's id and a generation tag. Arming or disarming
//! bumps the tag, and [`TickDriver::accepts`] rejects messages from an
//! older generation. That keeps a re-armed driver from ticking twice as fast.
//!
//! ```rust
//! use termdesk::driver::TickDriver;
//! use std::time::Duration;
//!
//! let mut driver = TickDriver::new();
//! let _cmd = driver.arm(Duration::from_secs(1));
//! let msg = driver.tick_msg();
//! assert!(driver.accepts(&msg));
//!
//! driver.disarm();
//! assert!(!driver.accepts(&msg));
//! ```

use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

// Internal ID management for driver instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Sent once per driver period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickMsg {
    /// The driver that scheduled this tick.
    pub id: i64,
    tag: i64,
}

/// An arm/disarm periodic callback source.
#[derive(Debug, Clone)]
pub struct TickDriver {
    id: i64,
    tag: i64,
    interval: Duration,
    armed: bool,
}

impl TickDriver {
    /// A disarmed driver with a fresh id.
    pub fn new() -> Self {
        Self {
            id: next_id(),
            tag: 0,
            interval: Duration::from_secs(1),
            armed: false,
        }
    }

    /// The driver's unique id.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Whether the driver is armed.
    pub fn armed(&self) -> bool {
        self.armed
    }

    /// The current period.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Starts a new generation at `interval` and schedules its first tick.
    pub fn arm(&mut self, interval: Duration) -> Cmd {
        self.tag += 1;
        self.interval = interval;
        self.armed = true;
        tracing::debug!(id = self.id, tag = self.tag, ?interval, "tick driver armed");
        self.schedule()
    }

    /// Stops the driver; ticks already in flight will be rejected.
    pub fn disarm(&mut self) {
        if self.armed {
            tracing::debug!(id = self.id, tag = self.tag, "tick driver disarmed");
        }
        self.tag += 1;
        self.armed = false;
    }

    /// Whether `msg` belongs to this driver's current generation.
    pub fn accepts(&self, msg: &TickMsg) -> bool {
        self.armed && msg.id == self.id && msg.tag == self.tag
    }

    /// Schedules the following tick, or nothing when disarmed.
    pub fn next(&self) -> Option<Cmd> {
        self.armed.then(|| self.schedule())
    }

    /// A message as this driver's current generation would send it.
    pub fn tick_msg(&self) -> TickMsg {
        TickMsg {
            id: self.id,
            tag: self.tag,
        }
    }

    fn schedule(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;
        bubbletea_tick(self.interval, move |_| Box::new(TickMsg { id, tag }) as Msg)
    }
}

impl Default for TickDriver {
    fn default() -> Self {
        Self::new()
    }
}

//! Analog stream gate
//!
//! The register side flips the gate; a periodic sampling task polls it
//! and only emits ADC events while it is open. The flag is atomic so the
//! task may run in another execution context (interrupt or executor).

use portable_atomic::{AtomicBool, Ordering};

use picoharp_hal::EventGate;

/// Atomic on/off flag for the ADC sampling event
#[derive(Debug, Default)]
pub struct StreamGate {
    enabled: AtomicBool,
}

impl StreamGate {
    /// Create a closed gate
    pub const fn new() -> Self {
        Self {
            enabled: AtomicBool::new(false),
        }
    }

    /// Check if the sampling task should emit events
    pub fn is_open(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    fn open(&self) {
        self.enabled.store(true, Ordering::Release);
    }

    fn close(&self) {
        self.enabled.store(false, Ordering::Release);
    }
}

impl EventGate for StreamGate {
    fn enable(&mut self) {
        self.open();
    }

    fn disable(&mut self) {
        self.close();
    }

    fn is_enabled(&self) -> bool {
        self.is_open()
    }
}

/// Shared handle, so the gate can live in a `static` polled by a task
impl EventGate for &StreamGate {
    fn enable(&mut self) {
        self.open();
    }

    fn disable(&mut self) {
        self.close();
    }

    fn is_enabled(&self) -> bool {
        self.is_open()
    }
}

//! Sampling event gate

/// On/off gate for a periodic sampling or streaming event
pub trait EventGate {
    /// Start emitting events
    fn enable(&mut self);

    /// Stop emitting events
    fn disable(&mut self);

    /// Check if events are currently emitted
    fn is_enabled(&self) -> bool;
}

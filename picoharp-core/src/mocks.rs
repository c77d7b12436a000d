//! Simulated peripherals for unit tests
//!
//! Each mock records the calls made on it so tests can assert exactly
//! which peripheral action a register invoked.

use heapless::Vec;
use picoharp_hal::{
    AdcChannel, DigitalInputArray, DigitalOutputArray, EventGate, PeripheralError, Pwm,
};

/// Mock input array returning a fixed bitmask
#[derive(Debug, Default)]
pub struct MockInputs {
    pub state: u8,
    pub fail: bool,
}

impl DigitalInputArray for MockInputs {
    fn state(&mut self) -> Result<u8, PeripheralError> {
        if self.fail {
            return Err(PeripheralError::Pin);
        }
        Ok(self.state)
    }
}

/// Output array call record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputCall {
    Set(u8),
    Clear(u8),
    Toggle(u8),
}

/// Mock output array tracking pin state and calls
#[derive(Debug, Default)]
pub struct MockOutputs {
    pub state: u8,
    pub calls: Vec<OutputCall, 16>,
}

impl MockOutputs {
    pub fn with_state(state: u8) -> Self {
        Self {
            state,
            calls: Vec::new(),
        }
    }
}

impl DigitalOutputArray for MockOutputs {
    fn set_state(&mut self, mask: u8) -> Result<(), PeripheralError> {
        self.state |= mask;
        let _ = self.calls.push(OutputCall::Set(mask));
        Ok(())
    }

    fn clear_state(&mut self, mask: u8) -> Result<(), PeripheralError> {
        self.state &= !mask;
        let _ = self.calls.push(OutputCall::Clear(mask));
        Ok(())
    }

    fn toggle_state(&mut self, mask: u8) -> Result<(), PeripheralError> {
        self.state ^= mask;
        let _ = self.calls.push(OutputCall::Toggle(mask));
        Ok(())
    }
}

/// Mock ADC returning a programmable sample
#[derive(Debug, Default)]
pub struct MockAdc {
    pub sample: u16,
    pub fail: bool,
    pub reads: u32,
}

impl AdcChannel for MockAdc {
    fn read_u16(&mut self) -> Result<u16, PeripheralError> {
        self.reads += 1;
        if self.fail {
            return Err(PeripheralError::Conversion);
        }
        Ok(self.sample)
    }
}

/// Mock event gate counting transitions
#[derive(Debug, Default)]
pub struct MockGate {
    pub enabled: bool,
    pub enables: u32,
    pub disables: u32,
}

impl EventGate for MockGate {
    fn enable(&mut self) {
        self.enabled = true;
        self.enables += 1;
    }

    fn disable(&mut self) {
        self.enabled = false;
        self.disables += 1;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Minimum frequency reported by the mock PWM
pub const MOCK_MIN_FREQUENCY: u16 = 8;

/// Mock PWM with a configurable minimum duty cycle
#[derive(Debug, Default)]
pub struct MockPwm<const MIN_DUTY: u8 = 0> {
    pub frequency: u16,
    pub duty: u8,
    pub enabled: bool,
    pub starts: u32,
    pub stops: u32,
}

impl<const MIN_DUTY: u8> Pwm for MockPwm<MIN_DUTY> {
    const MIN_FREQUENCY: u16 = MOCK_MIN_FREQUENCY;
    const MIN_DUTY_CYCLE: u8 = MIN_DUTY;

    fn set_frequency(&mut self, hz: u16) {
        self.frequency = hz;
    }

    fn frequency(&self) -> u16 {
        self.frequency
    }

    fn set_dutycyle(&mut self, percent: u8) {
        self.duty = percent;
    }

    fn dutycyle(&self) -> u8 {
        self.duty
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn start(&mut self) -> Result<(), PeripheralError> {
        self.enabled = true;
        self.starts += 1;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), PeripheralError> {
        self.enabled = false;
        self.stops += 1;
        Ok(())
    }
}

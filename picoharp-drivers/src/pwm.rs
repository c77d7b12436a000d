//! PWM output over an embedded-hal channel
//!
//! Frequency and duty cycle are staged and only reach the hardware when
//! the output is started. The RP2040 PWM slice runs at
//!
//! ```text
//! f = SYS_CLK / (divider * (TOP + 1))
//! ```
//!
//! with an 8.4 fixed-point divider in `1.0..=255 + 15/16` and a 16-bit
//! TOP. [`slice_config`] picks the smallest divider that fits, which
//! keeps duty cycle resolution as high as possible.

use embedded_hal::pwm::SetDutyCycle;
use picoharp_hal::{PeripheralError, Pwm, PwmClock};

/// Default RP2040 system clock
pub const SYS_CLK_HZ: u32 = 125_000_000;

/// Lowest frequency a slice reaches at `SYS_CLK_HZ` (maximum divider and TOP)
pub const MIN_FREQUENCY: u16 = 8;

/// Largest divider in 1/16 steps (255 + 15/16)
const MAX_DIVIDER_X16: u64 = (255 << 4) | 0xF;

/// Smallest divider in 1/16 steps (1.0)
const MIN_DIVIDER_X16: u64 = 1 << 4;

/// PWM slice clock settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SliceConfig {
    /// Integer part of the clock divider
    pub div_int: u8,
    /// Fractional part of the clock divider (1/16 steps)
    pub div_frac: u8,
    /// Counter wrap value
    pub top: u16,
}

/// Calculate slice divider and TOP for a target frequency
pub fn slice_config(sys_clk_hz: u32, freq_hz: u32) -> Result<SliceConfig, PeripheralError> {
    if freq_hz == 0 {
        return Err(PeripheralError::UnsupportedFrequency);
    }

    // divider * 16 = SYS_CLK * 16 / (freq * (TOP + 1)), rounded up so TOP fits
    let clk_x16 = sys_clk_hz as u64 * 16;
    let per_top = freq_hz as u64 * 65_536;
    let div_x16 = clk_x16.div_ceil(per_top).max(MIN_DIVIDER_X16);
    if div_x16 > MAX_DIVIDER_X16 {
        return Err(PeripheralError::UnsupportedFrequency);
    }

    let counts = clk_x16 / (div_x16 * freq_hz as u64);
    if counts == 0 {
        return Err(PeripheralError::UnsupportedFrequency);
    }

    Ok(SliceConfig {
        div_int: (div_x16 >> 4) as u8,
        div_frac: (div_x16 & 0xF) as u8,
        top: (counts - 1).min(u16::MAX as u64) as u16,
    })
}

/// Staged PWM output
pub struct PwmChannel<P, C> {
    channel: P,
    clock: C,
    frequency: u16,
    duty: u8,
    enabled: bool,
}

impl<P: SetDutyCycle, C: PwmClock> PwmChannel<P, C> {
    /// Create a stopped output at the minimum frequency and 0 % duty
    pub fn new(channel: P, clock: C) -> Self {
        Self {
            channel,
            clock,
            frequency: MIN_FREQUENCY,
            duty: 0,
            enabled: false,
        }
    }

    /// Release the channel and clock
    pub fn release(self) -> (P, C) {
        (self.channel, self.clock)
    }
}

impl<P: SetDutyCycle, C: PwmClock> Pwm for PwmChannel<P, C> {
    const MIN_FREQUENCY: u16 = MIN_FREQUENCY;

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
        self.clock.set_frequency_hz(u32::from(self.frequency))?;
        self.channel
            .set_duty_cycle_percent(self.duty)
            .map_err(|_| PeripheralError::Pwm)?;
        self.enabled = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), PeripheralError> {
        self.channel
            .set_duty_cycle_fully_off()
            .map_err(|_| PeripheralError::Pwm)?;
        self.enabled = false;
        Ok(())
    }
}

//! Device bring-up
//!
//! Binds one instance of every register variant to the board's
//! peripherals and exposes them as a [`RegisterMap`] under a
//! [`RegisterLayout`]. Peripherals are shared through `&RefCell` handles
//! that outlive the device; the device never creates or drops them.
//!
//! ```ignore
//! let inputs = RefCell::new(PinInputArray::new(input_pins));
//! let outputs = RefCell::new(PinOutputArray::new(output_pins));
//! // ...
//! let mut device = PicoDevice::new(Peripherals { inputs: &inputs, ... })?;
//! let mut map = device.register_map(&RegisterLayout::default())?;
//! let mut dispatcher = Dispatcher::new();
//!
//! // For each request received from the host:
//! let reply = dispatcher.handle(&mut map, request);
//! ```

use core::cell::RefCell;

use picoharp_hal::{AdcChannel, DigitalInputArray, DigitalOutputArray, EventGate, Pwm};

use crate::config::{LayoutError, RegisterLayout, LAYOUT_REGISTER_COUNT};
use crate::map::RegisterMap;
use crate::register::RegisterError;
use crate::registers::{
    AdcRegister, AnalogStreamStateRegister, DigitalInputArrayRegister,
    DigitalOutputArrayRegister, PwmDutyCycleRegister, PwmFrequencyRegister, PwmStartRegister,
    PwmStopRegister,
};

/// Shared peripheral handles a device binds to
pub struct Peripherals<'a, I, O, A, G, P> {
    pub inputs: &'a RefCell<I>,
    pub outputs: &'a RefCell<O>,
    pub adc: &'a RefCell<A>,
    pub stream: &'a RefCell<G>,
    pub pwm: &'a RefCell<P>,
}

/// Every application register of the device
pub struct PicoDevice<'a, I, O, A, G, P> {
    pub digital_inputs: DigitalInputArrayRegister<'a, I>,
    pub digital_outputs_set: DigitalOutputArrayRegister<'a, O>,
    pub digital_outputs_clear: DigitalOutputArrayRegister<'a, O>,
    pub digital_outputs_toggle: DigitalOutputArrayRegister<'a, O>,
    pub adc: AdcRegister<'a, A>,
    pub analog_stream: AnalogStreamStateRegister<'a, G>,
    pub pwm_frequency: PwmFrequencyRegister<'a, P>,
    pub pwm_duty_cycle: PwmDutyCycleRegister<'a, P>,
    pub pwm_start: PwmStartRegister<'a, P>,
    pub pwm_stop: PwmStopRegister<'a, P>,
}

impl<'a, I, O, A, G, P> PicoDevice<'a, I, O, A, G, P>
where
    I: DigitalInputArray,
    O: DigitalOutputArray,
    A: AdcChannel,
    G: EventGate,
    P: Pwm,
{
    /// Construct every register
    ///
    /// Outputs are cleared and the PWM duty cycle is forced to 0 %.
    pub fn new(peripherals: Peripherals<'a, I, O, A, G, P>) -> Result<Self, RegisterError> {
        Ok(Self {
            digital_inputs: DigitalInputArrayRegister::new(peripherals.inputs),
            digital_outputs_set: DigitalOutputArrayRegister::set(peripherals.outputs)?,
            digital_outputs_clear: DigitalOutputArrayRegister::clear(peripherals.outputs)?,
            digital_outputs_toggle: DigitalOutputArrayRegister::toggle(peripherals.outputs)?,
            adc: AdcRegister::new(peripherals.adc),
            analog_stream: AnalogStreamStateRegister::new(peripherals.stream),
            pwm_frequency: PwmFrequencyRegister::new(peripherals.pwm),
            pwm_duty_cycle: PwmDutyCycleRegister::new(peripherals.pwm)?,
            pwm_start: PwmStartRegister::new(peripherals.pwm),
            pwm_stop: PwmStopRegister::new(peripherals.pwm),
        })
    }

    /// Build a register map placing each register at its layout address
    pub fn register_map(
        &mut self,
        layout: &RegisterLayout,
    ) -> Result<RegisterMap<'_, LAYOUT_REGISTER_COUNT>, LayoutError> {
        layout.validate()?;

        let mut map = RegisterMap::new();
        map.insert(layout.digital_inputs, &mut self.digital_inputs)?;
        map.insert(layout.digital_outputs_set, &mut self.digital_outputs_set)?;
        map.insert(layout.digital_outputs_clear, &mut self.digital_outputs_clear)?;
        map.insert(layout.digital_outputs_toggle, &mut self.digital_outputs_toggle)?;
        map.insert(layout.adc, &mut self.adc)?;
        map.insert(layout.analog_stream, &mut self.analog_stream)?;
        map.insert(layout.pwm_frequency, &mut self.pwm_frequency)?;
        map.insert(layout.pwm_duty_cycle, &mut self.pwm_duty_cycle)?;
        map.insert(layout.pwm_start, &mut self.pwm_start)?;
        map.insert(layout.pwm_stop, &mut self.pwm_stop)?;
        Ok(map)
    }
}

//! Bus request dispatch
//!
//! The transport layer hands over already-framed requests: a register
//! address, the element type the host asked for, and for writes the raw
//! little-endian payload. The dispatcher resolves the address, decodes the
//! payload with the requested type and forwards the call to the register.
//!
//! Requests are handled one at a time and run to completion.

use heapless::Vec;

use crate::map::RegisterMap;
use crate::register::{Access, Register, RegisterError};
use crate::types::{decode_payload, encode_values, CodecError, RegisterType, MAX_PAYLOAD_SIZE};

/// Requested operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Operation<'p> {
    /// Read the register contents
    Read,
    /// Write the given little-endian payload
    Write(&'p [u8]),
}

/// A decoded bus request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Request<'p> {
    /// Register address
    pub address: u8,
    /// Element type the host expects
    pub register_type: RegisterType,
    /// Read or write
    pub operation: Operation<'p>,
}

impl<'p> Request<'p> {
    /// Build a read request
    pub fn read(address: u8, register_type: RegisterType) -> Self {
        Self {
            address,
            register_type,
            operation: Operation::Read,
        }
    }

    /// Build a write request
    pub fn write(address: u8, register_type: RegisterType, payload: &'p [u8]) -> Self {
        Self {
            address,
            register_type,
            operation: Operation::Write(payload),
        }
    }
}

/// Reply handed back to the transport layer for framing
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Response {
    /// Register address
    pub address: u8,
    /// Register element type
    pub register_type: RegisterType,
    /// Encoded register contents (empty for writes)
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

/// Errors from dispatching a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchError {
    /// No register at the requested address
    UnknownAddress(u8),
    /// Payload could not be split into elements of the requested type
    MalformedPayload,
    /// Register rejected the operation
    Register(RegisterError),
}

impl From<RegisterError> for DispatchError {
    fn from(e: RegisterError) -> Self {
        DispatchError::Register(e)
    }
}

impl From<CodecError> for DispatchError {
    fn from(_: CodecError) -> Self {
        DispatchError::MalformedPayload
    }
}

/// Routes requests to registers and keeps simple counters
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    handled: u32,
    rejected: u32,
}

impl Dispatcher {
    /// Create a dispatcher with zeroed counters
    pub const fn new() -> Self {
        Self {
            handled: 0,
            rejected: 0,
        }
    }

    /// Requests completed successfully
    pub fn handled(&self) -> u32 {
        self.handled
    }

    /// Requests that returned an error
    pub fn rejected(&self) -> u32 {
        self.rejected
    }

    /// Handle one request against `map`
    pub fn handle<const N: usize>(
        &mut self,
        map: &mut RegisterMap<'_, N>,
        request: Request<'_>,
    ) -> Result<Response, DispatchError> {
        let result = Self::apply(map, &request);

        match &result {
            Ok(_) => self.handled = self.handled.wrapping_add(1),
            Err(_e) => {
                self.rejected = self.rejected.wrapping_add(1);
                #[cfg(feature = "defmt")]
                log_rejection(request.address, _e);
            }
        }

        result
    }

    fn apply<const N: usize>(
        map: &mut RegisterMap<'_, N>,
        request: &Request<'_>,
    ) -> Result<Response, DispatchError> {
        let register = map
            .get_mut(request.address)
            .ok_or(DispatchError::UnknownAddress(request.address))?;

        let mut payload = Vec::new();
        match request.operation {
            Operation::Read => {
                let values = register.read(request.register_type)?;
                let mut buf = [0u8; MAX_PAYLOAD_SIZE];
                let len = encode_values(&values, &mut buf)?;
                payload
                    .extend_from_slice(&buf[..len])
                    .map_err(|_| DispatchError::MalformedPayload)?;
            }
            Operation::Write(bytes) => {
                check_write(&*register, request.register_type, bytes)?;
                let values = decode_payload(request.register_type, bytes)?;
                register.write(request.register_type, &values)?;
            }
        }

        Ok(Response {
            address: request.address,
            register_type: register.register_type(),
            payload,
        })
    }
}

/// Reject a write the register would refuse before decoding its payload
///
/// A payload that cannot be split into elements of the register's own type
/// is malformed; any other element count is a length mismatch.
fn check_write(
    register: &dyn Register,
    requested: RegisterType,
    bytes: &[u8],
) -> Result<(), DispatchError> {
    if register.access() == Access::ReadOnly {
        return Err(RegisterError::ReadOnly.into());
    }

    let expected = register.register_type();
    if requested != expected {
        return Err(RegisterError::TypeMismatch {
            expected,
            requested,
        }
        .into());
    }

    if bytes.len() % expected.width() != 0 {
        return Err(DispatchError::MalformedPayload);
    }

    let actual = bytes.len() / expected.width();
    if actual != register.len() {
        return Err(RegisterError::LengthMismatch {
            expected: register.len(),
            actual,
        }
        .into());
    }

    Ok(())
}

#[cfg(feature = "defmt")]
fn log_rejection(address: u8, error: &DispatchError) {
    match error {
        DispatchError::Register(RegisterError::Peripheral(e)) => {
            defmt::warn!("register {} peripheral fault: {}", address, e);
        }
        e => defmt::debug!("register {} rejected: {}", address, e),
    }
}

use std::fmt;

use thiserror::Error;

/// Port-mapped I/O surface the CPU calls into for IN/OUT.
///
/// The CPU knows nothing about the concrete machine behind the ports.
/// Implementations return [`PortError::Unimplemented`] for ports they do
/// not decode so the interpreter can stop and report it.
pub trait IoPort {
    fn read(&mut self, port: u8) -> Result<u8, PortError>;
    fn write(&mut self, port: u8, value: u8) -> Result<(), PortError>;
}

/// Direction of a port access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PortAccess {
    Read,
    Write,
}

impl fmt::Display for PortAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortAccess::Read => f.write_str("read"),
            PortAccess::Write => f.write_str("write"),
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PortError {
    #[error("unimplemented I/O port 0x{port:02X} ({access})")]
    Unimplemented { port: u8, access: PortAccess },
}

impl PortError {
    pub fn unimplemented_read(port: u8) -> Self {
        PortError::Unimplemented {
            port,
            access: PortAccess::Read,
        }
    }

    pub fn unimplemented_write(port: u8) -> Self {
        PortError::Unimplemented {
            port,
            access: PortAccess::Write,
        }
    }
}

/// Port space with nothing attached: every access is unimplemented.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPorts;

impl IoPort for NoPorts {
    fn read(&mut self, port: u8) -> Result<u8, PortError> {
        Err(PortError::unimplemented_read(port))
    }

    fn write(&mut self, port: u8, _value: u8) -> Result<(), PortError> {
        Err(PortError::unimplemented_write(port))
    }
}

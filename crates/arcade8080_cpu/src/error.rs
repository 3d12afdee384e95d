use thiserror::Error;

use crate::io::PortError;

/// Fatal interpreter faults. Each one stops the run loop and carries the
/// opcode and program counter of the instruction that failed.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CpuError {
    #[error("undefined opcode {opcode:02X} at {pc:04X}")]
    UndefinedOpcode { opcode: u8, pc: u16 },
    #[error("opcode {opcode:02X} at {pc:04X} failed: {source}")]
    Port {
        opcode: u8,
        pc: u16,
        #[source]
        source: PortError,
    },
}

impl CpuError {
    pub fn opcode(&self) -> u8 {
        match self {
            CpuError::UndefinedOpcode { opcode, .. } | CpuError::Port { opcode, .. } => *opcode,
        }
    }

    pub fn pc(&self) -> u16 {
        match self {
            CpuError::UndefinedOpcode { pc, .. } | CpuError::Port { pc, .. } => *pc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_fault_reports_opcode_and_pc() {
        let decode = CpuError::UndefinedOpcode {
            opcode: 0xdd,
            pc: 0x0123,
        };
        assert_eq!((decode.opcode(), decode.pc()), (0xdd, 0x0123));
        assert_eq!(decode.to_string(), "undefined opcode DD at 0123");

        let port = CpuError::Port {
            opcode: 0xdb,
            pc: 0x0040,
            source: PortError::unimplemented_read(9),
        };
        assert_eq!((port.opcode(), port.pc()), (0xdb, 0x0040));
        assert_eq!(
            port.to_string(),
            "opcode DB at 0040 failed: unimplemented I/O port 0x09 (read)"
        );
    }
}

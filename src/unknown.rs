//! # Unknown Opcode Handling
//!
//! What the CPU does with an opcode that has no table entry is a policy, not
//! hardware behavior. The CPU delegates the decision to an
//! `UnknownOpcodeHandler`, which either returns the number of cycles to
//! charge or an error that `step()` propagates.
//!
//! By the time a handler runs, the program counter has moved one byte past
//! the opcode. Handlers cannot touch registers or the bus.

use crate::ExecutionError;

/// Strategy invoked by `CPU::step()` for opcodes missing from the table.
///
/// Closures of type `FnMut(u8, u16) -> Result<u8, ExecutionError>` implement
/// this trait, which is handy for recording diagnostics in tests.
///
/// # Examples
///
/// ```
/// use tiny6502::{CPU, ExecutionError, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0x0000, 0xFF);
///
/// let mut seen = Vec::new();
/// let mut cpu = CPU::with_unknown_opcode_handler(
///     memory,
///     move |opcode: u8, addr: u16| -> Result<u8, ExecutionError> {
///         seen.push((opcode, addr));
///         Ok(5)
///     },
/// );
///
/// cpu.step().unwrap();
/// assert_eq!(cpu.cycles(), 5);
/// assert_eq!(cpu.pc(), 0x0001);
/// ```
pub trait UnknownOpcodeHandler {
    /// Handles `opcode`, fetched from `addr`.
    ///
    /// Returns the cycles to charge, or an error to stop execution.
    fn handle(&mut self, opcode: u8, addr: u16) -> Result<u8, ExecutionError>;
}

impl<F> UnknownOpcodeHandler for F
where
    F: FnMut(u8, u16) -> Result<u8, ExecutionError>,
{
    fn handle(&mut self, opcode: u8, addr: u16) -> Result<u8, ExecutionError> {
        self(opcode, addr)
    }
}

/// Default strategy: log a warning and treat the opcode as a fixed-cost no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogAndSkip {
    /// Cycles charged for each unknown opcode.
    pub penalty_cycles: u8,
}

impl LogAndSkip {
    /// Penalty used by `CPU::new()`.
    pub const DEFAULT_PENALTY: u8 = 2;
}

impl Default for LogAndSkip {
    fn default() -> Self {
        Self {
            penalty_cycles: Self::DEFAULT_PENALTY,
        }
    }
}

impl UnknownOpcodeHandler for LogAndSkip {
    fn handle(&mut self, opcode: u8, addr: u16) -> Result<u8, ExecutionError> {
        log::warn!(
            "Unknown opcode 0x{:02X} at 0x{:04X}, treating as NOP",
            opcode,
            addr
        );
        Ok(self.penalty_cycles)
    }
}

/// Strict strategy: log an error and stop with `ExecutionError::UnknownOpcode`.
///
/// No cycles are charged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Halt;

impl UnknownOpcodeHandler for Halt {
    fn handle(&mut self, opcode: u8, addr: u16) -> Result<u8, ExecutionError> {
        log::error!("Unknown opcode 0x{:02X} at 0x{:04X}, halting", opcode, addr);
        Err(ExecutionError::UnknownOpcode { opcode, addr })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_and_skip_default_penalty() {
        let mut handler = LogAndSkip::default();
        assert_eq!(handler.handle(0xFF, 0x1000), Ok(2));
    }

    #[test]
    fn test_log_and_skip_custom_penalty() {
        let mut handler = LogAndSkip { penalty_cycles: 7 };
        assert_eq!(handler.handle(0x80, 0x0000), Ok(7));
    }

    #[test]
    fn test_halt_reports_opcode_and_address() {
        let mut handler = Halt;
        assert_eq!(
            handler.handle(0xAB, 0xC000),
            Err(ExecutionError::UnknownOpcode {
                opcode: 0xAB,
                addr: 0xC000
            })
        );
    }

    #[test]
    fn test_closure_handler() {
        let mut calls = 0;
        {
            let mut handler = |_opcode: u8, _addr: u16| -> Result<u8, ExecutionError> {
                calls += 1;
                Ok(1)
            };
            assert_eq!(UnknownOpcodeHandler::handle(&mut handler, 0x10, 0x20), Ok(1));
        }
        assert_eq!(calls, 1);
    }
}

//! # tiny6502
//!
//! A small, table-driven execution core for an 8-bit CPU in the 6502 family.
//!
//! The crate provides the fetch-decode-execute engine and nothing else: CPU
//! register state, a set of addressing modes that resolve effective addresses,
//! an immutable opcode table, and a `step()` primitive that ties them together
//! while counting clock cycles. Memory and I/O live behind the `MemoryBus`
//! trait and are supplied by the caller.
//!
//! ## Quick Start
//!
//! ```rust
//! use tiny6502::{CPU, FlatMemory, MemoryBus};
//!
//! let mut memory = FlatMemory::new();
//!
//! // LDA #$42 ; STA $0200
//! memory.load(0x0000, &[0x01, 0x42, 0x03, 0x00, 0x02]);
//!
//! let mut cpu = CPU::new(memory);
//! cpu.step().unwrap();
//! cpu.step().unwrap();
//!
//! assert_eq!(cpu.a(), 0x42);
//! assert_eq!(cpu.memory().read(0x0200), 0x42);
//! assert_eq!(cpu.pc(), 0x0005);
//! assert_eq!(cpu.cycles(), 6);
//! ```
//!
//! ## Instruction Encoding
//!
//! The opcode assignments are an internal encoding and are not compatible
//! with real 6502 machine code:
//!
//! | Opcode | Name      | Mode      | Cycles |
//! |--------|-----------|-----------|--------|
//! | `0x00` | `NOP`     | Implied   | 2      |
//! | `0x01` | `LDA_IMM` | Immediate | 2      |
//! | `0x02` | `LDA_ZP`  | ZeroPage  | 3      |
//! | `0x03` | `STA_ABS` | Absolute  | 4      |
//! | `0x04` | `INC_ZPX` | ZeroPageX | 6      |
//!
//! Any other opcode is handed to the CPU's [`UnknownOpcodeHandler`]. The
//! default handler logs a warning through the `log` facade and charges a
//! 2-cycle penalty, so execution never halts on stray bytes.
//!
//! ## Modules
//!
//! - `cpu` - CPU state and the step loop
//! - `memory` - MemoryBus trait and a flat 64KB implementation
//! - `devices` - Address-range mapped RAM/ROM devices
//! - `addressing` - Addressing mode enumeration
//! - `opcodes` - Opcode table
//! - `unknown` - Strategies for opcodes missing from the table

pub mod addressing;
pub mod cpu;
pub mod devices;
pub mod memory;
pub mod opcodes;
pub mod unknown;

// Internal instruction implementations (not part of public API)
mod instructions;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export public API
pub use addressing::AddressingMode;
pub use cpu::{Registers, CPU};
pub use devices::{Device, MappedMemory, MappingError, RamDevice, RomDevice};
pub use memory::{FlatMemory, MemoryBus};
pub use opcodes::{lookup, OpcodeMetadata, Operation, OPCODE_TABLE};
pub use unknown::{Halt, LogAndSkip, UnknownOpcodeHandler};

/// Errors that can occur during CPU execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    /// The fetched opcode has no entry in the opcode table and the active
    /// unknown-opcode handler chose to stop.
    UnknownOpcode {
        /// The opcode byte that was fetched.
        opcode: u8,
        /// Address the opcode was fetched from.
        addr: u16,
    },
}

impl std::fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ExecutionError::UnknownOpcode { opcode, addr } => {
                write!(f, "Unknown opcode 0x{:02X} at 0x{:04X}", opcode, addr)
            }
        }
    }
}

impl std::error::Error for ExecutionError {}

//! # Opcode Table
//!
//! The 256-slot opcode table is the single source of truth for what each
//! opcode byte means. Slots without an instruction are `None`; the CPU routes
//! those to its unknown-opcode handler.
//!
//! The table is a `static` built at compile time and shared by every CPU
//! instance. Nothing can add, remove or alter an entry afterwards.

use crate::addressing::AddressingMode;

/// Execution behavior of an instruction, dispatched by the CPU after the
/// addressing mode has produced an effective address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// No state change.
    Nop,
    /// A <- memory[ea]
    Lda,
    /// memory[ea] <- A
    Sta,
    /// memory[ea] <- memory[ea] + 1, wrapping
    Inc,
}

/// Descriptor for a single opcode.
///
/// # Examples
///
/// ```
/// use tiny6502::{lookup, AddressingMode, Operation};
///
/// let sta = lookup(0x03).unwrap();
/// assert_eq!(sta.mnemonic, "STA_ABS");
/// assert_eq!(sta.addressing_mode, AddressingMode::Absolute);
/// assert_eq!(sta.operation, Operation::Sta);
/// assert_eq!(sta.base_cycles, 4);
/// assert_eq!(sta.size_bytes(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeMetadata {
    /// Instruction name, used for diagnostics only.
    pub mnemonic: &'static str,

    /// How the operand bytes are turned into an effective address.
    pub addressing_mode: AddressingMode,

    /// Cycles charged every time the instruction executes.
    pub base_cycles: u8,

    /// What the instruction does with the effective address.
    pub operation: Operation,
}

impl OpcodeMetadata {
    const fn new(
        mnemonic: &'static str,
        addressing_mode: AddressingMode,
        base_cycles: u8,
        operation: Operation,
    ) -> Self {
        Self {
            mnemonic,
            addressing_mode,
            base_cycles,
            operation,
        }
    }

    /// Total instruction size in bytes (opcode + operands).
    pub const fn size_bytes(&self) -> u8 {
        1 + self.addressing_mode.operand_bytes()
    }
}

/// Complete 256-entry opcode table indexed by opcode byte value.
///
/// Only 0x00-0x04 are populated; the encoding is internal to this crate and
/// does not match real 6502 machine code.
pub static OPCODE_TABLE: [Option<OpcodeMetadata>; 256] = build_table();

const fn build_table() -> [Option<OpcodeMetadata>; 256] {
    use AddressingMode::*;

    let mut table: [Option<OpcodeMetadata>; 256] = [None; 256];

    table[0x00] = Some(OpcodeMetadata::new("NOP", Implied, 2, Operation::Nop));
    table[0x01] = Some(OpcodeMetadata::new("LDA_IMM", Immediate, 2, Operation::Lda));
    table[0x02] = Some(OpcodeMetadata::new("LDA_ZP", ZeroPage, 3, Operation::Lda));
    table[0x03] = Some(OpcodeMetadata::new("STA_ABS", Absolute, 4, Operation::Sta));
    table[0x04] = Some(OpcodeMetadata::new("INC_ZPX", ZeroPageX, 6, Operation::Inc));

    table
}

/// Looks up the descriptor for `opcode`, or `None` if the slot is empty.
///
/// # Examples
///
/// ```
/// use tiny6502::lookup;
///
/// assert_eq!(lookup(0x00).map(|m| m.mnemonic), Some("NOP"));
/// assert!(lookup(0xFF).is_none());
/// ```
pub fn lookup(opcode: u8) -> Option<&'static OpcodeMetadata> {
    OPCODE_TABLE[opcode as usize].as_ref()
}

//! # Addressing Modes
//!
//! This module defines the addressing modes understood by the CPU. Each mode
//! determines how many operand bytes follow the opcode and how the effective
//! address is computed from them. Resolution itself happens on the CPU
//! (see `CPU::effective_address`) because it needs the program counter, the
//! index registers and the bus.

/// Addressing mode enumeration.
///
/// Every mode resolves to a 16-bit effective address and advances the program
/// counter past exactly the operand bytes it consumes.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implied
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX
/// - **2 bytes**: Absolute, AbsoluteX
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// No operand. Resolves to 0x0000 without touching the bus.
    ///
    /// Example: NOP
    Implied,

    /// The operand byte itself. Resolves to the address of the operand
    /// (the current PC); the instruction reads the value from there.
    ///
    /// Example: LDA_IMM #$10
    Immediate,

    /// 8-bit address in zero page (0x00-0xFF).
    ///
    /// Example: LDA_ZP $80 (load from address 0x0080)
    ZeroPage,

    /// Zero page address indexed by X, wrapping within zero page.
    ///
    /// Example: INC_ZPX $F0 with X = 0x20 touches 0x0010, not 0x0110
    ZeroPageX,

    /// Full 16-bit address, little-endian.
    ///
    /// Example: STA_ABS $0200 (encoded as 0x00 0x02)
    Absolute,

    /// 16-bit address plus X, with full 16-bit wrapping addition.
    ///
    /// No page-crossing penalty is modelled.
    AbsoluteX,
}

impl AddressingMode {
    /// Number of operand bytes this mode consumes after the opcode.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiny6502::AddressingMode;
    ///
    /// assert_eq!(AddressingMode::Implied.operand_bytes(), 0);
    /// assert_eq!(AddressingMode::ZeroPageX.operand_bytes(), 1);
    /// assert_eq!(AddressingMode::Absolute.operand_bytes(), 2);
    /// ```
    pub const fn operand_bytes(self) -> u8 {
        match self {
            AddressingMode::Implied => 0,
            AddressingMode::Immediate | AddressingMode::ZeroPage | AddressingMode::ZeroPageX => 1,
            AddressingMode::Absolute | AddressingMode::AbsoluteX => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FlatMemory, MemoryBus, CPU};

    fn cpu_with(bytes: &[u8]) -> CPU<FlatMemory> {
        let mut memory = FlatMemory::new();
        memory.load(0x0300, bytes);
        let mut cpu = CPU::new(memory);
        cpu.set_pc(0x0300);
        cpu
    }

    #[test]
    fn test_implied_touches_nothing() {
        let mut cpu = cpu_with(&[0xAB]);
        assert_eq!(cpu.effective_address(AddressingMode::Implied), 0x0000);
        assert_eq!(cpu.pc(), 0x0300);
    }

    #[test]
    fn test_immediate_returns_pc() {
        let mut cpu = cpu_with(&[0xAB]);
        assert_eq!(cpu.effective_address(AddressingMode::Immediate), 0x0300);
        assert_eq!(cpu.pc(), 0x0301);
    }

    #[test]
    fn test_zero_page_zero_extends() {
        let mut cpu = cpu_with(&[0xFE]);
        assert_eq!(cpu.effective_address(AddressingMode::ZeroPage), 0x00FE);
        assert_eq!(cpu.pc(), 0x0301);
    }

    #[test]
    fn test_zero_page_x_wraps() {
        let mut cpu = cpu_with(&[0xF0]);
        cpu.set_x(0x20);
        assert_eq!(cpu.effective_address(AddressingMode::ZeroPageX), 0x0010);
        assert_eq!(cpu.pc(), 0x0301);
    }

    #[test]
    fn test_absolute_is_little_endian() {
        let mut cpu = cpu_with(&[0x34, 0x12]);
        assert_eq!(cpu.effective_address(AddressingMode::Absolute), 0x1234);
        assert_eq!(cpu.pc(), 0x0302);
    }

    #[test]
    fn test_absolute_x_carries_into_high_byte() {
        let mut cpu = cpu_with(&[0xFF, 0x12]);
        cpu.set_x(0x01);
        assert_eq!(cpu.effective_address(AddressingMode::AbsoluteX), 0x1300);
        assert_eq!(cpu.pc(), 0x0302);
    }

    #[test]
    fn test_absolute_x_wraps_at_top_of_memory() {
        let mut cpu = cpu_with(&[0xFF, 0xFF]);
        cpu.set_x(0x02);
        assert_eq!(cpu.effective_address(AddressingMode::AbsoluteX), 0x0001);
    }

    #[test]
    fn test_absolute_operand_wraps_past_ffff() {
        let mut memory = FlatMemory::new();
        memory.write(0xFFFF, 0x78);
        memory.write(0x0000, 0x56);
        let mut cpu = CPU::new(memory);
        cpu.set_pc(0xFFFF);

        assert_eq!(cpu.effective_address(AddressingMode::Absolute), 0x5678);
        assert_eq!(cpu.pc(), 0x0001);
    }

    #[test]
    fn test_operand_bytes_match_pc_advance() {
        let modes = [
            AddressingMode::Implied,
            AddressingMode::Immediate,
            AddressingMode::ZeroPage,
            AddressingMode::ZeroPageX,
            AddressingMode::Absolute,
            AddressingMode::AbsoluteX,
        ];

        for mode in modes {
            let mut cpu = cpu_with(&[0x10, 0x20]);
            cpu.effective_address(mode);
            assert_eq!(
                cpu.pc(),
                0x0300 + mode.operand_bytes() as u16,
                "{:?} advanced PC by the wrong amount",
                mode
            );
        }
    }
}

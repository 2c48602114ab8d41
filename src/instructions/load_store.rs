//! # Load and Store Instructions
//!
//! This module implements load and store operations:
//! - LDA: Load Accumulator
//! - STA: Store Accumulator
//!
//! Neither touches the status register.

use crate::{MemoryBus, CPU};

/// Executes the LDA (Load Accumulator) instruction.
///
/// Loads the byte at the effective address into the accumulator. For the
/// immediate form the effective address is the operand byte itself.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU
/// * `addr` - Effective address resolved by the addressing mode
pub(crate) fn execute_lda<M: MemoryBus>(cpu: &mut CPU<M>, addr: u16) {
    cpu.a = cpu.memory.read(addr);
}

/// Executes the STA (Store Accumulator) instruction.
///
/// Writes the accumulator to the effective address.
pub(crate) fn execute_sta<M: MemoryBus>(cpu: &mut CPU<M>, addr: u16) {
    cpu.memory.write(addr, cpu.a);
}

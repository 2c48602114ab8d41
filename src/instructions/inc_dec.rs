//! # Increment Instructions
//!
//! - INC: Increment Memory

use crate::{MemoryBus, CPU};

/// Executes the INC (Increment Memory) instruction.
///
/// Read-modify-write: reads the byte at the effective address, adds one
/// with 8-bit wraparound (0xFF becomes 0x00) and writes it back. Flags are
/// left alone.
pub(crate) fn execute_inc<M: MemoryBus>(cpu: &mut CPU<M>, addr: u16) {
    let value = cpu.memory.read(addr);
    cpu.memory.write(addr, value.wrapping_add(1));
}

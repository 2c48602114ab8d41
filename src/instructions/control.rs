//! # Control Instructions
//!
//! - NOP: No Operation

use crate::{MemoryBus, CPU};

/// Executes the NOP (No Operation) instruction.
///
/// Changes nothing. The opcode byte has already been consumed and the base
/// cycles are charged by the caller.
pub(crate) fn execute_nop<M: MemoryBus>(_cpu: &mut CPU<M>, _addr: u16) {}

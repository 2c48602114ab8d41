//! # Instruction Implementations
//!
//! Each instruction is a standalone function taking the CPU and the effective
//! address already resolved by the addressing mode. By the time these run the
//! program counter points past the whole instruction, so none of them touch it.
//! Cycle accounting also stays in `CPU::step()`.
//!
//! ## Categories
//!
//! - **control**: NOP
//! - **load_store**: LDA, STA
//! - **inc_dec**: INC

pub mod control;
pub mod inc_dec;
pub mod load_store;

use crate::{MemoryBus, Operation, CPU};

/// Runs `operation` against `addr`.
pub(crate) fn execute<M: MemoryBus>(cpu: &mut CPU<M>, operation: Operation, addr: u16) {
    match operation {
        Operation::Nop => control::execute_nop(cpu, addr),
        Operation::Lda => load_store::execute_lda(cpu, addr),
        Operation::Sta => load_store::execute_sta(cpu, addr),
        Operation::Inc => inc_dec::execute_inc(cpu, addr),
    }
}

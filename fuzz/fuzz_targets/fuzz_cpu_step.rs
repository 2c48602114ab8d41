//! Fuzz target for CPU step execution.
//!
//! Builds an arbitrary register state and a window of memory around PC,
//! runs a handful of steps and checks the invariants every step must keep.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tiny6502::{lookup, FlatMemory, MemoryBus, CPU};

/// Arbitrary CPU initial state for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    status: u8,
    pc: u16,
}

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    /// Bytes placed at PC (instruction stream)
    program: [u8; 32],
    /// Zero page contents
    zero_page: [u8; 256],
    steps: u8,
}

fuzz_target!(|input: FuzzInput| {
    let mut memory = FlatMemory::new();
    memory.load(0x0000, &input.zero_page);
    memory.load(input.cpu_state.pc, &input.program);

    let mut cpu = CPU::new(memory);
    cpu.set_a(input.cpu_state.a);
    cpu.set_x(input.cpu_state.x);
    cpu.set_y(input.cpu_state.y);
    cpu.set_sp(input.cpu_state.sp);
    cpu.set_status(input.cpu_state.status);
    cpu.set_pc(input.cpu_state.pc);

    for _ in 0..(input.steps % 16) {
        let before = cpu.registers();
        let opcode = cpu.memory().read(before.pc);

        // Default handler never fails
        assert!(cpu.step().is_ok());

        let after = cpu.registers();
        let size = lookup(opcode).map_or(1, |m| m.size_bytes());
        let cost = lookup(opcode).map_or(2, |m| m.base_cycles);

        assert_eq!(after.pc, before.pc.wrapping_add(size as u16));
        assert_eq!(after.cycles, before.cycles + cost as u64);

        // Reserved registers are never touched
        assert_eq!(after.y, before.y);
        assert_eq!(after.sp, before.sp);
        assert_eq!(after.status, before.status);
        assert_eq!(after.x, before.x);
    }
});

//! Mapped machine example
//!
//! Builds a small machine from devices: 2KB of RAM at the bottom of the
//! address space and an 8KB program ROM at 0xE000. Runs the program for a
//! fixed cycle budget with a strict unknown-opcode policy.

use tiny6502::{Halt, MappedMemory, MemoryBus, RamDevice, RomDevice, CPU};

fn main() {
    env_logger::init();

    println!("tiny6502 - Mapped Machine Example");
    println!("=================================\n");

    // Counts zero-page byte $10 up a few times, then copies it to $0300.
    let mut rom = vec![0x00; 0x2000];
    let program = [
        0x04, 0x10, // INC_ZPX $10,X
        0x04, 0x10, // INC_ZPX $10,X
        0x04, 0x10, // INC_ZPX $10,X
        0x02, 0x10, // LDA_ZP  $10
        0x03, 0x00, 0x03, // STA_ABS $0300
        0xFF, // unknown: halts under the strict policy
    ];
    rom[..program.len()].copy_from_slice(&program);

    let mut memory = MappedMemory::new();
    if let Err(e) = memory.add_device(0x0000, Box::new(RamDevice::new(0x0800))) {
        eprintln!("Failed to map RAM: {}", e);
        return;
    }
    if let Err(e) = memory.add_device(0xE000, Box::new(RomDevice::new(rom))) {
        eprintln!("Failed to map ROM: {}", e);
        return;
    }

    let mut cpu = CPU::with_unknown_opcode_handler(memory, Halt);
    cpu.set_pc(0xE000);

    match cpu.run_for_cycles(1_000) {
        Ok(cycles) => println!("Budget used up after {} cycles", cycles),
        Err(e) => println!("Stopped: {}", e),
    }

    println!("  A:      0x{:02X}", cpu.a());
    println!("  PC:     0x{:04X}", cpu.pc());
    println!("  Cycles: {}", cpu.cycles());
    println!("  $0010:  0x{:02X}", cpu.memory().read(0x0010));
    println!("  $0300:  0x{:02X}", cpu.memory().read(0x0300));
    println!("  $0800:  0x{:02X} (unmapped)", cpu.memory().read(0x0800));
}

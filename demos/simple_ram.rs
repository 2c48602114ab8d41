//! Simple RAM example
//!
//! Demonstrates basic CPU construction and execution with FlatMemory.
//!
//! This example shows:
//! - Loading a program into 64KB flat memory
//! - Stepping the CPU and inspecting state after each instruction
//! - An unknown opcode being logged and skipped
//!
//! Run with `RUST_LOG=trace cargo run --example simple_ram` to see the
//! per-instruction trace.

use tiny6502::{lookup, FlatMemory, MemoryBus, CPU};

fn main() {
    env_logger::init();

    println!("tiny6502 - Simple RAM Example");
    println!("=============================\n");

    let mut memory = FlatMemory::new();

    // 0x0000: LDA_IMM #$41
    // 0x0002: STA_ABS $0200
    // 0x0005: INC_ZPX $FE,X   (X = 2 -> $0000, the LDA opcode byte)
    // 0x0007: 0xFF            (unknown, skipped)
    // 0x0008: LDA_ZP $00
    // 0x000A: NOP
    let program = [
        0x01, 0x41, 0x03, 0x00, 0x02, 0x04, 0xFE, 0xFF, 0x02, 0x00, 0x00,
    ];
    memory.load(0x0000, &program);
    println!("Loaded {} bytes at 0x0000\n", program.len());

    let mut cpu = CPU::new(memory);
    cpu.set_x(0x02);

    println!("Initial state: {:?}\n", cpu.registers());

    for step in 1..=6 {
        let pc_before = cpu.pc();
        let opcode = cpu.memory().read(pc_before);
        let name = lookup(opcode).map_or("???", |m| m.mnemonic);

        if let Err(e) = cpu.step() {
            println!("Step {}: stopped: {}", step, e);
            break;
        }

        println!(
            "Step {}: 0x{:04X}  {:02X} {:<7} -> A=0x{:02X} PC=0x{:04X} cycles={}",
            step,
            pc_before,
            opcode,
            name,
            cpu.a(),
            cpu.pc(),
            cpu.cycles()
        );
    }

    println!();
    println!("Memory at 0x0200: 0x{:02X}", cpu.memory().read(0x0200));
    println!("Memory at 0x0000: 0x{:02X}", cpu.memory().read(0x0000));
    println!("\nExample complete!");
}

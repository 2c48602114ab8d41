//! Unknown opcode handling tests
//!
//! Verifies that opcodes missing from the table never crash the CPU, are
//! charged the configured penalty, leave registers alone and produce a
//! diagnostic.

use std::sync::{Mutex, Once};

use log::{Level, LevelFilter, Log, Metadata, Record};
use tiny6502::{ExecutionError, FlatMemory, Halt, LogAndSkip, MemoryBus, Registers, CPU};

/// Logger that keeps every record so tests can look for diagnostics.
struct CaptureLogger;

static RECORDS: Mutex<Vec<(Level, String)>> = Mutex::new(Vec::new());
static LOGGER: CaptureLogger = CaptureLogger;
static INIT: Once = Once::new();

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        RECORDS
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

fn capture_logs() {
    INIT.call_once(|| {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(LevelFilter::Trace);
    });
}

fn logged(level: Level, needle: &str) -> bool {
    RECORDS
        .lock()
        .unwrap()
        .iter()
        .any(|(l, msg)| *l == level && msg.contains(needle))
}

/// Helper function to create a CPU with `opcode` at `pc`
fn setup_cpu(pc: u16, opcode: u8) -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(pc, opcode);
    let mut cpu = CPU::new(memory);
    cpu.set_pc(pc);
    cpu
}

#[test]
fn test_unknown_opcode_skipped() {
    let mut cpu = setup_cpu(0x0600, 0xFF);

    assert_eq!(cpu.step(), Ok(()));

    assert_eq!(cpu.pc(), 0x0601);
    assert_eq!(cpu.cycles(), 2);
}

#[test]
fn test_unknown_opcode_no_register_mutation() {
    let mut cpu = setup_cpu(0x0700, 0xEA);
    cpu.set_a(0x01);
    cpu.set_x(0x02);
    cpu.set_y(0x03);
    cpu.set_sp(0x04);
    cpu.set_status(0x05);

    cpu.step().unwrap();

    assert_eq!(
        cpu.registers(),
        Registers {
            a: 0x01,
            x: 0x02,
            y: 0x03,
            sp: 0x04,
            status: 0x05,
            pc: 0x0701,
            cycles: 2,
        }
    );
}

#[test]
fn test_unknown_opcode_does_not_consume_operands() {
    let mut cpu = setup_cpu(0x0800, 0xA9);

    // What would be an operand is executed as the next instruction
    cpu.memory_mut().write(0x0801, 0x01);
    cpu.memory_mut().write(0x0802, 0x33);

    cpu.step().unwrap();
    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x33);
    assert_eq!(cpu.pc(), 0x0803);
    assert_eq!(cpu.cycles(), 4);
}

#[test]
fn test_unknown_opcode_logs_warning() {
    capture_logs();
    let mut cpu = setup_cpu(0x1234, 0xFE);

    cpu.step().unwrap();

    assert!(
        logged(Level::Warn, "0xFE at 0x1234"),
        "Expected a warning naming the opcode and its address"
    );
}

#[test]
fn test_custom_penalty() {
    let mut memory = FlatMemory::new();
    memory.write(0x0000, 0x80);

    let mut cpu = CPU::with_unknown_opcode_handler(memory, LogAndSkip { penalty_cycles: 7 });
    cpu.step().unwrap();

    assert_eq!(cpu.cycles(), 7);
    assert_eq!(cpu.pc(), 0x0001);
}

#[test]
fn test_halt_handler() {
    capture_logs();
    let mut memory = FlatMemory::new();
    memory.write(0x2000, 0x99);

    let mut cpu = CPU::with_unknown_opcode_handler(memory, Halt);
    cpu.set_pc(0x2000);

    assert_eq!(
        cpu.step(),
        Err(ExecutionError::UnknownOpcode {
            opcode: 0x99,
            addr: 0x2000
        })
    );
    assert_eq!(cpu.pc(), 0x2001);
    assert_eq!(cpu.cycles(), 0);
    assert!(logged(Level::Error, "0x99 at 0x2000"));
}

#[test]
fn test_closure_handler_sees_fetch_address() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let mut memory = FlatMemory::new();
    memory.load(0x0300, &[0x00, 0x10, 0x00, 0x11]);

    let mut cpu = CPU::with_unknown_opcode_handler(
        memory,
        move |opcode: u8, addr: u16| -> Result<u8, ExecutionError> {
            sink.borrow_mut().push((opcode, addr));
            Ok(1)
        },
    );
    cpu.set_pc(0x0300);

    for _ in 0..4 {
        cpu.step().unwrap();
    }

    assert_eq!(*seen.borrow(), vec![(0x10, 0x0301), (0x11, 0x0303)]);
    assert_eq!(cpu.cycles(), 2 + 1 + 2 + 1);
}

#[test]
fn test_handler_can_be_swapped() {
    let mut memory = FlatMemory::new();
    memory.load(0x0000, &[0xFF, 0xFF]);

    let mut cpu = CPU::new(memory);
    cpu.step().unwrap();

    cpu.set_unknown_opcode_handler(Halt);
    assert!(cpu.step().is_err());
    assert_eq!(cpu.cycles(), 2);
    assert_eq!(cpu.pc(), 0x0002);
}

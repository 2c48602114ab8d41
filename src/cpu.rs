//! # CPU State and Execution
//!
//! This module contains the CPU struct and the fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: Accumulator (A), index registers (X, Y)
//! - **Program counter** (PC): 16-bit address of the next byte to fetch
//! - **Stack pointer** (SP): reserved, no instruction touches it yet
//! - **Status register** (P): reserved, no instruction reads or writes it yet
//! - **Cycle counter**: u64, never decreases
//!
//! Everything starts at zero. There is no reset vector.
//!
//! ## Execution Model
//!
//! - `step()`: fetch one opcode, resolve its operand, execute, charge cycles
//! - `run_for_cycles()`: step until a cycle budget is used up
//!
//! A `step()` runs to completion synchronously; there is no externally
//! visible decode state.

use crate::addressing::AddressingMode;
use crate::instructions;
use crate::opcodes::{OpcodeMetadata, OPCODE_TABLE};
use crate::unknown::{LogAndSkip, UnknownOpcodeHandler};
use crate::{ExecutionError, MemoryBus};

/// Snapshot of every piece of observable CPU state.
///
/// Two CPUs that start from equal snapshots and equal memory and execute the
/// same program produce equal snapshots after every step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Registers {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub status: u8,
    pub pc: u16,
    pub cycles: u64,
}

/// CPU state and execution context.
///
/// The CPU owns its memory bus, its registers and a reference to the shared,
/// read-only opcode table. It is generic over the memory implementation via
/// the `MemoryBus` trait.
///
/// # Type Parameters
///
/// * `M` - Memory bus implementation (must implement `MemoryBus` trait)
///
/// # Examples
///
/// ```
/// use tiny6502::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.load(0x0000, &[0x02, 0x10]); // LDA_ZP $10
/// memory.write(0x0010, 0x99);
///
/// let mut cpu = CPU::new(memory);
/// cpu.step().unwrap();
///
/// assert_eq!(cpu.a(), 0x99);
/// assert_eq!(cpu.pc(), 0x0002);
/// assert_eq!(cpu.cycles(), 3);
/// ```
pub struct CPU<M: MemoryBus> {
    /// Accumulator register
    pub(crate) a: u8,

    /// X index register
    pub(crate) x: u8,

    /// Y index register
    pub(crate) y: u8,

    /// Stack pointer
    pub(crate) sp: u8,

    /// Status register (NV-BDIZC)
    pub(crate) status: u8,

    /// Program counter (address of next byte to fetch)
    pub(crate) pc: u16,

    /// Total CPU cycles executed
    pub(crate) cycles: u64,

    /// Memory bus implementation
    pub(crate) memory: M,

    table: &'static [Option<OpcodeMetadata>; 256],

    unknown_opcode: Box<dyn UnknownOpcodeHandler>,
}

impl<M: MemoryBus> CPU<M> {
    /// Creates a new CPU with the given memory bus.
    ///
    /// All registers, the status byte, the program counter and the cycle
    /// counter start at zero. Unknown opcodes are logged and skipped with a
    /// 2-cycle penalty (see [`LogAndSkip`]).
    ///
    /// # Examples
    ///
    /// ```
    /// use tiny6502::{CPU, FlatMemory};
    ///
    /// let cpu = CPU::new(FlatMemory::new());
    /// assert_eq!(cpu.pc(), 0x0000);
    /// assert_eq!(cpu.cycles(), 0);
    /// ```
    pub fn new(memory: M) -> Self {
        Self::with_unknown_opcode_handler(memory, LogAndSkip::default())
    }

    /// Creates a new CPU that routes unknown opcodes to `handler`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiny6502::{CPU, ExecutionError, FlatMemory, Halt, MemoryBus};
    ///
    /// let mut memory = FlatMemory::new();
    /// memory.write(0x0000, 0xFF);
    ///
    /// let mut cpu = CPU::with_unknown_opcode_handler(memory, Halt);
    /// assert_eq!(
    ///     cpu.step(),
    ///     Err(ExecutionError::UnknownOpcode { opcode: 0xFF, addr: 0x0000 })
    /// );
    /// ```
    pub fn with_unknown_opcode_handler<H>(memory: M, handler: H) -> Self
    where
        H: UnknownOpcodeHandler + 'static,
    {
        Self {
            a: 0x00,
            x: 0x00,
            y: 0x00,
            sp: 0x00,
            status: 0x00,
            pc: 0x0000,
            cycles: 0,
            memory,
            table: &OPCODE_TABLE,
            unknown_opcode: Box::new(handler),
        }
    }

    /// Replaces the unknown-opcode handler.
    pub fn set_unknown_opcode_handler<H>(&mut self, handler: H)
    where
        H: UnknownOpcodeHandler + 'static,
    {
        self.unknown_opcode = Box::new(handler);
    }

    /// Executes one instruction and advances the CPU state.
    ///
    /// Performs the fetch-decode-execute cycle:
    /// 1. Fetch opcode byte at current PC
    /// 2. Advance PC past the opcode
    /// 3. Look up the opcode in the opcode table
    /// 4. Resolve the effective address (may read operands and advance PC)
    /// 5. Execute the instruction against the effective address
    /// 6. Add the instruction's base cycles to the cycle counter
    ///
    /// If the opcode has no table entry, the unknown-opcode handler decides
    /// the outcome. PC has moved past the opcode only and no register changes.
    ///
    /// # Returns
    ///
    /// - `Ok(())` for every known opcode, and for unknown opcodes under the
    ///   default handler
    /// - `Err(ExecutionError)` only if the unknown-opcode handler returns one
    ///
    /// # Examples
    ///
    /// ```
    /// use tiny6502::{CPU, FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0x0000, 0xFF); // not in the opcode table
    ///
    /// let mut cpu = CPU::new(mem);
    /// cpu.step().unwrap();
    ///
    /// assert_eq!(cpu.pc(), 0x0001);
    /// assert_eq!(cpu.cycles(), 2);
    /// ```
    pub fn step(&mut self) -> Result<(), ExecutionError> {
        // Fetch
        let opcode_addr = self.pc;
        let opcode = self.memory.read(opcode_addr);
        self.pc = self.pc.wrapping_add(1);

        // Decode
        let Some(metadata) = self.table[opcode as usize] else {
            let penalty = self.unknown_opcode.handle(opcode, opcode_addr)?;
            self.add_cycles(penalty as u64);
            return Ok(());
        };

        // Execute
        let addr = self.effective_address(metadata.addressing_mode);
        log::trace!(
            "{:04X}  {:<7} ea={:04X}",
            opcode_addr,
            metadata.mnemonic,
            addr
        );
        instructions::execute(self, metadata.operation, addr);

        self.add_cycles(metadata.base_cycles as u64);

        Ok(())
    }

    /// Runs the CPU for a specified number of cycles.
    ///
    /// Executes instructions until the cycle budget is exhausted or an error
    /// occurs. Returns the number of cycles actually consumed, which may
    /// exceed the budget by part of one instruction.
    ///
    /// An unknown-opcode handler that charges zero cycles can keep this loop
    /// from making progress on memory with no valid opcodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiny6502::{CPU, FlatMemory};
    ///
    /// // Zeroed memory is an endless run of 2-cycle NOPs
    /// let mut cpu = CPU::new(FlatMemory::new());
    ///
    /// assert_eq!(cpu.run_for_cycles(9).unwrap(), 10);
    /// assert_eq!(cpu.pc(), 0x0005);
    /// ```
    pub fn run_for_cycles(&mut self, cycle_budget: u64) -> Result<u64, ExecutionError> {
        let start_cycles = self.cycles;
        let target_cycles = start_cycles.saturating_add(cycle_budget);

        while self.cycles < target_cycles {
            self.step()?;
        }

        Ok(self.cycles - start_cycles)
    }

    /// Resolves the effective address for `mode`.
    ///
    /// Reads operand bytes at PC through the bus and leaves PC on the first
    /// byte after them. `Implied` returns 0 and reads nothing. `Immediate`
    /// returns the address of the operand byte rather than its value.
    pub fn effective_address(&mut self, mode: AddressingMode) -> u16 {
        match mode {
            AddressingMode::Implied => 0x0000,
            AddressingMode::Immediate => {
                let addr = self.pc;
                self.pc = self.pc.wrapping_add(1);
                addr
            }
            AddressingMode::ZeroPage => self.fetch_byte() as u16,
            // Index stays inside zero page: no carry into the high byte
            AddressingMode::ZeroPageX => self.fetch_byte().wrapping_add(self.x) as u16,
            AddressingMode::Absolute => self.fetch_word(),
            AddressingMode::AbsoluteX => self.fetch_word().wrapping_add(self.x as u16),
        }
    }

    fn fetch_byte(&mut self) -> u8 {
        let value = self.memory.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        value
    }

    fn fetch_word(&mut self) -> u16 {
        let low = self.fetch_byte() as u16;
        let high = self.fetch_byte() as u16;
        (high << 8) | low
    }

    fn add_cycles(&mut self, cycles: u64) {
        self.cycles = self.cycles.saturating_add(cycles);
    }

    // ========== Register Getters ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Returns the stack pointer value.
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Returns the status register byte.
    pub fn status(&self) -> u8 {
        self.status
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the total number of CPU cycles executed since construction.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Returns a snapshot of all registers and the cycle counter.
    pub fn registers(&self) -> Registers {
        Registers {
            a: self.a,
            x: self.x,
            y: self.y,
            sp: self.sp,
            status: self.status,
            pc: self.pc,
            cycles: self.cycles,
        }
    }

    // ========== Register Setters ==========

    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    pub fn set_status(&mut self, value: u8) {
        self.status = value;
    }

    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    /// Sets the cycle counter. Intended for test setup only.
    pub fn set_cycles(&mut self, value: u64) {
        self.cycles = value;
    }

    // ========== Memory Access ==========

    /// Returns a shared reference to the memory bus.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Returns a mutable reference to the memory bus.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    /// Consumes the CPU and hands back its memory bus.
    pub fn into_memory(self) -> M {
        self.memory
    }
}

impl<M: MemoryBus> std::fmt::Debug for CPU<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CPU")
            .field("registers", &self.registers())
            .finish_non_exhaustive()
    }
}

//! # Memory Bus Abstraction
//!
//! The CPU reaches every byte of memory and I/O through the `MemoryBus`
//! trait. The core never implements a bus itself; callers supply one.
//! This module also ships `FlatMemory`, a plain 64KB RAM used by tests,
//! demos and the fuzz target.
//!
//! ## Contract
//!
//! - Exactly two operations: `read` and `write`, both keyed by a 16-bit address
//! - No error signalling: accesses always complete
//! - What happens at unmapped or read-only addresses (wrap, mirror, ignore)
//!   is the implementation's business, not the CPU's

/// Memory bus trait for CPU to read/write bytes.
///
/// # Design
///
/// - `read(&self)`: reads have no side effects visible to the core
/// - `write(&mut self)`: mutable reference makes side effects explicit
/// - No error types: the CPU never retries or catches bus failures
///
/// # Examples
///
/// ```
/// use tiny6502::MemoryBus;
///
/// /// 256 bytes mirrored across the whole address space.
/// struct MirroredPage {
///     data: [u8; 256],
/// }
///
/// impl MemoryBus for MirroredPage {
///     fn read(&self, addr: u16) -> u8 {
///         self.data[(addr & 0x00FF) as usize]
///     }
///
///     fn write(&mut self, addr: u16, value: u8) {
///         self.data[(addr & 0x00FF) as usize] = value;
///     }
/// }
///
/// let mut page = MirroredPage { data: [0; 256] };
/// page.write(0x1234, 0x42);
/// assert_eq!(page.read(0x0034), 0x42);
/// ```
pub trait MemoryBus {
    /// Reads a byte from the specified 16-bit address.
    ///
    /// Must never panic; unmapped addresses may return any value.
    fn read(&self, addr: u16) -> u8;

    /// Writes a byte to the specified 16-bit address.
    ///
    /// Must never panic; implementations may ignore writes to read-only or
    /// unmapped addresses.
    fn write(&mut self, addr: u16, value: u8);
}

/// Simple 64KB flat memory implementation.
///
/// All 65536 addresses map to a single zero-initialised RAM array.
///
/// # Examples
///
/// ```
/// use tiny6502::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0x0000, 0x01); // LDA_IMM
/// memory.write(0x0001, 0x7F);
///
/// let mut cpu = CPU::new(memory);
/// cpu.step().unwrap();
/// assert_eq!(cpu.a(), 0x7F);
/// ```
#[derive(Clone)]
pub struct FlatMemory {
    data: Box<[u8; 0x10000]>,
}

impl FlatMemory {
    /// Creates a new FlatMemory instance with all bytes initialized to zero.
    pub fn new() -> Self {
        Self {
            data: Box::new([0; 0x10000]),
        }
    }

    /// Copies `bytes` into memory starting at `start`.
    ///
    /// Addresses past 0xFFFF wrap around to 0x0000.
    ///
    /// # Examples
    ///
    /// ```
    /// use tiny6502::{FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.load(0xFFFF, &[0xAA, 0xBB]);
    /// assert_eq!(mem.read(0xFFFF), 0xAA);
    /// assert_eq!(mem.read(0x0000), 0xBB);
    /// ```
    pub fn load(&mut self, start: u16, bytes: &[u8]) {
        let mut addr = start;
        for &byte in bytes {
            self.data[addr as usize] = byte;
            addr = addr.wrapping_add(1);
        }
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for FlatMemory {
    fn read(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.data[addr as usize] = value;
    }
}

//! Address-range mapped devices.
//!
//! `MappedMemory` is a `MemoryBus` built from independent devices, each
//! occupying a contiguous range of the 16-bit address space. It is one
//! possible bus for the CPU; the core itself does not depend on it.
//!
//! # Example
//!
//! ```rust
//! use tiny6502::{CPU, MappedMemory, MemoryBus, RamDevice, RomDevice};
//!
//! let mut memory = MappedMemory::new();
//!
//! // Zero page and stack RAM at 0x0000-0x01FF
//! memory.add_device(0x0000, Box::new(RamDevice::new(0x0200))).unwrap();
//!
//! // Program ROM at 0xF000: LDA_IMM #$07 ; STA_ABS $0010
//! let program = vec![0x01, 0x07, 0x03, 0x10, 0x00];
//! memory.add_device(0xF000, Box::new(RomDevice::new(program))).unwrap();
//!
//! let mut cpu = CPU::new(memory);
//! cpu.set_pc(0xF000);
//! cpu.step().unwrap();
//! cpu.step().unwrap();
//!
//! assert_eq!(cpu.memory().read(0x0010), 0x07);
//! ```

use crate::MemoryBus;

pub mod ram;
pub mod rom;

pub use ram::RamDevice;
pub use rom::RomDevice;

/// A piece of hardware occupying a contiguous address range.
///
/// Devices see offsets relative to their own base address, never absolute
/// addresses, so the same device can be mapped anywhere.
pub trait Device {
    /// Reads the byte at `offset` (0 to size-1).
    fn read(&self, offset: u16) -> u8;

    /// Writes `value` at `offset` (0 to size-1).
    fn write(&mut self, offset: u16, value: u8);

    /// Number of bytes this device occupies.
    fn size(&self) -> u16;
}

/// Error returned when a device cannot be mapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// The requested range intersects a device that is already mapped.
    Overlap {
        /// Base address requested for the new device
        base: u16,
        /// Size of the new device
        size: u16,
        /// Base address of the device already occupying part of the range
        existing_base: u16,
        /// Size of that device
        existing_size: u16,
    },
}

impl std::fmt::Display for MappingError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            MappingError::Overlap {
                base,
                size,
                existing_base,
                existing_size,
            } => write!(
                f,
                "Device at 0x{:04X} (+0x{:X}) overlaps device at 0x{:04X} (+0x{:X})",
                base, size, existing_base, existing_size
            ),
        }
    }
}

impl std::error::Error for MappingError {}

struct Mapping {
    base: u16,
    device: Box<dyn Device>,
}

impl Mapping {
    /// Exclusive end of the range as a u32 so a device reaching 0xFFFF fits.
    fn end(&self) -> u32 {
        self.base as u32 + self.device.size() as u32
    }

    fn offset_of(&self, addr: u16) -> Option<u16> {
        let addr32 = addr as u32;
        if addr32 >= self.base as u32 && addr32 < self.end() {
            Some(addr - self.base)
        } else {
            None
        }
    }
}

/// Bus that routes each access to the device mapped at that address.
///
/// Reads from unmapped addresses return the open-bus value (0xFF); writes to
/// unmapped addresses are dropped.
pub struct MappedMemory {
    mappings: Vec<Mapping>,
    open_bus: u8,
}

impl MappedMemory {
    /// Value returned for reads that hit no device.
    pub const OPEN_BUS: u8 = 0xFF;

    /// Creates an empty map. Every address reads as 0xFF.
    pub fn new() -> Self {
        Self {
            mappings: Vec::new(),
            open_bus: Self::OPEN_BUS,
        }
    }

    /// Maps `device` at `base`, occupying `base..base + device.size()`.
    ///
    /// # Errors
    ///
    /// Returns `MappingError::Overlap` if any byte of the range is already
    /// taken. The map is left unchanged in that case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tiny6502::{MappedMemory, MappingError, RamDevice};
    ///
    /// let mut memory = MappedMemory::new();
    /// memory.add_device(0x0000, Box::new(RamDevice::new(0x1000))).unwrap();
    ///
    /// let clash = memory.add_device(0x0800, Box::new(RamDevice::new(0x100)));
    /// assert!(matches!(clash, Err(MappingError::Overlap { existing_base: 0x0000, .. })));
    /// ```
    pub fn add_device(&mut self, base: u16, device: Box<dyn Device>) -> Result<(), MappingError> {
        let new = Mapping { base, device };

        if let Some(existing) = self
            .mappings
            .iter()
            .find(|m| (new.base as u32) < m.end() && new.end() > m.base as u32)
        {
            return Err(MappingError::Overlap {
                base,
                size: new.device.size(),
                existing_base: existing.base,
                existing_size: existing.device.size(),
            });
        }

        self.mappings.push(new);
        Ok(())
    }

    /// Number of mapped devices.
    pub fn device_count(&self) -> usize {
        self.mappings.len()
    }
}

impl Default for MappedMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for MappedMemory {
    fn read(&self, addr: u16) -> u8 {
        self.mappings
            .iter()
            .find_map(|m| m.offset_of(addr).map(|offset| m.device.read(offset)))
            .unwrap_or(self.open_bus)
    }

    fn write(&mut self, addr: u16, value: u8) {
        for mapping in &mut self.mappings {
            if let Some(offset) = mapping.offset_of(addr) {
                mapping.device.write(offset, value);
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Device whose every byte reads back as its own offset.
    struct Probe {
        size: u16,
    }

    impl Probe {
        fn new(size: u16) -> Self {
            Self { size }
        }
    }

    impl Device for Probe {
        fn read(&self, offset: u16) -> u8 {
            offset as u8
        }

        fn write(&mut self, _offset: u16, _value: u8) {}

        fn size(&self) -> u16 {
            self.size
        }
    }

    #[test]
    fn test_empty_map_reads_open_bus() {
        let memory = MappedMemory::new();
        assert_eq!(memory.read(0x0000), 0xFF);
        assert_eq!(memory.read(0xFFFF), 0xFF);
    }

    #[test]
    fn test_device_sees_relative_offsets() {
        let mut memory = MappedMemory::new();
        memory.add_device(0x4000, Box::new(Probe::new(0x100))).unwrap();

        assert_eq!(memory.read(0x4000), 0x00);
        assert_eq!(memory.read(0x4012), 0x12);
        assert_eq!(memory.read(0x40FF), 0xFF);
        assert_eq!(memory.read(0x4100), 0xFF); // unmapped
    }

    #[test]
    fn test_device_at_top_of_memory() {
        let mut memory = MappedMemory::new();
        memory.add_device(0xFF00, Box::new(Probe::new(0x100))).unwrap();

        assert_eq!(memory.read(0xFFFF), 0xFF);
        assert_eq!(memory.read(0xFF7F), 0x7F);
        assert_eq!(memory.read(0xFEFF), 0xFF); // open bus below the device
    }

    #[test]
    fn test_overlap_rejected() {
        let mut memory = MappedMemory::new();
        memory.add_device(0x1000, Box::new(Probe::new(0x100))).unwrap();

        assert!(memory.add_device(0x10FF, Box::new(Probe::new(1))).is_err());
        assert!(memory.add_device(0x0F01, Box::new(Probe::new(0x100))).is_err());
        assert_eq!(memory.device_count(), 1);
    }

    #[test]
    fn test_adjacent_devices_allowed() {
        let mut memory = MappedMemory::new();
        memory.add_device(0x1000, Box::new(Probe::new(0x100))).unwrap();

        assert!(memory.add_device(0x0F00, Box::new(Probe::new(0x100))).is_ok());
        assert!(memory.add_device(0x1100, Box::new(Probe::new(0x100))).is_ok());
        assert_eq!(memory.device_count(), 3);
    }

    #[test]
    fn test_unmapped_write_dropped() {
        let mut memory = MappedMemory::new();
        memory.write(0x2000, 0x42);
        assert_eq!(memory.read(0x2000), 0xFF);
    }

    #[test]
    fn test_mapping_error_display() {
        let err = MappingError::Overlap {
            base: 0x1080,
            size: 0x100,
            existing_base: 0x1000,
            existing_size: 0x100,
        };
        assert_eq!(
            err.to_string(),
            "Device at 0x1080 (+0x100) overlaps device at 0x1000 (+0x100)"
        );
    }
}

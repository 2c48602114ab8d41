//! Read-only memory device.

use super::Device;

/// ROM holding a fixed image. Writes are ignored.
///
/// # Examples
///
/// ```rust
/// use tiny6502::{Device, RomDevice};
///
/// let mut rom = RomDevice::new(vec![0x01, 0x42]);
/// rom.write(0, 0xFF);
/// assert_eq!(rom.read(0), 0x01);
/// ```
pub struct RomDevice {
    data: Vec<u8>,
}

impl RomDevice {
    /// Creates a ROM from `data`. Images longer than 0xFFFF bytes are
    /// truncated.
    pub fn new(mut data: Vec<u8>) -> Self {
        data.truncate(u16::MAX as usize);
        Self { data }
    }
}

impl Device for RomDevice {
    fn read(&self, offset: u16) -> u8 {
        self.data.get(offset as usize).copied().unwrap_or(0xFF)
    }

    fn write(&mut self, _offset: u16, _value: u8) {}

    fn size(&self) -> u16 {
        self.data.len() as u16
    }
}

//! Read/write RAM device.

use super::Device;

/// Zero-initialised RAM of a fixed size.
///
/// # Examples
///
/// ```rust
/// use tiny6502::{Device, RamDevice};
///
/// let mut ram = RamDevice::new(0x100);
/// ram.write(0x42, 0xAA);
/// assert_eq!(ram.read(0x42), 0xAA);
/// assert_eq!(ram.size(), 0x100);
/// ```
pub struct RamDevice {
    data: Vec<u8>,
}

impl RamDevice {
    /// Creates `size` bytes of RAM, all zero.
    pub fn new(size: u16) -> Self {
        Self {
            data: vec![0; size as usize],
        }
    }

    /// Copies `bytes` into RAM starting at `offset`.
    ///
    /// Bytes that would land past the end of the device are dropped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tiny6502::{Device, RamDevice};
    ///
    /// let mut ram = RamDevice::new(4);
    /// ram.load_bytes(2, &[0x01, 0x02, 0x03]);
    ///
    /// assert_eq!(ram.read(2), 0x01);
    /// assert_eq!(ram.read(3), 0x02);
    /// ```
    pub fn load_bytes(&mut self, offset: u16, bytes: &[u8]) {
        let start = (offset as usize).min(self.data.len());
        let len = bytes.len().min(self.data.len() - start);
        self.data[start..start + len].copy_from_slice(&bytes[..len]);
    }
}

impl Device for RamDevice {
    fn read(&self, offset: u16) -> u8 {
        self.data.get(offset as usize).copied().unwrap_or(0)
    }

    fn write(&mut self, offset: u16, value: u8) {
        if let Some(cell) = self.data.get_mut(offset as usize) {
            *cell = value;
        }
    }

    fn size(&self) -> u16 {
        self.data.len() as u16
    }
}

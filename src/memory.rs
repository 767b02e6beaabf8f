//! Flat 64 KiB address space. No banking, no MMIO decoding beyond the
//! serial side-channel test ROMs rely on.

use crate::bus::Bus;
use log::trace;

const SERIAL_DATA: u16 = 0xFF01;
const SERIAL_CONTROL: u16 = 0xFF02;
const SERIAL_TRANSFER_START: u8 = 0x81;

pub struct Memory {
    ram: [u8; 65536],
}

impl Default for Memory {
    fn default() -> Self {
        Self { ram: [0; 65536] }
    }
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies up to 64 KiB of `data` into RAM starting at address 0.
    /// Larger images are truncated; shorter ones leave the remainder zeroed.
    pub fn load_cartridge(&mut self, data: &[u8]) {
        let len = data.len().min(self.ram.len());
        self.ram[..len].copy_from_slice(&data[..len]);
        if data.len() > self.ram.len() {
            log::warn!(
                "cartridge image is {} bytes, truncating to {} bytes",
                data.len(),
                self.ram.len()
            );
        }
    }

    pub fn read(&self, addr: u16) -> u8 {
        self.ram[addr as usize]
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        self.ram[addr as usize] = value;
    }

    /// Services whatever transaction is currently on the bus: a pending
    /// write is committed to RAM, otherwise the addressed byte is latched
    /// onto the data bus for the CPU to read next tick.
    pub fn tick(&mut self, bus: &mut Bus) {
        let addr = bus.read_addr();
        if bus.write_pending() {
            let value = bus.read_data();
            self.write(addr, value);
            bus.clear_write_pending();
            if addr == SERIAL_CONTROL && value == SERIAL_TRANSFER_START {
                let byte = self.read(SERIAL_DATA);
                print!("{}", byte as char);
                use std::io::Write;
                let _ = std::io::stdout().flush();
            }
        } else {
            let value = self.read(addr);
            trace!("memory read {:#06x} -> {:#04x}", addr, value);
            bus.fill_data(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_cartridge_truncates_and_zero_pads() {
        let mut mem = Memory::new();
        let data = vec![0xAAu8; 70000];
        mem.load_cartridge(&data);
        assert_eq!(mem.read(0), 0xAA);
        assert_eq!(mem.read(65535), 0xAA);

        let mut mem2 = Memory::new();
        mem2.load_cartridge(&[0x11, 0x22]);
        assert_eq!(mem2.read(0), 0x11);
        assert_eq!(mem2.read(1), 0x22);
        assert_eq!(mem2.read(2), 0);
    }

    #[test]
    fn tick_services_read_then_write() {
        let mut mem = Memory::new();
        mem.write(0x1000, 0x42);
        let mut bus = Bus::new();
        bus.write_addr(0x1000);
        mem.tick(&mut bus);
        assert_eq!(bus.read_data(), 0x42);

        bus.write_addr(0x2000);
        bus.write_data(0x99);
        mem.tick(&mut bus);
        assert!(!bus.write_pending());
        assert_eq!(mem.read(0x2000), 0x99);
    }

    #[test]
    fn serial_side_channel_reads_ff01_on_ff02_0x81() {
        let mut mem = Memory::new();
        mem.write(0xFF01, b'A');
        let mut bus = Bus::new();
        bus.write_addr(SERIAL_CONTROL);
        bus.write_data(SERIAL_TRANSFER_START);
        mem.tick(&mut bus);
        assert_eq!(mem.read(SERIAL_CONTROL), SERIAL_TRANSFER_START);
    }
}

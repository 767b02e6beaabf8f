//! Wires a `Bus`, `Memory`, and `Cpu` into the alternating tick loop the
//! cycle-accurate core requires. This is the seam the driver binary sits
//! on top of; see `app::main` for cartridge loading, signal handling, and
//! logging.

use crate::bus::Bus;
use crate::cpu::Cpu;
use crate::memory::Memory;

pub struct Machine {
    bus: Bus,
    memory: Memory,
    cpu: Cpu,
}

impl Default for Machine {
    fn default() -> Self {
        Self {
            bus: Bus::new(),
            memory: Memory::new(),
            cpu: Cpu::new(),
        }
    }
}

impl Machine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_cartridge(&mut self, data: &[u8]) {
        self.memory.load_cartridge(data);
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// One machine cycle: the CPU tick must precede the Memory tick, since
    /// the CPU's Bus transaction from this cycle is the one Memory services.
    pub fn tick(&mut self) {
        self.cpu.tick(&mut self.bus);
        self.memory.tick(&mut self.bus);
    }

    /// Runs until the CPU halts, hits a fatal error, or `should_continue`
    /// returns false. Returns the CPU's fatal error message, if any.
    pub fn run(&mut self, mut should_continue: impl FnMut() -> bool) -> Option<String> {
        while !self.cpu.is_stopped() && self.cpu.fatal_error().is_none() && should_continue() {
            self.tick();
        }
        self.cpu.fatal_error().map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_then_return_restores_pc_and_sp() {
        let mut rom = vec![0u8; 0x200];
        // CALL 0x0108
        rom[0x0100] = 0xCD;
        rom[0x0101] = 0x08;
        rom[0x0102] = 0x01;
        // filler NOP at 0x0103 so the post-RET pc is distinctive
        rom[0x0103] = 0x00;
        // RET at 0x0108
        rom[0x0108] = 0xC9;

        let mut m = Machine::new();
        m.load_cartridge(&rom);
        for _ in 0..2000 {
            if m.cpu().pc() == 0x0103 && m.cpu().sp() == 0xFFFE {
                break;
            }
            m.tick();
        }
        assert_eq!(m.cpu().pc(), 0x0103);
        assert_eq!(m.cpu().sp(), 0xFFFE);
    }
}

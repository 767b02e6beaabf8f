//! Rotate/shift helpers shared by the non-prefixed A-only opcodes
//! (RLCA/RRCA/RLA/RRA, in ops_control.rs) and the prefixed `0xCB 0x00-0x3F`
//! table. Also hosts the prefixed-table dispatcher, including the
//! `0x40-0xFF` (BIT/RES/SET) stub this core does not model.

use super::{CpuResult, FLAG_C, FLAG_H, FLAG_N, FLAG_Z};
use crate::bus::Bus;
use crate::cpu::Cpu;

impl Cpu {
    fn finish_rot(&mut self, result: u8, carry: bool) -> u8 {
        self.set_flag(FLAG_Z, result == 0);
        self.set_flag(FLAG_N, false);
        self.set_flag(FLAG_H, false);
        self.set_flag(FLAG_C, carry);
        result
    }

    pub(crate) fn rlc(&mut self, value: u8) -> u8 {
        let carry = value & 0x80 != 0;
        let result = value.rotate_left(1);
        self.finish_rot(result, carry)
    }

    pub(crate) fn rrc(&mut self, value: u8) -> u8 {
        let carry = value & 0x01 != 0;
        let result = value.rotate_right(1);
        self.finish_rot(result, carry)
    }

    pub(crate) fn rl(&mut self, value: u8) -> u8 {
        let carry_in = self.flag(FLAG_C) as u8;
        let carry_out = value & 0x80 != 0;
        let result = (value << 1) | carry_in;
        self.finish_rot(result, carry_out)
    }

    pub(crate) fn rr(&mut self, value: u8) -> u8 {
        let carry_in = (self.flag(FLAG_C) as u8) << 7;
        let carry_out = value & 0x01 != 0;
        let result = (value >> 1) | carry_in;
        self.finish_rot(result, carry_out)
    }

    fn sla(&mut self, value: u8) -> u8 {
        let carry = value & 0x80 != 0;
        let result = value << 1;
        self.finish_rot(result, carry)
    }

    fn sra(&mut self, value: u8) -> u8 {
        let carry = value & 0x01 != 0;
        let result = (value >> 1) | (value & 0x80);
        self.finish_rot(result, carry)
    }

    fn swap(&mut self, value: u8) -> u8 {
        let result = value.rotate_left(4);
        self.finish_rot(result, false)
    }

    fn srl(&mut self, value: u8) -> u8 {
        let carry = value & 0x01 != 0;
        let result = value >> 1;
        self.finish_rot(result, carry)
    }

    /// Applies the prefixed-table family selected by bits 7..3 of `byte1`.
    fn apply_rot_shift(&mut self, op: u8, value: u8) -> u8 {
        match op {
            0 => self.rlc(value),
            1 => self.rrc(value),
            2 => self.rl(value),
            3 => self.rr(value),
            4 => self.sla(value),
            5 => self.sra(value),
            6 => self.swap(value),
            7 => self.srl(value),
            _ => unreachable!(),
        }
    }
}

/// Register-operand rotate/shift, e.g. `CB 00` (RLC B). Runs entirely on
/// the one cycle the prefix dispatcher hands it (`remaining == 1`).
pub(crate) fn step_cb_reg(cpu: &mut Cpu, _bus: &mut Bus) -> CpuResult<u8> {
    let op = (cpu.byte1 >> 3) & 0x07;
    let reg = cpu.byte1 & 0x07;
    let value = cpu.reg8(reg);
    let result = cpu.apply_rot_shift(op, value);
    cpu.set_reg8(reg, result);
    Ok(0)
}

/// `(HL)`-operand rotate/shift, e.g. `CB 06` (RLC (HL)). 3 more machine
/// cycles beyond the prefix fetch: read, modify-and-post-write, idle.
pub(crate) fn step_cb_hlp(cpu: &mut Cpu, bus: &mut Bus) -> CpuResult<u8> {
    match cpu.remaining {
        1 => {
            bus.write_addr(cpu.hl());
            Ok(3)
        }
        3 => {
            let op = (cpu.byte1 >> 3) & 0x07;
            let value = bus.read_data();
            let result = cpu.apply_rot_shift(op, value);
            bus.write_addr(cpu.hl());
            bus.write_data(result);
            Ok(2)
        }
        _ => Ok(0),
    }
}

/// Dispatches a latched `byte1` to the register or `(HL)` rotate/shift
/// step. Stored as the `step` for prefixed table entries `0x00-0x3F`.
pub(crate) fn step_cb_dispatch(cpu: &mut Cpu, bus: &mut Bus) -> CpuResult<u8> {
    if cpu.byte1 & 0x07 == 6 {
        step_cb_hlp(cpu, bus)
    } else {
        step_cb_reg(cpu, bus)
    }
}

/// `BIT`/`RES`/`SET` (prefixed `0x40-0xFF`): outside this core's modeled
/// opcode space. Reported the same way as any other unimplemented opcode.
pub(crate) fn step_cb_unimplemented(_cpu: &mut Cpu, _bus: &mut Bus) -> CpuResult<u8> {
    Err("unimplemented prefixed opcode".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::Memory;

    fn run_to_completion(cpu: &mut Cpu, mem: &mut Memory, bus: &mut Bus) {
        loop {
            cpu.tick(bus);
            mem.tick(bus);
            if cpu.remaining == 0 {
                break;
            }
        }
    }

    #[test]
    fn swap_a_takes_two_cycles_and_clears_flags() {
        let mut cpu = Cpu::new();
        let mut mem = Memory::new();
        mem.write(0x0100, 0xCB);
        mem.write(0x0101, 0x37); // SWAP A
        cpu.a = 0xAB;
        let mut bus = Bus::new();

        cpu.tick(&mut bus);
        mem.tick(&mut bus); // prime
        run_to_completion(&mut cpu, &mut mem, &mut bus);

        assert_eq!(cpu.a, 0xBA);
        assert!(!cpu.flag(FLAG_Z));
        assert!(!cpu.flag(FLAG_N));
        assert!(!cpu.flag(FLAG_H));
        assert!(!cpu.flag(FLAG_C));
    }

    #[test]
    fn double_swap_is_identity() {
        let mut cpu = Cpu::new();
        let mut mem = Memory::new();
        mem.write(0x0100, 0xCB);
        mem.write(0x0101, 0x37);
        mem.write(0x0102, 0xCB);
        mem.write(0x0103, 0x37);
        cpu.a = 0x5C;
        let mut bus = Bus::new();

        cpu.tick(&mut bus);
        mem.tick(&mut bus);
        run_to_completion(&mut cpu, &mut mem, &mut bus);
        run_to_completion(&mut cpu, &mut mem, &mut bus);
        assert_eq!(cpu.a, 0x5C);
    }
}

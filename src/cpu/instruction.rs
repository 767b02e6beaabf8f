//! The primary and prefixed opcode tables: a total mapping from opcode
//! byte to an instruction step plus a mnemonic used for fatal-error
//! logging. Built once, as a lazily-initialized static, the way the rest
//! of this core prefers table lookups over long match statements at the
//! dispatch site.

use super::ops_alu::*;
use super::ops_control::*;
use super::ops_load::*;
use super::ops_rot_shift::*;
use crate::bus::Bus;
use crate::cpu::{Cpu, CpuResult};
use lazy_static::lazy_static;

pub type StepFn = fn(&mut Cpu, &mut Bus) -> CpuResult<u8>;

#[derive(Clone, Copy)]
pub struct OpEntry {
    pub mnemonic: &'static str,
    pub step: StepFn,
}

impl Default for OpEntry {
    fn default() -> Self {
        Self {
            mnemonic: "???",
            step: step_unimplemented,
        }
    }
}

// Opcode blocks below decode register/condition bits out of the index
// itself, so keeping them as index-based ranges (rather than iterators
// over table slices) matches how the blocks are actually specified.
#[allow(clippy::needless_range_loop)]
fn build_primary() -> [OpEntry; 256] {
    let mut t = [OpEntry::default(); 256];

    t[0x00] = OpEntry { mnemonic: "NOP", step: step_nop };
    for opcode in [0x01usize, 0x11, 0x21, 0x31] {
        t[opcode] = OpEntry { mnemonic: "LD rr,d16", step: step_ld_rr_d16 };
    }
    for opcode in [0x02usize, 0x12, 0x22, 0x32] {
        t[opcode] = OpEntry { mnemonic: "LD (rr),A", step: step_ld_rrp_a };
    }
    for opcode in [0x03usize, 0x13, 0x23, 0x33] {
        t[opcode] = OpEntry { mnemonic: "INC rr", step: step_inc_dec_rr };
    }
    for opcode in [0x0Busize, 0x1B, 0x2B, 0x3B] {
        t[opcode] = OpEntry { mnemonic: "DEC rr", step: step_inc_dec_rr };
    }
    for opcode in [0x09usize, 0x19, 0x29, 0x39] {
        t[opcode] = OpEntry { mnemonic: "ADD HL,rr", step: step_add_hl_rr };
    }
    for opcode in [0x0Ausize, 0x1A, 0x2A, 0x3A] {
        t[opcode] = OpEntry { mnemonic: "LD A,(rr)", step: step_ld_a_rrp };
    }
    // 8-bit INC/DEC r, LD r,d8 for the 7 plain-register rows (B,C,D,E,H,L,A);
    // (HL) row (0x34/0x35/0x36) is filled separately below.
    for row in 0..8usize {
        if row == 6 {
            continue;
        }
        let inc = row * 8 + 4;
        let dec = row * 8 + 5;
        let ldd8 = row * 8 + 6;
        t[inc] = OpEntry { mnemonic: "INC r", step: step_inc_dec_r };
        t[dec] = OpEntry { mnemonic: "DEC r", step: step_inc_dec_r };
        t[ldd8] = OpEntry { mnemonic: "LD r,d8", step: step_ld_r_d8 };
    }
    t[0x34] = OpEntry { mnemonic: "INC (HL)", step: step_inc_dec_hlp };
    t[0x35] = OpEntry { mnemonic: "DEC (HL)", step: step_inc_dec_hlp };
    t[0x36] = OpEntry { mnemonic: "LD (HL),d8", step: step_ld_hlp_d8 };

    t[0x07] = OpEntry { mnemonic: "RLCA", step: step_rlca };
    t[0x0F] = OpEntry { mnemonic: "RRCA", step: step_rrca };
    t[0x17] = OpEntry { mnemonic: "RLA", step: step_rla };
    t[0x1F] = OpEntry { mnemonic: "RRA", step: step_rra };
    t[0x08] = OpEntry { mnemonic: "LD (a16),SP", step: step_ld_a16_sp };
    t[0x10] = OpEntry { mnemonic: "STOP", step: step_stop };
    t[0x18] = OpEntry { mnemonic: "JR r8", step: step_jr };
    t[0x27] = OpEntry { mnemonic: "DAA", step: step_daa };
    t[0x2F] = OpEntry { mnemonic: "CPL", step: step_cpl };
    t[0x37] = OpEntry { mnemonic: "SCF", step: step_scf };
    t[0x3F] = OpEntry { mnemonic: "CCF", step: step_ccf };
    for opcode in [0x20usize, 0x28, 0x30, 0x38] {
        t[opcode] = OpEntry { mnemonic: "JR cc,r8", step: step_jr_cc };
    }

    // 0x40-0x7F: LD r,r' block, with 0x76 carved out as HALT.
    for opcode in 0x40usize..=0x7F {
        if opcode == 0x76 {
            t[opcode] = OpEntry { mnemonic: "HALT", step: step_halt };
            continue;
        }
        let src = opcode & 0x07;
        let dst = (opcode >> 3) & 0x07;
        t[opcode] = if src == 6 {
            OpEntry { mnemonic: "LD r,(HL)", step: step_ld_r_hlp }
        } else if dst == 6 {
            OpEntry { mnemonic: "LD (HL),r", step: step_ld_hlp_r }
        } else {
            OpEntry { mnemonic: "LD r,r'", step: step_ld_r_r }
        };
    }

    // 0x80-0xBF: ALU A,r block.
    for opcode in 0x80usize..=0xBF {
        let reg = opcode & 0x07;
        t[opcode] = if reg == 6 {
            OpEntry { mnemonic: "ALU A,(HL)", step: step_alu_a_hlp }
        } else {
            OpEntry { mnemonic: "ALU A,r", step: step_alu_a_r }
        };
    }

    for opcode in [0xC0usize, 0xC8, 0xD0, 0xD8] {
        t[opcode] = OpEntry { mnemonic: "RET cc", step: step_ret_cc };
    }
    for opcode in [0xC1usize, 0xD1, 0xE1, 0xF1] {
        t[opcode] = OpEntry { mnemonic: "POP rr", step: step_pop_rr };
    }
    for opcode in [0xC5usize, 0xD5, 0xE5, 0xF5] {
        t[opcode] = OpEntry { mnemonic: "PUSH rr", step: step_push_rr };
    }
    for opcode in [0xC2usize, 0xCA, 0xD2, 0xDA] {
        t[opcode] = OpEntry { mnemonic: "JP cc,a16", step: step_jp_cc };
    }
    for opcode in [0xC4usize, 0xCC, 0xD4, 0xDC] {
        t[opcode] = OpEntry { mnemonic: "CALL cc,a16", step: step_call_cc };
    }
    for opcode in [0xC6usize, 0xCE, 0xD6, 0xDE, 0xE6, 0xEE, 0xF6, 0xFE] {
        t[opcode] = OpEntry { mnemonic: "ALU A,d8", step: step_alu_a_d8 };
    }
    for opcode in [0xC7usize, 0xCF, 0xD7, 0xDF, 0xE7, 0xEF, 0xF7, 0xFF] {
        t[opcode] = OpEntry { mnemonic: "RST n", step: step_rst };
    }
    t[0xC3] = OpEntry { mnemonic: "JP a16", step: step_jp };
    t[0xC9] = OpEntry { mnemonic: "RET", step: step_ret };
    t[0xCB] = OpEntry { mnemonic: "PREFIX CB", step: step_prefix_cb };
    t[0xCD] = OpEntry { mnemonic: "CALL a16", step: step_call };
    t[0xD9] = OpEntry { mnemonic: "RETI", step: step_reti };
    t[0xE0] = OpEntry { mnemonic: "LDH (a8),A", step: step_ldh_a8_a };
    t[0xE2] = OpEntry { mnemonic: "LD (C),A", step: step_ld_cp_a };
    t[0xE8] = OpEntry { mnemonic: "ADD SP,r8", step: step_add_sp_r8 };
    t[0xE9] = OpEntry { mnemonic: "JP (HL)", step: step_jp_hl };
    t[0xEA] = OpEntry { mnemonic: "LD (a16),A", step: step_ld_a16_a };
    t[0xF0] = OpEntry { mnemonic: "LDH A,(a8)", step: step_ldh_a_a8 };
    t[0xF2] = OpEntry { mnemonic: "LD A,(C)", step: step_ld_a_cp };
    t[0xF3] = OpEntry { mnemonic: "DI", step: step_di };
    t[0xF8] = OpEntry { mnemonic: "LD HL,SP+r8", step: step_ld_hl_sp_r8 };
    t[0xF9] = OpEntry { mnemonic: "LD SP,HL", step: step_ld_sp_hl };
    t[0xFA] = OpEntry { mnemonic: "LD A,(a16)", step: step_ld_a_a16 };
    t[0xFB] = OpEntry { mnemonic: "EI", step: step_ei };

    t
}

#[allow(clippy::needless_range_loop)]
fn build_prefixed() -> [OpEntry; 256] {
    let mut t = [OpEntry::default(); 256];
    for opcode in 0x00usize..=0x3F {
        t[opcode] = OpEntry { mnemonic: "rotate/shift", step: step_cb_dispatch };
    }
    for opcode in 0x40usize..=0xFF {
        t[opcode] = OpEntry { mnemonic: "BIT/RES/SET", step: step_cb_unimplemented };
    }
    t
}

lazy_static! {
    pub static ref PRIMARY_INSTRUCTIONS: [OpEntry; 256] = build_primary();
    pub static ref PREFIXED_INSTRUCTIONS: [OpEntry; 256] = build_prefixed();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_primary_opcode_has_an_entry() {
        // Sanity check on totality; undefined opcodes are intercepted
        // before the table lookup, so they are allowed to remain at the
        // unimplemented-stub default here.
        assert_eq!(PRIMARY_INSTRUCTIONS.len(), 256);
        assert_eq!(PREFIXED_INSTRUCTIONS.len(), 256);
    }

    #[test]
    fn cb_40_is_unimplemented() {
        assert_eq!(PREFIXED_INSTRUCTIONS[0x40].mnemonic, "BIT/RES/SET");
    }
}

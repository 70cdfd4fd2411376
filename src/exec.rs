//! Per-format execute dispatch.
//!
//! `execute` is a pure function of the committed [`State`] and [`Memory`]:
//! it never mutates either, it only describes the change as a
//! [`StateDelta`]. The cycle driver in [`crate::simulator`] is the only
//! thing that commits a delta, which is what gives the "instructions
//! never observe partial updates from one another" guarantee for free.

use crate::decode::{BranchOp, Instr, LoadOp, RegImmOp, RegRegOp, StoreOp};
use crate::memory::{Memory, Wordsize};
use crate::state::State;

/// Register a0 in the standard RISC-V calling convention; this is where
/// the ECALL syscall number convention used here expects its argument.
const REG_A0: u8 = 10;
const SYSCALL_TERMINATE: u32 = 10;

#[derive(Debug, Clone, Copy)]
pub struct MemWrite {
    pub addr: u32,
    pub value: u32,
    pub width: Wordsize,
}

/// Describes the effect of executing one instruction. At most one
/// register write and one memory write ever occur per instruction in
/// this instruction set.
#[derive(Debug, Clone, Copy, Default)]
pub struct StateDelta {
    pub reg_write: Option<(u8, u32)>,
    pub mem_write: Option<MemWrite>,
    pub pc_next: Option<u32>,
    pub terminate: bool,
}

impl StateDelta {
    fn reg(rd: u8, value: u32) -> Self {
        Self {
            reg_write: Some((rd, value)),
            ..Default::default()
        }
    }

    fn jump(rd: u8, link: u32, target: u32) -> Self {
        Self {
            reg_write: Some((rd, link)),
            pc_next: Some(target),
            ..Default::default()
        }
    }

    fn branch_to(target: u32) -> Self {
        Self {
            pc_next: Some(target),
            ..Default::default()
        }
    }

    fn terminate() -> Self {
        Self {
            terminate: true,
            ..Default::default()
        }
    }
}

pub fn execute(state: &State, memory: &Memory, instr: Instr, pc: u32) -> StateDelta {
    match instr {
        Instr::RegReg { op, rd, rs1, rs2 } => exec_reg_reg(state, op, rd, rs1, rs2),
        Instr::RegImm { op, rd, rs1, imm } => exec_reg_imm(state, op, rd, rs1, imm),
        Instr::Load { op, rd, rs1, offset } => exec_load(state, memory, op, rd, rs1, offset),
        Instr::Store { op, rs1, rs2, offset } => exec_store(state, op, rs1, rs2, offset),
        Instr::Branch { op, rs1, rs2, offset } => exec_branch(state, op, rs1, rs2, offset, pc),
        Instr::Jal { rd, offset } => {
            let target = (pc as i64 + offset as i64) as u32;
            StateDelta::jump(rd, pc.wrapping_add(4), target)
        }
        Instr::Jalr { rd, rs1, offset } => {
            let base = state.read_register(rs1);
            let target = (base as i64 + offset as i64) as u32 & !1;
            StateDelta::jump(rd, pc.wrapping_add(4), target)
        }
        Instr::Lui { rd, imm } => StateDelta::reg(rd, imm),
        Instr::Ecall => {
            if state.read_register(REG_A0) == SYSCALL_TERMINATE {
                StateDelta::terminate()
            } else {
                StateDelta::default()
            }
        }
        Instr::Nop => StateDelta::default(),
    }
}

fn exec_reg_reg(state: &State, op: RegRegOp, rd: u8, rs1: u8, rs2: u8) -> StateDelta {
    let a = state.read_register(rs1);
    let b = state.read_register(rs2);
    let result = match op {
        RegRegOp::Add => a.wrapping_add(b),
        RegRegOp::Sub => a.wrapping_sub(b),
        RegRegOp::Or => a | b,
        RegRegOp::And => a & b,
    };
    StateDelta::reg(rd, result)
}

fn exec_reg_imm(state: &State, op: RegImmOp, rd: u8, rs1: u8, imm: i32) -> StateDelta {
    let a = state.read_register(rs1);
    let result = match op {
        RegImmOp::Addi => a.wrapping_add(imm as u32),
        RegImmOp::Xori => a ^ (imm as u32),
        RegImmOp::Ori => a | (imm as u32),
        RegImmOp::Andi => a & (imm as u32),
        RegImmOp::Slli => a << (imm as u32 & 0x1f),
        RegImmOp::Srli => a >> (imm as u32 & 0x1f),
        // Arithmetic (sign-propagating) shift, as the ISA specifies: the
        // naive logical-shift implementation of SRAI is a known bug in
        // the reference this simulator replaces.
        RegImmOp::Srai => ((a as i32) >> (imm as u32 & 0x1f)) as u32,
    };
    StateDelta::reg(rd, result)
}

fn exec_load(
    state: &State,
    memory: &Memory,
    op: LoadOp,
    rd: u8,
    rs1: u8,
    offset: i32,
) -> StateDelta {
    let addr = state.read_register(rs1).wrapping_add(offset as u32);
    let value = match op {
        LoadOp::Lb => memory.read_byte(addr) as i8 as i32 as u32,
        LoadOp::Lh => memory.read_half(addr) as i16 as i32 as u32,
        LoadOp::Lw => memory.read_word(addr),
    };
    StateDelta::reg(rd, value)
}

fn exec_store(state: &State, op: StoreOp, rs1: u8, rs2: u8, offset: i32) -> StateDelta {
    let addr = state.read_register(rs1).wrapping_add(offset as u32);
    let value = state.read_register(rs2);
    // ISA-correct partial-width stores: only the requested bytes are
    // disturbed. A bug-compatible reimplementation would always write
    // the full word here instead.
    let width = match op {
        StoreOp::Sb => Wordsize::Byte,
        StoreOp::Sh => Wordsize::Halfword,
        StoreOp::Sw => Wordsize::Word,
    };
    StateDelta {
        mem_write: Some(MemWrite { addr, value, width }),
        ..Default::default()
    }
}

fn exec_branch(
    state: &State,
    op: BranchOp,
    rs1: u8,
    rs2: u8,
    offset: i32,
    pc: u32,
) -> StateDelta {
    let a = state.read_register(rs1);
    let b = state.read_register(rs2);
    let taken = match op {
        BranchOp::Beq => a == b,
        BranchOp::Bne => a != b,
        BranchOp::Blt => (a as i32) < (b as i32),
        BranchOp::Bge => (a as i32) >= (b as i32),
        BranchOp::Bltu => a < b,
        BranchOp::Bgeu => a >= b,
    };
    if taken {
        let target = (pc as i64 + offset as i64) as u32;
        StateDelta::branch_to(target)
    } else {
        StateDelta::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulatorConfig;
    use crate::decode::decode;

    fn fresh() -> (State, Memory) {
        let config = SimulatorConfig::default();
        (State::new(config.text_base), Memory::new(&config))
    }

    #[test]
    fn addi_minus_one_produces_all_ones() {
        let (state, mem) = fresh();
        let instr = decode(0xfff00093).unwrap(); // addi x1, x0, -1
        let delta = execute(&state, &mem, instr, state.pc);
        assert_eq!(delta.reg_write, Some((1, 0xffff_ffff)));
    }

    #[test]
    fn srai_sign_propagates_srli_does_not() {
        let (mut state, mem) = fresh();
        state.write_register(5, 0x8000_0000);
        let srai = decode(0b0100000_00001_00101_101_00101_0010011).unwrap();
        let srli = decode(0b0000000_00001_00101_101_00101_0010011).unwrap();
        assert_eq!(
            execute(&state, &mem, srai, state.pc).reg_write,
            Some((5, 0xc000_0000))
        );
        assert_eq!(
            execute(&state, &mem, srli, state.pc).reg_write,
            Some((5, 0x4000_0000))
        );
    }

    #[test]
    fn jalr_clears_target_lsb() {
        let (mut state, mem) = fresh();
        state.write_register(5, 0x0040_0011);
        let jalr = Instr::Jalr { rd: 1, rs1: 5, offset: 0 };
        let delta = execute(&state, &mem, jalr, 0x0040_0100);
        assert_eq!(delta.pc_next, Some(0x0040_0010));
        assert_eq!(delta.reg_write, Some((1, 0x0040_0104)));
    }

    #[test]
    fn ecall_with_a0_ten_terminates() {
        let (mut state, mem) = fresh();
        state.write_register(10, 10);
        let delta = execute(&state, &mem, Instr::Ecall, state.pc);
        assert!(delta.terminate);
    }

    #[test]
    fn ecall_without_a0_ten_is_a_no_op() {
        let (state, mem) = fresh();
        let delta = execute(&state, &mem, Instr::Ecall, state.pc);
        assert!(!delta.terminate);
        assert!(delta.reg_write.is_none());
    }

    #[test]
    fn store_byte_leaves_rest_of_word_untouched() {
        let (mut state, mut mem) = fresh();
        let config = SimulatorConfig::default();
        mem.write_word(config.data_base, 0xaaaa_aaaa);
        state.write_register(1, config.data_base);
        state.write_register(2, 0x11);
        let delta = execute(
            &state,
            &mem,
            Instr::Store { op: StoreOp::Sb, rs1: 1, rs2: 2, offset: 0 },
            state.pc,
        );
        let write = delta.mem_write.unwrap();
        assert_eq!(write.width, Wordsize::Byte);
        mem.write_width(write.addr, write.value, write.width);
        assert_eq!(mem.read_word(config.data_base), 0xaaaa_aa11);
    }
}

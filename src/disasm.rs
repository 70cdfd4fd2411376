//! Prints a decoded [`Instr`] in RISC-V assembly syntax, with
//! pseudo-instruction folding for the documented set: `jr`, `j`,
//! `bgtz`/`bltz`/`blez`/`bgez`.

use crate::decode::{BranchOp, Instr};
use std::fmt;

pub struct Disasm(pub Instr);

impl fmt::Display for Disasm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Instr::RegReg { op, rd, rs1, rs2 } => {
                write!(f, "{} x{rd}, x{rs1}, x{rs2}", op.mnemonic())
            }
            Instr::RegImm { op, rd, rs1, imm } => {
                write!(f, "{} x{rd}, x{rs1}, {imm}", op.mnemonic())
            }
            Instr::Load { op, rd, rs1, offset } => {
                write!(f, "{} x{rd}, {offset}(x{rs1})", op.mnemonic())
            }
            Instr::Store { op, rs1, rs2, offset } => {
                write!(f, "{} x{rs2}, {offset}(x{rs1})", op.mnemonic())
            }
            Instr::Jalr { rd, rs1, offset } if rd == 0 && offset == 0 => {
                write!(f, "jr x{rs1}")
            }
            Instr::Jalr { rd, rs1, offset } => {
                write!(f, "jalr x{rd}, x{rs1}, {offset}")
            }
            Instr::Jal { rd, offset } if rd == 0 => write!(f, "j {offset}"),
            Instr::Jal { rd, offset } => write!(f, "jal x{rd}, {offset}"),
            Instr::Branch { op, rs1, rs2, offset } => fmt_branch(f, op, rs1, rs2, offset),
            Instr::Lui { rd, imm } => write!(f, "lui x{rd}, {:#x}", imm >> 12),
            Instr::Ecall => write!(f, "ecall"),
            Instr::Nop => write!(f, "nop"),
        }
    }
}

fn fmt_branch(
    f: &mut fmt::Formatter<'_>,
    op: BranchOp,
    rs1: u8,
    rs2: u8,
    offset: i32,
) -> fmt::Result {
    match (op, rs1, rs2) {
        (BranchOp::Blt, 0, _) => write!(f, "bgtz x{rs2}, {offset}"),
        (BranchOp::Blt, _, 0) => write!(f, "bltz x{rs1}, {offset}"),
        (BranchOp::Bge, 0, _) => write!(f, "blez x{rs2}, {offset}"),
        (BranchOp::Bge, _, 0) => write!(f, "bgez x{rs1}, {offset}"),
        _ => write!(f, "{} x{rs1}, x{rs2}, {offset}", op.mnemonic()),
    }
}

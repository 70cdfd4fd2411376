//! Turns a 32-bit instruction word into a tagged [`Instr`] value.
//!
//! The same [`Instr`] value is consumed both by [`crate::exec`] and by
//! [`crate::disasm`], so the two can never disagree about what a word
//! means.

use crate::error::DecodeError;
use crate::fields::*;
use crate::opcodes::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegRegOp {
    Add,
    Sub,
    Or,
    And,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegImmOp {
    Addi,
    Xori,
    Ori,
    Andi,
    Slli,
    Srli,
    Srai,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOp {
    Lb,
    Lh,
    Lw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    Sb,
    Sh,
    Sw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchOp {
    Beq,
    Bne,
    Blt,
    Bge,
    Bltu,
    Bgeu,
}

impl RegRegOp {
    pub fn mnemonic(self) -> &'static str {
        match self {
            RegRegOp::Add => "add",
            RegRegOp::Sub => "sub",
            RegRegOp::Or => "or",
            RegRegOp::And => "and",
        }
    }
}

impl RegImmOp {
    pub fn mnemonic(self) -> &'static str {
        match self {
            RegImmOp::Addi => "addi",
            RegImmOp::Xori => "xori",
            RegImmOp::Ori => "ori",
            RegImmOp::Andi => "andi",
            RegImmOp::Slli => "slli",
            RegImmOp::Srli => "srli",
            RegImmOp::Srai => "srai",
        }
    }

    /// True for the shift family, where the I-immediate field is not a
    /// sign-extended constant but a 5-bit shift amount.
    pub fn is_shift(self) -> bool {
        matches!(self, RegImmOp::Slli | RegImmOp::Srli | RegImmOp::Srai)
    }
}

impl LoadOp {
    pub fn mnemonic(self) -> &'static str {
        match self {
            LoadOp::Lb => "lb",
            LoadOp::Lh => "lh",
            LoadOp::Lw => "lw",
        }
    }
}

impl StoreOp {
    pub fn mnemonic(self) -> &'static str {
        match self {
            StoreOp::Sb => "sb",
            StoreOp::Sh => "sh",
            StoreOp::Sw => "sw",
        }
    }
}

impl BranchOp {
    pub fn mnemonic(self) -> &'static str {
        match self {
            BranchOp::Beq => "beq",
            BranchOp::Bne => "bne",
            BranchOp::Blt => "blt",
            BranchOp::Bge => "bge",
            BranchOp::Bltu => "bltu",
            BranchOp::Bgeu => "bgeu",
        }
    }
}

/// A fully decoded instruction, carrying exactly the fields its executor
/// and its disassembler need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instr {
    RegReg {
        op: RegRegOp,
        rd: u8,
        rs1: u8,
        rs2: u8,
    },
    Load {
        op: LoadOp,
        rd: u8,
        rs1: u8,
        offset: i32,
    },
    /// For `Slli`/`Srli`/`Srai`, `imm` holds the 5-bit shift amount
    /// (0..=31); otherwise it is the sign-extended I-immediate.
    RegImm {
        op: RegImmOp,
        rd: u8,
        rs1: u8,
        imm: i32,
    },
    Jalr {
        rd: u8,
        rs1: u8,
        offset: i32,
    },
    Store {
        op: StoreOp,
        rs1: u8,
        rs2: u8,
        offset: i32,
    },
    Branch {
        op: BranchOp,
        rs1: u8,
        rs2: u8,
        offset: i32,
    },
    Jal {
        rd: u8,
        offset: i32,
    },
    Lui {
        rd: u8,
        imm: u32,
    },
    Ecall,
    /// opcode field of all zero bits: the pad the text segment is
    /// filled with past the last loaded word. Executes as a plain
    /// no-op rather than as an illegal instruction.
    Nop,
}

pub fn decode(word: u32) -> Result<Instr, DecodeError> {
    match opcode(word) {
        OP_NOP_HOLE => Ok(Instr::Nop),
        OP_REG_REG => decode_reg_reg(word),
        OP_LOAD => decode_load(word),
        OP_REG_IMM => decode_reg_imm(word),
        OP_JALR => Ok(Instr::Jalr {
            rd: rd(word),
            rs1: rs1(word),
            offset: imm_itype(word),
        }),
        OP_STORE => decode_store(word),
        OP_BRANCH => decode_branch(word),
        OP_JAL => Ok(Instr::Jal {
            rd: rd(word),
            offset: imm_jtype(word),
        }),
        OP_LUI => Ok(Instr::Lui {
            rd: rd(word),
            imm: imm_utype(word),
        }),
        OP_SYSTEM => Ok(Instr::Ecall),
        other => Err(DecodeError::UnknownOpcode(other)),
    }
}

fn decode_reg_reg(word: u32) -> Result<Instr, DecodeError> {
    let f3 = funct3(word);
    let f7 = funct7(word);
    let op = match (f3, f7) {
        (FUNCT3_ADD_SUB, FUNCT7_ZERO) => RegRegOp::Add,
        (FUNCT3_ADD_SUB, FUNCT7_ALT) => RegRegOp::Sub,
        (FUNCT3_OR, FUNCT7_ZERO) => RegRegOp::Or,
        (FUNCT3_AND, FUNCT7_ZERO) => RegRegOp::And,
        _ => return Err(DecodeError::ReservedRType { funct3: f3, funct7: f7 }),
    };
    Ok(Instr::RegReg {
        op,
        rd: rd(word),
        rs1: rs1(word),
        rs2: rs2(word),
    })
}

fn decode_load(word: u32) -> Result<Instr, DecodeError> {
    let op = match funct3(word) {
        FUNCT3_LB => LoadOp::Lb,
        FUNCT3_LH => LoadOp::Lh,
        FUNCT3_LW => LoadOp::Lw,
        other => return Err(DecodeError::ReservedLoad(other)),
    };
    Ok(Instr::Load {
        op,
        rd: rd(word),
        rs1: rs1(word),
        offset: imm_itype(word),
    })
}

fn decode_reg_imm(word: u32) -> Result<Instr, DecodeError> {
    let f3 = funct3(word);
    let (op, imm) = match f3 {
        FUNCT3_ADDI => (RegImmOp::Addi, imm_itype(word)),
        FUNCT3_XORI => (RegImmOp::Xori, imm_itype(word)),
        FUNCT3_ORI => (RegImmOp::Ori, imm_itype(word)),
        FUNCT3_ANDI => (RegImmOp::Andi, imm_itype(word)),
        FUNCT3_SLLI => {
            let f7 = funct7(word);
            if f7 != FUNCT7_ZERO {
                return Err(DecodeError::ReservedShift(f7));
            }
            (RegImmOp::Slli, shamt(word) as i32)
        }
        FUNCT3_SRLI_SRAI => {
            let f7 = funct7(word);
            let op = match f7 {
                FUNCT7_ZERO => RegImmOp::Srli,
                FUNCT7_ALT => RegImmOp::Srai,
                _ => return Err(DecodeError::ReservedShift(f7)),
            };
            (op, shamt(word) as i32)
        }
        other => return Err(DecodeError::ReservedIImm(other)),
    };
    Ok(Instr::RegImm {
        op,
        rd: rd(word),
        rs1: rs1(word),
        imm,
    })
}

fn decode_store(word: u32) -> Result<Instr, DecodeError> {
    let op = match funct3(word) {
        FUNCT3_SB => StoreOp::Sb,
        FUNCT3_SH => StoreOp::Sh,
        FUNCT3_SW => StoreOp::Sw,
        other => return Err(DecodeError::ReservedStore(other)),
    };
    Ok(Instr::Store {
        op,
        rs1: rs1(word),
        rs2: rs2(word),
        offset: imm_stype(word),
    })
}

fn decode_branch(word: u32) -> Result<Instr, DecodeError> {
    let op = match funct3(word) {
        FUNCT3_BEQ => BranchOp::Beq,
        FUNCT3_BNE => BranchOp::Bne,
        FUNCT3_BLT => BranchOp::Blt,
        FUNCT3_BGE => BranchOp::Bge,
        FUNCT3_BLTU => BranchOp::Bltu,
        FUNCT3_BGEU => BranchOp::Bgeu,
        other => return Err(DecodeError::ReservedBranch(other)),
    };
    Ok(Instr::Branch {
        op,
        rs1: rs1(word),
        rs2: rs2(word),
        offset: imm_btype(word),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_addi() {
        // addi x5, x0, 7
        let instr = decode(0x00700293).unwrap();
        assert_eq!(
            instr,
            Instr::RegImm {
                op: RegImmOp::Addi,
                rd: 5,
                rs1: 0,
                imm: 7,
            }
        );
    }

    #[test]
    fn decodes_add() {
        // add x7, x5, x6
        let instr = decode(0x006283b3).unwrap();
        assert_eq!(
            instr,
            Instr::RegReg {
                op: RegRegOp::Add,
                rd: 7,
                rs1: 5,
                rs2: 6,
            }
        );
    }

    #[test]
    fn decodes_ecall() {
        assert_eq!(decode(0x00000073).unwrap(), Instr::Ecall);
    }

    #[test]
    fn decodes_all_zero_word_as_nop() {
        assert_eq!(decode(0).unwrap(), Instr::Nop);
    }

    #[test]
    fn rejects_undefined_opcode() {
        assert_eq!(decode(0xffffffff), Err(DecodeError::UnknownOpcode(0x7f)));
    }

    #[test]
    fn rejects_reserved_rtype_combination() {
        // funct3=1 (sll), not in the supported R-type subset
        let word = 0b0000000_00110_00101_001_00111_0110011;
        assert_eq!(
            decode(word),
            Err(DecodeError::ReservedRType { funct3: 1, funct7: 0 })
        );
    }

    #[test]
    fn srai_requires_alt_funct7() {
        // srai x5, x5, 1
        let word = 0b0100000_00001_00101_101_00101_0010011;
        assert_eq!(
            decode(word),
            Ok(Instr::RegImm {
                op: RegImmOp::Srai,
                rd: 5,
                rs1: 5,
                imm: 1,
            })
        );
    }

    #[test]
    fn rejects_reserved_shift_funct7() {
        let word = 0b0010000_00001_00101_101_00101_0010011;
        assert_eq!(decode(word), Err(DecodeError::ReservedShift(0b0010000)));
    }
}

//! Opcode and funct3/funct7 constants for the supported RV32I subset.

pub const OP_NOP_HOLE: u32 = 0b000_0000;
pub const OP_REG_REG: u32 = 0b011_0011;
pub const OP_LOAD: u32 = 0b000_0011;
pub const OP_REG_IMM: u32 = 0b001_0011;
pub const OP_JALR: u32 = 0b110_0111;
pub const OP_STORE: u32 = 0b010_0011;
pub const OP_BRANCH: u32 = 0b110_0011;
pub const OP_JAL: u32 = 0b110_1111;
pub const OP_LUI: u32 = 0b011_0111;
pub const OP_SYSTEM: u32 = 0b111_0011;

pub const FUNCT7_ALT: u32 = 0b0100000;
pub const FUNCT7_ZERO: u32 = 0b0000000;

pub const FUNCT3_BEQ: u32 = 0x0;
pub const FUNCT3_BNE: u32 = 0x1;
pub const FUNCT3_BLT: u32 = 0x4;
pub const FUNCT3_BGE: u32 = 0x5;
pub const FUNCT3_BLTU: u32 = 0x6;
pub const FUNCT3_BGEU: u32 = 0x7;

pub const FUNCT3_LB: u32 = 0x0;
pub const FUNCT3_LH: u32 = 0x1;
pub const FUNCT3_LW: u32 = 0x2;

pub const FUNCT3_SB: u32 = 0x0;
pub const FUNCT3_SH: u32 = 0x1;
pub const FUNCT3_SW: u32 = 0x2;

pub const FUNCT3_ADDI: u32 = 0x0;
pub const FUNCT3_SLLI: u32 = 0x1;
pub const FUNCT3_SRLI_SRAI: u32 = 0x5;
pub const FUNCT3_XORI: u32 = 0x4;
pub const FUNCT3_ORI: u32 = 0x6;
pub const FUNCT3_ANDI: u32 = 0x7;

pub const FUNCT3_ADD_SUB: u32 = 0x0;
pub const FUNCT3_OR: u32 = 0x6;
pub const FUNCT3_AND: u32 = 0x7;

use thiserror::Error;

/// Failures from decoding a 32-bit instruction word.
///
/// A reserved funct3/funct7 combination is detected here rather than in
/// the executor: the decoder fully resolves a word into an [`crate::decode::Instr`]
/// before execution ever sees it, so an illegal encoding never reaches
/// the executor at all.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum DecodeError {
    #[error("unrecognized opcode {0:#09b}")]
    UnknownOpcode(u32),
    #[error("reserved funct3={funct3}/funct7={funct7:#09b} combination for R-type")]
    ReservedRType { funct3: u32, funct7: u32 },
    #[error("reserved funct3={0} for I-immediate format")]
    ReservedIImm(u32),
    #[error("reserved funct7={0:#09b} for shift-immediate")]
    ReservedShift(u32),
    #[error("reserved funct3={0} for load format")]
    ReservedLoad(u32),
    #[error("reserved funct3={0} for store format")]
    ReservedStore(u32),
    #[error("reserved funct3={0} for branch format")]
    ReservedBranch(u32),
}

/// Failures reading a program file into the text segment.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not open program file {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: {token:?} is not a hexadecimal 32-bit word")]
    MalformedWord { line: usize, token: String },
}

/// Failures parsing a shell command line.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ShellError {
    #[error("unrecognized command {0:?}, type ? for help")]
    UnrecognizedCommand(String),
    #[error("{command} expects {expected} argument(s), got {got}")]
    WrongArgumentCount {
        command: String,
        expected: usize,
        got: usize,
    },
    #[error("{0:?} is not a valid number")]
    BadNumber(String),
    #[error("register index {0} is out of range (0..32)")]
    BadRegisterIndex(u32),
}

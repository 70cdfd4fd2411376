//! Standalone disassembler: loads a program file and prints its
//! disassembly without entering the interactive shell.

use clap::Parser;
use rv32i_sim::config::SimulatorConfig;
use rv32i_sim::decode::decode;
use rv32i_sim::disasm::Disasm;
use rv32i_sim::loader::load_program;

/// Disassemble a flat hex-text RV32I program file.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a flat hex-text program file (one 32-bit word per line)
    program: String,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    let config = SimulatorConfig::default();

    let program = match load_program(&args.program) {
        Ok(program) => program,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(-1);
        }
    };

    let mut addr = config.text_base;
    for word in program {
        match decode(word) {
            Ok(instr) => println!("0x{addr:08x}: {}", Disasm(instr)),
            Err(err) => println!("0x{addr:08x}: <{err}>"),
        }
        addr = addr.wrapping_add(4);
    }
}

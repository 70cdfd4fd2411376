//! Interactive shell binary: loads a program file and drops into a
//! rustyline-backed REPL implementing the `sim`/`run`/`rdump`/`reset`/
//! `input`/`mdump`/`high`/`low`/`print`/`?`/`quit` command surface.

use clap::Parser;
use clap_num::maybe_hex;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use rv32i_sim::config::SimulatorConfig;
use rv32i_sim::loader::load_program;
use rv32i_sim::shell::{dispatch, parse_command, HELP_TEXT};
use rv32i_sim::simulator::Simulator;

/// A single-hart, user-mode functional simulator for RV32I.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a flat hex-text program file (one 32-bit word per line)
    program: Option<String>,

    /// Override the text segment base address
    #[arg(long, value_parser=maybe_hex::<u32>)]
    text_base: Option<u32>,

    /// Override the stack top address
    #[arg(long, value_parser=maybe_hex::<u32>)]
    stack_top: Option<u32>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let Some(program_path) = args.program else {
        eprintln!("error: no program file argument provided");
        std::process::exit(1);
    };

    let mut config = SimulatorConfig::default();
    if let Some(text_base) = args.text_base {
        config.text_base = text_base;
    }
    if let Some(stack_top) = args.stack_top {
        config.stack_top = stack_top;
    }

    let program = match load_program(&program_path) {
        Ok(program) => program,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(-1);
        }
    };

    let mut sim = Simulator::new(config, program);

    println!("RV32I simulator ready. Type ? for help.");
    println!("{HELP_TEXT}");

    let mut editor = DefaultEditor::new().expect("failed to initialize line editor");
    loop {
        match editor.readline("sim> ") {
            Ok(line) => {
                let _ = editor.add_history_entry(line.as_str());
                if line.trim().is_empty() {
                    continue;
                }
                match parse_command(&line) {
                    Ok(command) => {
                        if !dispatch(&mut sim, command) {
                            break;
                        }
                    }
                    Err(err) => println!("{err}"),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("readline error: {err}");
                break;
            }
        }
    }
    println!("goodbye.");
}

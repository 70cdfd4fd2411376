//! The interactive command shell.
//!
//! This surface is specified as a list of operations that poke the
//! simulator core; parsing and dispatch are implemented here rather than
//! derived from the core itself, grounded on the original command set:
//! `sim`, `run <n>`, `rdump`, `reset`, `input <reg> <val>`,
//! `mdump <start> <stop>`, `high <val>`, `low <val>`, `print`, `?`, `quit`.

use crate::disasm::Disasm;
use crate::decode::decode;
use crate::error::ShellError;
use crate::simulator::Simulator;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Sim,
    Run(u64),
    Rdump,
    Reset,
    Input(u8, u32),
    Mdump(u32, u32),
    High(u32),
    Low(u32),
    Print,
    Help,
    Quit,
}

fn parse_u32_hex(token: &str) -> Result<u32, ShellError> {
    let digits = token.strip_prefix("0x").unwrap_or(token);
    u32::from_str_radix(digits, 16).map_err(|_| ShellError::BadNumber(token.to_string()))
}

fn parse_i32_decimal(token: &str) -> Result<i32, ShellError> {
    token
        .parse::<i32>()
        .map_err(|_| ShellError::BadNumber(token.to_string()))
}

fn expect_args(command: &str, args: &[&str], expected: usize) -> Result<(), ShellError> {
    if args.len() != expected {
        Err(ShellError::WrongArgumentCount {
            command: command.to_string(),
            expected,
            got: args.len(),
        })
    } else {
        Ok(())
    }
}

/// Parses one whitespace-delimited shell command line.
pub fn parse_command(line: &str) -> Result<Command, ShellError> {
    let mut parts = line.split_whitespace();
    let command = parts
        .next()
        .ok_or_else(|| ShellError::UnrecognizedCommand(String::new()))?;
    let args: Vec<&str> = parts.collect();

    match command {
        "sim" | "S" | "s" => {
            expect_args(command, &args, 0)?;
            Ok(Command::Sim)
        }
        "run" | "R" | "r" => {
            expect_args(command, &args, 1)?;
            let n = args[0]
                .parse::<u64>()
                .map_err(|_| ShellError::BadNumber(args[0].to_string()))?;
            Ok(Command::Run(n))
        }
        "rdump" => {
            expect_args(command, &args, 0)?;
            Ok(Command::Rdump)
        }
        "reset" => {
            expect_args(command, &args, 0)?;
            Ok(Command::Reset)
        }
        "input" | "I" | "i" => {
            expect_args(command, &args, 2)?;
            let index = args[0]
                .parse::<u32>()
                .map_err(|_| ShellError::BadNumber(args[0].to_string()))?;
            if index >= 32 {
                return Err(ShellError::BadRegisterIndex(index));
            }
            let value = parse_i32_decimal(args[1])? as u32;
            Ok(Command::Input(index as u8, value))
        }
        "mdump" | "M" | "m" => {
            expect_args(command, &args, 2)?;
            let start = parse_u32_hex(args[0])?;
            let stop = parse_u32_hex(args[1])?;
            Ok(Command::Mdump(start, stop))
        }
        "high" | "H" | "h" => {
            expect_args(command, &args, 1)?;
            Ok(Command::High(parse_i32_decimal(args[0])? as u32))
        }
        "low" | "L" | "l" => {
            expect_args(command, &args, 1)?;
            Ok(Command::Low(parse_i32_decimal(args[0])? as u32))
        }
        "print" | "P" | "p" => {
            expect_args(command, &args, 0)?;
            Ok(Command::Print)
        }
        "?" => Ok(Command::Help),
        "quit" | "Q" | "q" => Ok(Command::Quit),
        other => Err(ShellError::UnrecognizedCommand(other.to_string())),
    }
}

pub const HELP_TEXT: &str = "\
sim                    -- run to completion
run <n>                -- run n cycles
rdump                  -- print registers, PC, instruction count, HI, LO
reset                  -- reset and reload the program
input <reg> <val>      -- set register <reg> to <val>
mdump <start> <stop>   -- print memory as 32-bit words from <start> to <stop>
high <val>             -- set the HI register
low <val>              -- set the LO register
print                  -- disassemble the loaded program
?                      -- this help
quit                   -- exit the shell";

/// Runs one already-parsed command against `sim`, printing its output.
/// Returns `true` if the shell should keep running.
pub fn dispatch(sim: &mut Simulator, command: Command) -> bool {
    match command {
        Command::Sim => sim.run_all(),
        Command::Run(n) => sim.run(n),
        Command::Rdump => print_rdump(sim),
        Command::Reset => sim.reset(),
        Command::Input(index, value) => sim.state.write_register(index, value),
        Command::Mdump(start, stop) => print_mdump(sim, start, stop),
        Command::High(value) => sim.state.hi = value,
        Command::Low(value) => sim.state.lo = value,
        Command::Print => print_program(sim),
        Command::Help => println!("{HELP_TEXT}"),
        Command::Quit => return false,
    }
    true
}

fn print_rdump(sim: &Simulator) {
    for (index, value) in sim.state.registers().iter().enumerate() {
        println!("Reg[{index:>2}] = 0x{value:08x} ({value})");
    }
    println!("PC = 0x{:08x}", sim.state.pc);
    println!("Instructions executed = {}", sim.state.instruction_count);
    println!("HI = 0x{:08x}", sim.state.hi);
    println!("LO = 0x{:08x}", sim.state.lo);
}

fn print_mdump(sim: &Simulator, start: u32, stop: u32) {
    println!("Memory content [{start:#010x}..{stop:#010x}]:");
    let mut addr = start;
    while addr <= stop {
        let value = sim.memory.read_word(addr);
        println!("0x{addr:08x} ({addr}) :\t0x{value:08x}");
        match addr.checked_add(4) {
            Some(next) => addr = next,
            None => break,
        }
    }
}

fn print_program(sim: &Simulator) {
    let mut addr = sim.config.text_base;
    for _ in 0..sim.program_size() {
        let word = sim.memory.read_word(addr);
        match decode(word) {
            Ok(instr) => println!("0x{addr:08x}: {}", Disasm(instr)),
            Err(err) => println!("0x{addr:08x}: <{err}>"),
        }
        addr = addr.wrapping_add(4);
    }
}

//! The cycle driver: owns [`State`] and [`Memory`], fetches and decodes
//! one instruction per cycle, applies the resulting [`StateDelta`], and
//! exposes `step`/`run`/`run_all`/`reset` to the shell.
//!
//! Replaces the source's process-wide mutable globals (`CURRENT_STATE`,
//! `NEXT_STATE`, `MEM_REGIONS`, `RUN_FLAG`, `PROGRAM_SIZE`,
//! `INSTRUCTION_COUNT`) with one value the shell owns and passes every
//! operation through.

use crate::config::SimulatorConfig;
use crate::decode::decode;
use crate::exec::execute;
use crate::memory::Memory;
use crate::state::State;

/// Register sp (x2) in the standard calling convention; set to the
/// stack top on reset.
const REG_SP: u8 = 2;

pub struct Simulator {
    pub state: State,
    pub memory: Memory,
    pub config: SimulatorConfig,
    program: Vec<u32>,
}

impl Simulator {
    pub fn new(config: SimulatorConfig, program: Vec<u32>) -> Self {
        let mut sim = Self {
            state: State::new(config.text_base),
            memory: Memory::new(&config),
            config,
            program,
        };
        sim.load_program_image();
        sim.state.write_register(REG_SP, sim.config.stack_top);
        sim
    }

    fn load_program_image(&mut self) {
        let mut addr = self.config.text_base;
        for &word in &self.program {
            self.memory.write_word(addr, word);
            addr = addr.wrapping_add(4);
        }
    }

    pub fn program_size(&self) -> usize {
        self.program.len()
    }

    /// Clears registers, zeroes every memory region, reloads the
    /// program image, resets PC to the text base, and raises run_flag.
    pub fn reset(&mut self) {
        self.memory.clear();
        self.state = State::new(self.config.text_base);
        self.load_program_image();
        self.state.write_register(REG_SP, self.config.stack_top);
    }

    fn has_overrun(&self) -> bool {
        let offset = self.state.pc.wrapping_sub(self.config.text_base);
        (offset / 4) as usize >= self.program.len()
    }

    /// Runs exactly one cycle. No-ops if `run_flag` is already clear.
    pub fn step(&mut self) {
        if !self.state.run_flag {
            return;
        }

        if self.has_overrun() {
            self.state.run_flag = false;
            self.state.instruction_count += 1;
            log::debug!("program overrun at pc={:#010x}, synthesizing ECALL", self.state.pc);
            return;
        }

        let pc = self.state.pc;
        let word = self.memory.read_word(pc);
        match decode(word) {
            Ok(instr) => {
                let delta = execute(&self.state, &self.memory, instr, pc);
                if let Some((rd, value)) = delta.reg_write {
                    self.state.write_register(rd, value);
                }
                if let Some(write) = delta.mem_write {
                    self.memory.write_width(write.addr, write.value, write.width);
                }
                self.state.pc = delta.pc_next.unwrap_or_else(|| pc.wrapping_add(4));
                if delta.terminate {
                    self.state.run_flag = false;
                }
            }
            Err(err) => {
                log::warn!("decode error at pc={pc:#010x}: {err}");
                self.state.run_flag = false;
            }
        }
        self.state.instruction_count += 1;
    }

    pub fn run(&mut self, cycles: u64) {
        for _ in 0..cycles {
            if !self.state.run_flag {
                break;
            }
            self.step();
        }
    }

    pub fn run_all(&mut self) {
        while self.state.run_flag {
            self.step();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sim_with(program: Vec<u32>) -> Simulator {
        Simulator::new(SimulatorConfig::default(), program)
    }

    #[test]
    fn arithmetic_and_termination() {
        let mut sim = sim_with(vec![
            0x00700293, // addi x5, x0, 7
            0x02300313, // addi x6, x0, 35
            0x006283b3, // add x7, x5, x6
            0x00a00513, // addi a0, x0, 10
            0x00000073, // ecall
        ]);
        sim.run_all();
        assert_eq!(sim.state.read_register(7), 42);
        assert!(!sim.state.run_flag);
    }

    #[test]
    fn branch_taken_backward_loop() {
        // addi x5, x0, 5
        // addi x5, x5, -1
        // bne x5, x0, -4
        // addi a0, x0, 10
        // ecall
        let mut sim = sim_with(vec![
            0x00500293,
            0xfff28293,
            0xfe029ee3,
            0x00a00513,
            0x00000073,
        ]);
        sim.run_all();
        assert_eq!(sim.state.read_register(5), 0);
    }

    #[test]
    fn jal_link_and_return() {
        // jal x1, 8
        // addi x10, x0, 99  (skipped)
        // jalr x0, x1, 0
        let mut sim = sim_with(vec![0x008000ef, 0x06300513, 0x00008067]);
        sim.step();
        assert_eq!(sim.state.pc, sim.config.text_base + 8);
        assert_eq!(sim.state.read_register(1), sim.config.text_base + 4);
        sim.step();
        assert_eq!(sim.state.pc, sim.config.text_base + 4);
    }

    #[test]
    fn lui_addi_builds_address() {
        let mut sim = sim_with(vec![
            0x100002b7, // lui x5, 0x10000
            0x01028293, // addi x5, x5, 0x10
        ]);
        sim.run(2);
        assert_eq!(sim.state.read_register(5), 0x1000_0010);
    }

    #[test]
    fn undefined_opcode_halts_without_mutation() {
        let mut sim = sim_with(vec![0xffff_ffff]);
        sim.step();
        assert!(!sim.state.run_flag);
        assert!(sim.state.registers().iter().all(|&r| r == 0));
    }

    #[test]
    fn overrun_synthesizes_termination() {
        let mut sim = sim_with(vec![0x00700293]); // addi x5, x0, 7
        sim.step();
        assert!(sim.state.run_flag);
        sim.step();
        assert!(!sim.state.run_flag);
    }

    #[test]
    fn reset_reloads_program_and_zeroes_state() {
        let mut sim = sim_with(vec![0x00700293]);
        sim.step();
        assert_eq!(sim.state.read_register(5), 7);
        sim.reset();
        assert_eq!(sim.state.read_register(5), 0);
        assert_eq!(sim.state.pc, sim.config.text_base);
        assert!(sim.state.run_flag);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut sim = sim_with(vec![0x00700293]);
        sim.run_all();
        sim.reset();
        let regs_after_first = *sim.state.registers();
        let pc_after_first = sim.state.pc;
        sim.reset();
        assert_eq!(*sim.state.registers(), regs_after_first);
        assert_eq!(sim.state.pc, pc_after_first);
    }
}

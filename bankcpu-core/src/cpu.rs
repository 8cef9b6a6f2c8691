use core::fmt;

use heapless::HistoryBuffer;
use log::{debug, error, info, trace, warn};

use crate::consts::{MEM_BANK_NUM_BYTES, TRACE_DEPTH};
use crate::disasm::disasm;
use crate::error::{BcpuError, BcpuResult};
use crate::host::BcpuHost;
use crate::instr::{BcpuArith, BcpuControlFlow, BcpuLoadStore, BcpuLogic, BcpuStackOps};
use crate::instr::{BcpuInst, BcpuMnem};
use crate::mem::{BcpuFlag, BcpuMemoryMap, Reg};

///
/// Program counter. The bank half selects which bank code executes from and
/// is never tied to the data bank register BI.
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BcpuPc {
    pub bank: u8,
    pub addr: u8,
}

impl BcpuPc {
    pub fn new(bank: u8, addr: u8) -> BcpuPc {
        BcpuPc { bank, addr }
    }

    /// Composite `(bank << 8) | addr` value, compared against program length.
    pub fn linear(&self) -> usize {
        (self.bank as usize) << 8 | self.addr as usize
    }

    /// Moves to offset 0 of the next bank. Returns true when bank 255 wrapped
    /// around to bank 0.
    pub fn next_bank(&mut self) -> bool {
        let (bank, wrapped) = self.bank.overflowing_add(1);
        self.bank = bank;
        self.addr = 0;
        wrapped
    }

    /// Moves past one instruction word, carrying into the next bank. Returns
    /// true when the carry wrapped bank 255 around to bank 0.
    pub fn advance(&mut self) -> bool {
        let (addr, carry) = self.addr.overflowing_add(2);
        self.addr = addr;
        if carry {
            let (bank, wrapped) = self.bank.overflowing_add(1);
            self.bank = bank;
            return wrapped;
        }
        false
    }
}

impl fmt::Display for BcpuPc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}:{:02x}", self.bank, self.addr)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    /// PC moved past the end of the loaded program image.
    EndOfProgram,
    /// The host asked to stop at the end of a cycle.
    QuitRequested,
    /// The step budget handed to `run` was used up.
    StepLimit,
    /// An instruction raised an error. Machine state is left as it was when
    /// the fault was detected.
    Fault(BcpuError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BcpuState {
    Running,
    Halted(HaltReason),
}

pub struct BcpuCpu {
    pub(crate) mem: BcpuMemoryMap,
    pub pc: BcpuPc,

    /// Last fetched opcode byte.
    pub rop: u8,
    /// First operand of the current instruction.
    pub dr1: u8,
    /// Operand latch. Only SOI/SOR and NOP write to it.
    pub dr2: u8,

    pub state: BcpuState,
    pub program_len: usize,
    pub total_steps: usize,
    pub unknown_opcodes: usize,

    /// Set once the PC ran off the end of bank 255. Memory has no address
    /// past that point, so the program is treated as finished.
    pc_wrapped: bool,

    history: HistoryBuffer<BcpuInst, TRACE_DEPTH>,
}

impl BcpuCpu {
    pub fn new(memmap: BcpuMemoryMap) -> BcpuCpu {
        let mut cpu = BcpuCpu {
            mem: memmap,
            pc: BcpuPc::default(),
            rop: 0,
            dr1: 0,
            dr2: 0,
            state: BcpuState::Halted(HaltReason::EndOfProgram),
            program_len: 0,
            total_steps: 0,
            unknown_opcodes: 0,
            pc_wrapped: false,
            history: HistoryBuffer::new(),
        };

        cpu.reset();
        cpu
    }

    ///
    /// Returns registers, flags, latch and PC to zero. Memory and the stack
    /// contents are left alone, so a loaded program can be run again.
    ///
    pub fn reset(&mut self) {
        self.pc = BcpuPc::default();
        self.rop = 0;
        self.dr1 = 0;
        self.dr2 = 0;
        self.mem.regs_mut().reset();
        self.state = BcpuState::Running;
        self.total_steps = 0;
        self.unknown_opcodes = 0;
        self.pc_wrapped = false;
        self.history = HistoryBuffer::new();
    }

    ///
    /// ## `load_program` Function
    ///
    /// Loads a flat program image at bank 0, offset 0 and resets the machine
    /// so that execution starts at PC (0,0). The image length becomes the
    /// end-of-program marker used by `run`.
    ///
    pub fn load_program(&mut self, program: &[u8]) -> BcpuResult<()> {
        self.program_len = self.mem.load_program(program)?;
        self.reset();
        Ok(())
    }

    pub fn mem(&self) -> &BcpuMemoryMap {
        &self.mem
    }

    pub fn mem_mut(&mut self) -> &mut BcpuMemoryMap {
        &mut self.mem
    }

    pub fn read(&self, bank: u8, addr: u8) -> u8 {
        self.mem.read_byte(bank, addr)
    }

    pub fn write(&mut self, bank: u8, addr: u8, value: u8) {
        self.mem.write_byte(bank, addr, value)
    }

    pub fn reg(&self, reg: Reg) -> u8 {
        self.mem.regs().read(reg)
    }

    pub fn set_reg(&mut self, reg: Reg, value: u8) {
        self.mem.regs_mut().write(reg, value)
    }

    pub fn flag(&self, flag: BcpuFlag) -> bool {
        self.mem.regs().flags.get(flag)
    }

    pub(crate) fn set_flag(&mut self, flag: BcpuFlag, value: bool) {
        self.mem.regs_mut().flags.set(flag, value)
    }

    pub(crate) fn reg_code(&self, code: u8) -> BcpuResult<u8> {
        self.mem.regs().read_code(code)
    }

    pub(crate) fn set_reg_code(&mut self, code: u8, value: u8) -> BcpuResult<()> {
        self.mem.regs_mut().write_code(code, value)
    }

    /// Reads from the data bank selected by BI.
    pub(crate) fn data_read(&self, addr: u8) -> u8 {
        let bank = self.reg(Reg::BI);
        self.mem.read_byte(bank, addr)
    }

    /// Writes to the data bank selected by BI.
    pub(crate) fn data_write(&mut self, addr: u8, value: u8) {
        let bank = self.reg(Reg::BI);
        self.mem.write_byte(bank, addr, value)
    }

    pub(crate) fn jump(&mut self, bank: u8, addr: u8) {
        debug!("Jump: {} => {:02x}:{:02x}", self.pc, bank, addr);
        self.pc = BcpuPc::new(bank, addr);
        self.pc_wrapped = false;
    }

    pub fn is_end_of_program(&self) -> bool {
        self.pc_wrapped || self.pc.linear() > self.program_len
    }

    pub fn is_halted(&self) -> bool {
        matches!(self.state, BcpuState::Halted(_))
    }

    /// Executed instructions, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &BcpuInst> {
        self.history.oldest_ordered()
    }

    /// Reads the word at PC. `None` when the PC ran off the end of memory.
    fn fetch(&mut self) -> Option<BcpuInst> {
        // The operand byte has to come from the same bank as the opcode.
        // An opcode on the last offset of a bank is never read, the fetch
        // moves on to the start of the next bank instead.
        if self.pc.addr as usize == MEM_BANK_NUM_BYTES - 1 {
            debug!("Fetch at {} crosses bank boundary. Rolling over", self.pc);
            if self.pc.next_bank() {
                debug!("Fetch rolled past bank 0xff. Ending program");
                self.pc_wrapped = true;
                return None;
            }
        }

        let opcode = self.mem.read_byte(self.pc.bank, self.pc.addr);
        let operand = self.mem.read_byte(self.pc.bank, self.pc.addr + 1);
        Some(disasm(self.pc, opcode, operand))
    }

    ///
    /// ## `execute` Function
    ///
    /// Applies the operand latch protocol and dispatches the instruction.
    /// SOI/SOR only load DR2. Every other opcode loads DR1 and runs.
    ///
    /// ### Result
    ///  `true` when the PC should move on to the next instruction word,
    ///  `false` when a jump was taken and the PC already holds the target.
    ///
    pub fn execute(&mut self, inst: &BcpuInst) -> BcpuResult<bool> {
        self.rop = inst.opcode;
        if inst.mnem.is_latch() {
            self.dr2 = inst.operand;
            return Ok(true);
        }
        self.dr1 = inst.operand;

        match inst.mnem {
            BcpuMnem::NOP => {
                self.dr1 = 0;
                self.dr2 = 0;
                Ok(true)
            }
            BcpuMnem::SOI | BcpuMnem::SOR => Ok(true),
            BcpuMnem::BSWCHI => self.bswchi(),
            BcpuMnem::BSWCHR => self.bswchr(),
            BcpuMnem::ADDI => self.addi(),
            BcpuMnem::ADDR => self.addr(),
            BcpuMnem::SUBI => self.subi(),
            BcpuMnem::SUBR => self.subr(),
            BcpuMnem::LDI => self.ldi(),
            BcpuMnem::CPY => self.cpy(),
            BcpuMnem::MOVMI => self.movmi(),
            BcpuMnem::MOVMR => self.movmr(),
            BcpuMnem::GETP => self.getp(),
            BcpuMnem::SHL => self.shl(),
            BcpuMnem::SHR => self.shr(),
            BcpuMnem::JMPI => self.jmpi(),
            BcpuMnem::JMPR => self.jmpr(),
            BcpuMnem::JEI => self.jei(),
            BcpuMnem::JER => self.jer(),
            BcpuMnem::JNEI => self.jnei(),
            BcpuMnem::JNER => self.jner(),
            BcpuMnem::CMPI => self.cmpi(),
            BcpuMnem::CMPR => self.cmpr(),
            BcpuMnem::LOADI => self.loadi(),
            BcpuMnem::LOADR => self.loadr(),
            BcpuMnem::STORI => self.stori(),
            BcpuMnem::STORR => self.storr(),
            BcpuMnem::PUSHI => self.pushi(),
            BcpuMnem::PUSHR => self.pushr(),
            BcpuMnem::POP => self.pop(),
            BcpuMnem::INCB => self.incb(),
            BcpuMnem::DECB => self.decb(),
            BcpuMnem::INCR => self.incr(),
            BcpuMnem::DECR => self.decr(),
            BcpuMnem::ANDI => self.andi(),
            BcpuMnem::ANDR => self.andr(),
            BcpuMnem::ORI => self.ori(),
            BcpuMnem::ORR => self.orr(),
            BcpuMnem::XORI => self.xori(),
            BcpuMnem::XORR => self.xorr(),
            BcpuMnem::NOT => self.not(),
            BcpuMnem::UNKNOWN => {
                self.unknown_opcodes += 1;
                warn!(
                    "Unrecognized opcode 0x{:02x} at {}. Treating as NOP",
                    inst.opcode, inst.pc
                );
                Ok(true)
            }
        }
    }

    ///
    /// Runs a single fetch / execute / PC-advance cycle. An error halts the
    /// machine with `HaltReason::Fault` and is handed back to the caller.
    /// Once the PC wraps past bank 0xff nothing is fetched and the machine
    /// reports end of program.
    ///
    pub fn step(&mut self) -> BcpuResult<()> {
        let inst = match self.fetch() {
            Some(inst) => inst,
            None => return Ok(()),
        };
        trace!("{}", inst);

        self.history.write(inst);
        self.total_steps += 1;

        match self.execute(&inst) {
            Ok(true) => {
                if self.pc.advance() {
                    debug!("PC wrapped past bank 0xff. Ending program");
                    self.pc_wrapped = true;
                }
            }
            Ok(false) => {}
            Err(e) => {
                error!("Fault at {} executing {}: {}", inst.pc, inst.mnem.name(), e);
                self.print_state();
                self.state = BcpuState::Halted(HaltReason::Fault(e));
                return Err(e);
            }
        }
        Ok(())
    }

    ///
    /// ## `run` Function
    ///
    /// Executes until the PC passes the end of the program image, the host
    /// requests a quit, `max_steps` instructions have run, or an instruction
    /// faults. Control is handed to the host after every instruction.
    ///
    pub fn run(&mut self, host: &mut dyn BcpuHost, max_steps: Option<usize>) -> HaltReason {
        self.state = BcpuState::Running;

        let mut steps: usize = 0;
        let reason = loop {
            if self.is_end_of_program() {
                break HaltReason::EndOfProgram;
            }
            if let Some(limit) = max_steps {
                if steps >= limit {
                    break HaltReason::StepLimit;
                }
            }

            if let Err(e) = self.step() {
                return HaltReason::Fault(e);
            }
            steps += 1;

            host.refresh(&self.mem);
            if host.quit_requested() {
                break HaltReason::QuitRequested;
            }
        };

        info!("Halted after {} instructions: {:?}", steps, reason);
        self.state = BcpuState::Halted(reason);
        reason
    }

    pub fn print_state(&self) {
        info!("=========================================================");
        info!(
            "A: {:02x} B: {:02x} C: {:02x} D: {:02x} BI: {:02x} P: {:02x} S: {:02x}",
            self.reg(Reg::A),
            self.reg(Reg::B),
            self.reg(Reg::C),
            self.reg(Reg::D),
            self.reg(Reg::BI),
            self.reg(Reg::P),
            self.reg(Reg::S)
        );
        info!(
            "PC: {} ROP: {:02x} DR1: {:02x} DR2: {:02x} EQUAL: {:?}",
            self.pc,
            self.rop,
            self.dr1,
            self.dr2,
            self.flag(BcpuFlag::Equal)
        );
    }

    pub fn dump_registers<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        for reg in Reg::ALL.iter() {
            writeln!(w, "{:>3}: 0x{:02x}", reg.name(), self.reg(*reg))?;
        }
        writeln!(w)?;
        writeln!(w, "ROP: 0x{:02x}", self.rop)?;
        writeln!(w, "DR1: 0x{:02x}", self.dr1)?;
        writeln!(w, "DR2: 0x{:02x}", self.dr2)?;
        writeln!(w)?;
        writeln!(w, "PCH: 0x{:02x}", self.pc.bank)?;
        writeln!(w, "PCL: 0x{:02x}", self.pc.addr)?;
        writeln!(
            w,
            "FLAGS: N={} C={} E={} V={}",
            self.flag(BcpuFlag::Negative) as u8,
            self.flag(BcpuFlag::Carry) as u8,
            self.flag(BcpuFlag::Equal) as u8,
            self.flag(BcpuFlag::Overflow) as u8
        )
    }

    /// Hex dump of the first `len` bytes of a bank, sixteen bytes per row.
    pub fn dump_memory<W: fmt::Write>(&self, w: &mut W, bank: u8, len: usize) -> fmt::Result {
        let len = len.min(MEM_BANK_NUM_BYTES);
        for (row, chunk) in self.mem.bank(bank)[..len].chunks(16).enumerate() {
            write!(w, "{:02x}:{:02x} ", bank, row * 16)?;
            for value in chunk.iter() {
                write!(w, " {:02x}", value)?;
            }
            writeln!(w)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod cpu_tests {
    use super::{BcpuPc, BcpuState, HaltReason};
    use crate::consts::opcodes::*;
    use crate::consts::cpu::*;
    use crate::error::BcpuError;
    use crate::host::{BcpuHost, NullHost};
    use crate::instr::tests::{init_cpu, load_cpu, validate_cpu_state};
    use crate::instr::BcpuMnem;
    use crate::mem::{BcpuMemoryMap, Reg};

    struct QuitAfter {
        remaining: usize,
        refreshes: usize,
    }

    impl BcpuHost for QuitAfter {
        fn refresh(&mut self, _mem: &BcpuMemoryMap) {
            self.refreshes += 1;
        }

        fn quit_requested(&mut self) -> bool {
            self.remaining -= 1;
            self.remaining == 0
        }
    }

    #[test]
    fn pc_advance_carries_into_next_bank() {
        let mut pc = BcpuPc::new(3, 0xFE);
        assert!(!pc.advance());
        assert_eq!(pc, BcpuPc::new(4, 0x00));

        let mut pc = BcpuPc::new(0xFF, 0xFE);
        assert!(pc.advance());
        assert_eq!(pc, BcpuPc::new(0x00, 0x00));
        assert_eq!(BcpuPc::new(1, 2).linear(), 0x102);
    }

    #[test]
    fn operand_latch_loads_register() {
        let mut cpu = load_cpu(&[SOI, 0x07, LDI, REG_A]);
        cpu.step().unwrap();
        assert_eq!(cpu.dr2, 0x07);
        assert_eq!(cpu.reg(Reg::A), 0x00);

        cpu.step().unwrap();
        assert_eq!(cpu.reg(Reg::A), 0x07);
        validate_cpu_state(&cpu, 0, 4);
    }

    #[test]
    fn latch_is_not_cleared_after_use() {
        // The second LDI has no SOI in front of it and reuses DR2
        let mut cpu = load_cpu(&[SOI, 0x2A, LDI, REG_A, LDI, REG_B]);
        for _ in 0..3 {
            cpu.step().unwrap();
        }
        assert_eq!(cpu.reg(Reg::A), 0x2A);
        assert_eq!(cpu.reg(Reg::B), 0x2A);
        assert_eq!(cpu.dr2, 0x2A);
    }

    #[test]
    fn latch_opcode_leaves_dr1_alone() {
        let mut cpu = load_cpu(&[ADDI, 0x05, SOR, REG_C]);
        cpu.step().unwrap();
        cpu.step().unwrap();
        assert_eq!(cpu.dr1, 0x05);
        assert_eq!(cpu.dr2, REG_C);
        assert_eq!(cpu.rop, SOR);
    }

    #[test]
    fn nop_clears_operand_registers() {
        let mut cpu = load_cpu(&[SOI, 0x33, ADDI, 0x01, NOP, 0x99]);
        for _ in 0..3 {
            cpu.step().unwrap();
        }
        assert_eq!(cpu.dr1, 0);
        assert_eq!(cpu.dr2, 0);
        assert_eq!(cpu.reg(Reg::A), 0x01);
    }

    #[test]
    fn unknown_opcode_behaves_like_nop() {
        let mut nop = load_cpu(&[SOI, 0x10, NOP, 0x00]);
        let mut unk = load_cpu(&[SOI, 0x10, 0x7F, 0x00]);
        for _ in 0..2 {
            nop.step().unwrap();
            unk.step().unwrap();
        }

        for reg in Reg::ALL.iter() {
            assert_eq!(nop.reg(*reg), unk.reg(*reg));
        }
        assert_eq!(nop.mem.regs().flags, unk.mem.regs().flags);
        assert_eq!(nop.pc, unk.pc);
        assert_eq!(nop.unknown_opcodes, 0);
        assert_eq!(unk.unknown_opcodes, 1);
        assert_eq!(unk.history().last().unwrap().mnem, BcpuMnem::UNKNOWN);
    }

    #[test]
    fn fetch_rolls_over_at_last_bank_offset() {
        let mut cpu = init_cpu();
        cpu.write(1, 0x00, ADDI);
        cpu.write(1, 0x01, 0x03);
        // Would be fetched if the rollover did not happen
        cpu.write(0, 0xFF, ADDI);
        cpu.pc = BcpuPc::new(0, 0xFF);

        cpu.step().unwrap();
        assert_eq!(cpu.reg(Reg::A), 0x03);
        validate_cpu_state(&cpu, 1, 0x02);
    }

    #[test]
    fn run_stops_at_end_of_program() {
        let mut cpu = load_cpu(&[ADDI, 0x01, ADDI, 0x01]);
        let reason = cpu.run(&mut NullHost, None);

        assert_eq!(reason, HaltReason::EndOfProgram);
        assert_eq!(cpu.state, BcpuState::Halted(HaltReason::EndOfProgram));
        assert_eq!(cpu.reg(Reg::A), 0x02);
        // The word right at the program length is still fetched (zero, NOP)
        assert_eq!(cpu.total_steps, 3);
        assert!(cpu.is_end_of_program());
    }

    #[test]
    fn run_stops_on_quit_request() {
        // Infinite loop: JMPI 0x00 with bank 0 in the latch
        let mut cpu = load_cpu(&[SOI, 0x00, JMPI, 0x00]);
        let mut host = QuitAfter {
            remaining: 5,
            refreshes: 0,
        };
        let reason = cpu.run(&mut host, None);

        assert_eq!(reason, HaltReason::QuitRequested);
        assert_eq!(host.refreshes, 5);
        assert_eq!(cpu.total_steps, 5);
    }

    #[test]
    fn run_honors_step_limit() {
        let mut cpu = load_cpu(&[SOI, 0x00, JMPI, 0x00]);
        assert_eq!(cpu.run(&mut NullHost, Some(100)), HaltReason::StepLimit);
        assert_eq!(cpu.total_steps, 100);
        assert!(cpu.is_halted());
    }

    #[test]
    fn run_halts_on_invalid_register() {
        let mut cpu = load_cpu(&[ADDI, 0x01, INCR, 0x09, ADDI, 0x01]);
        let reason = cpu.run(&mut NullHost, None);

        assert_eq!(
            reason,
            HaltReason::Fault(BcpuError::InvalidRegister { code: 0x09 })
        );
        assert_eq!(cpu.state, BcpuState::Halted(reason));
        // Execution stopped at the faulting instruction
        assert_eq!(cpu.reg(Reg::A), 0x01);
        validate_cpu_state(&cpu, 0, 2);
    }

    #[test]
    fn history_keeps_recent_instructions() {
        let mut program = [0u8; 64];
        for i in 0..32 {
            program[i * 2] = ADDI;
            program[i * 2 + 1] = i as u8;
        }
        let mut cpu = load_cpu(&program);
        for _ in 0..32 {
            cpu.step().unwrap();
        }

        let operands: std::vec::Vec<u8> = cpu.history().map(|i| i.operand).collect();
        assert_eq!(operands.len(), crate::consts::TRACE_DEPTH);
        assert_eq!(operands[0], 16);
        assert_eq!(*operands.last().unwrap(), 31);
    }

    #[test]
    fn reset_keeps_memory() {
        let mut cpu = load_cpu(&[SOI, 0x07, LDI, REG_D]);
        cpu.step().unwrap();
        cpu.step().unwrap();
        cpu.reset();

        assert_eq!(cpu.reg(Reg::D), 0);
        assert_eq!(cpu.dr2, 0);
        validate_cpu_state(&cpu, 0, 0);
        assert_eq!(cpu.read(0, 0), SOI);
    }

    #[test]
    fn dumps_format_state() {
        let mut cpu = load_cpu(&[SOI, 0x07, LDI, REG_A]);
        cpu.step().unwrap();
        cpu.step().unwrap();

        let mut regs = std::string::String::new();
        cpu.dump_registers(&mut regs).unwrap();
        assert!(regs.contains("  A: 0x07"));
        assert!(regs.contains("DR2: 0x07"));
        assert!(regs.contains("PCL: 0x04"));
        assert!(regs.contains("E=0"));

        let mut mem = std::string::String::new();
        cpu.dump_memory(&mut mem, 0, 20).unwrap();
        let lines: std::vec::Vec<&str> = mem.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "00:00  80 07 06 01 00 00 00 00 00 00 00 00 00 00 00 00");
        assert_eq!(lines[1], "00:10  00 00 00 00");
    }
}

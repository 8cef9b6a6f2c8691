use core::fmt;

use crate::cpu::BcpuPc;
use crate::instr::{BcpuInst, BcpuMnem, BcpuOperand};
use crate::mem::Reg;

///
/// ## `disasm` Function
///
/// Decodes one instruction word. Decoding never fails: bytes without a
/// matching instruction come back as `BcpuMnem::UNKNOWN`.
///
pub fn disasm(pc: BcpuPc, opcode: u8, operand: u8) -> BcpuInst {
    BcpuInst::new(pc, opcode, operand)
}

///
/// Walks a program image word by word, the same way the control unit would
/// when no jumps are taken. Two-operand instructions are paired with the
/// value the most recent SOI/SOR (or NOP) left in the latch.
///
pub struct BcpuDisasm<'a> {
    program: &'a [u8],
    offset: usize,
    latch: Option<u8>,
}

impl<'a> BcpuDisasm<'a> {
    pub fn new(program: &'a [u8]) -> BcpuDisasm<'a> {
        BcpuDisasm {
            program,
            offset: 0,
            latch: None,
        }
    }
}

impl<'a> Iterator for BcpuDisasm<'a> {
    type Item = BcpuInst;

    fn next(&mut self) -> Option<BcpuInst> {
        if self.offset >= self.program.len() {
            return None;
        }

        let opcode = self.program[self.offset];
        let operand = self.program.get(self.offset + 1).copied().unwrap_or(0);
        let pc = BcpuPc::new((self.offset >> 8) as u8, (self.offset & 0xFF) as u8);
        self.offset += 2;

        let mut inst = disasm(pc, opcode, operand);
        match inst.mnem {
            BcpuMnem::SOI | BcpuMnem::SOR => self.latch = Some(operand),
            BcpuMnem::NOP => self.latch = Some(0),
            _ if inst.mnem.num_operands() == 2 => inst.latch = self.latch,
            _ => {}
        }
        Some(inst)
    }
}

fn fmt_operand(f: &mut fmt::Formatter<'_>, kind: BcpuOperand, value: Option<u8>) -> fmt::Result {
    match (kind, value) {
        (_, None) => write!(f, "?"),
        (BcpuOperand::Imm, Some(v)) => write!(f, "0x{:02x}", v),
        (BcpuOperand::Reg, Some(v)) => match Reg::from_code(v) {
            Ok(reg) => write!(f, "{}", reg.name()),
            Err(_) => write!(f, "r{}", v),
        },
    }
}

impl fmt::Display for BcpuInst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  {:02x} {:02x}  {:<6}",
            self.pc,
            self.opcode,
            self.operand,
            self.mnem.name()
        )?;

        match self.mnem.operands() {
            [] => Ok(()),
            [first] => {
                write!(f, " ")?;
                fmt_operand(f, *first, Some(self.operand))
            }
            [first, second, ..] => {
                write!(f, " ")?;
                fmt_operand(f, *first, Some(self.operand))?;
                write!(f, ", ")?;
                fmt_operand(f, *second, self.latch)?;
                self.fmt_jump_target(f)
            }
        }
    }
}

impl BcpuInst {
    // Immediate jumps with a known bank get their target spelled out
    fn fmt_jump_target(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.mnem.is_jump() || self.mnem.operands() != [BcpuOperand::Imm, BcpuOperand::Imm] {
            return Ok(());
        }
        match self.latch {
            Some(bank) => write!(f, "  ; -> {}", BcpuPc::new(bank, self.operand)),
            None => Ok(()),
        }
    }
}

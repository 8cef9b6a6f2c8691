pub mod arith;
pub mod cf;
pub mod ldst;
pub mod logic;
pub mod stack;

pub use arith::BcpuArith;
pub use cf::BcpuControlFlow;
pub use ldst::BcpuLoadStore;
pub use logic::BcpuLogic;
pub use stack::BcpuStackOps;

#[cfg(test)]
pub mod tests;

use crate::consts::opcodes::*;
use crate::cpu::BcpuPc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BcpuMnem {
    NOP,
    SOI,
    SOR,
    BSWCHI,
    BSWCHR,
    ADDI,
    ADDR,
    SUBI,
    SUBR,
    LDI,
    CPY,
    MOVMI,
    MOVMR,
    GETP,
    SHL,
    SHR,
    JMPI,
    JMPR,
    JEI,
    JER,
    JNEI,
    JNER,
    CMPI,
    CMPR,
    LOADI,
    LOADR,
    STORI,
    STORR,
    PUSHI,
    PUSHR,
    POP,
    INCB,
    DECB,
    INCR,
    DECR,
    ANDI,
    ANDR,
    ORI,
    ORR,
    XORI,
    XORR,
    NOT,
    UNKNOWN,
}

/// How an operand byte is interpreted by an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BcpuOperand {
    Imm,
    Reg,
}

use BcpuOperand::{Imm, Reg};

impl BcpuMnem {
    ///
    /// Decodes an opcode byte. Every byte maps to a mnemonic, bytes without a
    /// matching instruction decode to `UNKNOWN`.
    ///
    pub fn from_opcode(opcode: u8) -> BcpuMnem {
        match opcode {
            NOP => BcpuMnem::NOP,
            SOI => BcpuMnem::SOI,
            SOR => BcpuMnem::SOR,
            BSWCHI => BcpuMnem::BSWCHI,
            BSWCHR => BcpuMnem::BSWCHR,
            ADDI => BcpuMnem::ADDI,
            ADDR => BcpuMnem::ADDR,
            SUBI => BcpuMnem::SUBI,
            SUBR => BcpuMnem::SUBR,
            LDI => BcpuMnem::LDI,
            CPY => BcpuMnem::CPY,
            MOVMI => BcpuMnem::MOVMI,
            MOVMR => BcpuMnem::MOVMR,
            GETP => BcpuMnem::GETP,
            SHL => BcpuMnem::SHL,
            SHR => BcpuMnem::SHR,
            JMPI => BcpuMnem::JMPI,
            JMPR => BcpuMnem::JMPR,
            JEI => BcpuMnem::JEI,
            JER => BcpuMnem::JER,
            JNEI => BcpuMnem::JNEI,
            JNER => BcpuMnem::JNER,
            CMPI => BcpuMnem::CMPI,
            CMPR => BcpuMnem::CMPR,
            LOADI => BcpuMnem::LOADI,
            LOADR => BcpuMnem::LOADR,
            STORI => BcpuMnem::STORI,
            STORR => BcpuMnem::STORR,
            PUSHI => BcpuMnem::PUSHI,
            PUSHR => BcpuMnem::PUSHR,
            POP => BcpuMnem::POP,
            INCB => BcpuMnem::INCB,
            DECB => BcpuMnem::DECB,
            INCR => BcpuMnem::INCR,
            DECR => BcpuMnem::DECR,
            ANDI => BcpuMnem::ANDI,
            ANDR => BcpuMnem::ANDR,
            ORI => BcpuMnem::ORI,
            ORR => BcpuMnem::ORR,
            XORI => BcpuMnem::XORI,
            XORR => BcpuMnem::XORR,
            NOT => BcpuMnem::NOT,
            _ => BcpuMnem::UNKNOWN,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BcpuMnem::NOP => "NOP",
            BcpuMnem::SOI => "SOI",
            BcpuMnem::SOR => "SOR",
            BcpuMnem::BSWCHI => "BSWCHI",
            BcpuMnem::BSWCHR => "BSWCHR",
            BcpuMnem::ADDI => "ADDI",
            BcpuMnem::ADDR => "ADDR",
            BcpuMnem::SUBI => "SUBI",
            BcpuMnem::SUBR => "SUBR",
            BcpuMnem::LDI => "LDI",
            BcpuMnem::CPY => "CPY",
            BcpuMnem::MOVMI => "MOVMI",
            BcpuMnem::MOVMR => "MOVMR",
            BcpuMnem::GETP => "GETP",
            BcpuMnem::SHL => "SHL",
            BcpuMnem::SHR => "SHR",
            BcpuMnem::JMPI => "JMPI",
            BcpuMnem::JMPR => "JMPR",
            BcpuMnem::JEI => "JEI",
            BcpuMnem::JER => "JER",
            BcpuMnem::JNEI => "JNEI",
            BcpuMnem::JNER => "JNER",
            BcpuMnem::CMPI => "CMPI",
            BcpuMnem::CMPR => "CMPR",
            BcpuMnem::LOADI => "LOADI",
            BcpuMnem::LOADR => "LOADR",
            BcpuMnem::STORI => "STORI",
            BcpuMnem::STORR => "STORR",
            BcpuMnem::PUSHI => "PUSHI",
            BcpuMnem::PUSHR => "PUSHR",
            BcpuMnem::POP => "POP",
            BcpuMnem::INCB => "INCB",
            BcpuMnem::DECB => "DECB",
            BcpuMnem::INCR => "INCR",
            BcpuMnem::DECR => "DECR",
            BcpuMnem::ANDI => "ANDI",
            BcpuMnem::ANDR => "ANDR",
            BcpuMnem::ORI => "ORI",
            BcpuMnem::ORR => "ORR",
            BcpuMnem::XORI => "XORI",
            BcpuMnem::XORR => "XORR",
            BcpuMnem::NOT => "NOT",
            BcpuMnem::UNKNOWN => "???",
        }
    }

    ///
    /// Operand layout of the instruction as (DR1, DR2). Instructions with two
    /// entries read DR2 from the operand latch, which must have been primed by
    /// an SOI/SOR beforehand.
    ///
    pub fn operands(self) -> &'static [BcpuOperand] {
        match self {
            BcpuMnem::NOP | BcpuMnem::POP | BcpuMnem::INCB | BcpuMnem::DECB => &[],
            BcpuMnem::UNKNOWN => &[],

            BcpuMnem::SOI
            | BcpuMnem::BSWCHI
            | BcpuMnem::ADDI
            | BcpuMnem::SUBI
            | BcpuMnem::MOVMI
            | BcpuMnem::PUSHI => &[Imm],

            BcpuMnem::SOR
            | BcpuMnem::BSWCHR
            | BcpuMnem::ADDR
            | BcpuMnem::SUBR
            | BcpuMnem::MOVMR
            | BcpuMnem::GETP
            | BcpuMnem::SHL
            | BcpuMnem::SHR
            | BcpuMnem::PUSHR
            | BcpuMnem::INCR
            | BcpuMnem::DECR
            | BcpuMnem::NOT => &[Reg],

            // DR1 = address, DR2 = bank
            BcpuMnem::JMPI | BcpuMnem::JEI | BcpuMnem::JNEI => &[Imm, Imm],

            BcpuMnem::LDI | BcpuMnem::CMPI | BcpuMnem::LOADI | BcpuMnem::STORI => &[Reg, Imm],

            // DR1 = value, DR2 = destination
            BcpuMnem::ANDI | BcpuMnem::ORI | BcpuMnem::XORI => &[Imm, Reg],

            BcpuMnem::CPY
            | BcpuMnem::JMPR
            | BcpuMnem::JER
            | BcpuMnem::JNER
            | BcpuMnem::CMPR
            | BcpuMnem::LOADR
            | BcpuMnem::STORR
            | BcpuMnem::ANDR
            | BcpuMnem::ORR
            | BcpuMnem::XORR => &[Reg, Reg],
        }
    }

    pub fn num_operands(self) -> usize {
        self.operands().len()
    }

    /// SOI and SOR only prime the operand latch.
    pub fn is_latch(self) -> bool {
        matches!(self, BcpuMnem::SOI | BcpuMnem::SOR)
    }

    pub fn is_jump(self) -> bool {
        matches!(
            self,
            BcpuMnem::JMPI
                | BcpuMnem::JMPR
                | BcpuMnem::JEI
                | BcpuMnem::JER
                | BcpuMnem::JNEI
                | BcpuMnem::JNER
        )
    }
}

///
/// A fetched instruction word: one opcode byte and one operand byte, along
/// with where it was fetched from.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BcpuInst {
    pub pc: BcpuPc,
    pub mnem: BcpuMnem,
    pub opcode: u8,
    pub operand: u8,

    /// Latch value this instruction pairs with, when known. Only filled in
    /// by the disassembler for two-operand instructions.
    pub latch: Option<u8>,
}

impl BcpuInst {
    pub fn new(pc: BcpuPc, opcode: u8, operand: u8) -> BcpuInst {
        BcpuInst {
            pc,
            mnem: BcpuMnem::from_opcode(opcode),
            opcode,
            operand,
            latch: None,
        }
    }
}

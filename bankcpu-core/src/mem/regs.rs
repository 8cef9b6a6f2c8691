use crate::consts::cpu::*;
use crate::error::{BcpuError, BcpuResult};

use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reg {
    A,
    B,
    C,
    D,
    BI,
    P,
    S,
}

// Operand code to register lookup. Index 0 is deliberately empty, code 0
// never names a register.
const REG_TABLE: [Option<Reg>; NUM_REGS + 1] = [
    None,
    Some(Reg::A),
    Some(Reg::B),
    Some(Reg::C),
    Some(Reg::D),
    Some(Reg::BI),
    Some(Reg::P),
    Some(Reg::S),
];

impl Reg {
    pub const ALL: [Reg; NUM_REGS] = [Reg::A, Reg::B, Reg::C, Reg::D, Reg::BI, Reg::P, Reg::S];

    ///
    /// Resolves an operand byte into a register. Any code outside of 1..=7
    /// results in `BcpuError::InvalidRegister`.
    ///
    pub fn from_code(code: u8) -> BcpuResult<Reg> {
        match REG_TABLE.get(code as usize) {
            Some(Some(reg)) => Ok(*reg),
            _ => Err(BcpuError::InvalidRegister { code }),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Reg::A => REG_A,
            Reg::B => REG_B,
            Reg::C => REG_C,
            Reg::D => REG_D,
            Reg::BI => REG_BI,
            Reg::P => REG_P,
            Reg::S => REG_S,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Reg::A => "A",
            Reg::B => "B",
            Reg::C => "C",
            Reg::D => "D",
            Reg::BI => "BI",
            Reg::P => "P",
            Reg::S => "S",
        }
    }

    fn slot(self) -> usize {
        (self.code() - 1) as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BcpuFlag {
    Negative = 0,
    Carry = 1,
    Equal = 2,
    Overflow = 3,
}

///
/// Condition flags. Only `Equal` is ever written (compares) or read
/// (conditional jumps). The remaining slots are reserved and stay clear.
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BcpuFlags {
    bits: [bool; 4],
}

impl BcpuFlags {
    pub fn get(&self, flag: BcpuFlag) -> bool {
        self.bits[flag as usize]
    }

    pub fn set(&mut self, flag: BcpuFlag, value: bool) {
        self.bits[flag as usize] = value;
    }
}

#[derive(Clone)]
pub struct BcpuRegs {
    regs: [u8; NUM_REGS],
    pub flags: BcpuFlags,
}

impl BcpuRegs {
    pub fn new() -> BcpuRegs {
        BcpuRegs {
            regs: [0; NUM_REGS],
            flags: BcpuFlags::default(),
        }
    }

    pub fn reset(&mut self) {
        self.regs = [0; NUM_REGS];
        self.flags = BcpuFlags::default();
    }

    ///
    /// ## `resolve` Function
    ///
    /// Resolves a register code into a mutable cell within the register file.
    ///
    /// ### Arguments
    ///   - `code` - Register code as found in DR1 or DR2
    ///
    /// ### Result
    ///  `&mut u8` to the register storage, or `BcpuError::InvalidRegister`
    ///  for codes 0 and 8 and above.
    ///
    pub fn resolve(&mut self, code: u8) -> BcpuResult<&mut u8> {
        let reg = Reg::from_code(code)?;
        Ok(&mut self.regs[reg.slot()])
    }

    pub fn read(&self, reg: Reg) -> u8 {
        self.regs[reg.slot()]
    }

    pub fn write(&mut self, reg: Reg, value: u8) {
        if reg == Reg::BI {
            debug!("Bank select: 0x{:02x} => 0x{:02x}", self.regs[reg.slot()], value);
        }
        self.regs[reg.slot()] = value;
    }

    pub fn read_code(&self, code: u8) -> BcpuResult<u8> {
        Ok(self.read(Reg::from_code(code)?))
    }

    pub fn write_code(&mut self, code: u8, value: u8) -> BcpuResult<()> {
        self.write(Reg::from_code(code)?, value);
        Ok(())
    }
}

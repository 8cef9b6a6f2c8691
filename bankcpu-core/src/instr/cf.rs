use crate::cpu::BcpuCpu;
use crate::error::BcpuResult;
use crate::mem::BcpuFlag;

///
/// Branch and compare instructions. Jumps load the PC with (bank, address)
/// and report `false` so the control unit does not advance past the target.
/// Conditional jumps only ever consult the EQUAL flag.
///
pub trait BcpuControlFlow {
    fn jmpi(&mut self) -> BcpuResult<bool>;
    fn jmpr(&mut self) -> BcpuResult<bool>;
    fn jei(&mut self) -> BcpuResult<bool>;
    fn jer(&mut self) -> BcpuResult<bool>;
    fn jnei(&mut self) -> BcpuResult<bool>;
    fn jner(&mut self) -> BcpuResult<bool>;

    fn cmpi(&mut self) -> BcpuResult<bool>;
    fn cmpr(&mut self) -> BcpuResult<bool>;
}

impl BcpuCpu {
    /// DR1 = address, DR2 = bank
    fn jump_immediate(&mut self) -> BcpuResult<bool> {
        self.jump(self.dr2, self.dr1);
        Ok(false)
    }

    /// DR1 = address register, DR2 = bank register
    fn jump_register(&mut self) -> BcpuResult<bool> {
        let addr = self.reg_code(self.dr1)?;
        let bank = self.reg_code(self.dr2)?;
        self.jump(bank, addr);
        Ok(false)
    }
}

impl BcpuControlFlow for BcpuCpu {
    fn jmpi(&mut self) -> BcpuResult<bool> {
        self.jump_immediate()
    }

    fn jmpr(&mut self) -> BcpuResult<bool> {
        self.jump_register()
    }

    fn jei(&mut self) -> BcpuResult<bool> {
        match self.flag(BcpuFlag::Equal) {
            true => self.jump_immediate(),
            false => Ok(true),
        }
    }

    fn jer(&mut self) -> BcpuResult<bool> {
        match self.flag(BcpuFlag::Equal) {
            true => self.jump_register(),
            false => Ok(true),
        }
    }

    fn jnei(&mut self) -> BcpuResult<bool> {
        match self.flag(BcpuFlag::Equal) {
            true => Ok(true),
            false => self.jump_immediate(),
        }
    }

    fn jner(&mut self) -> BcpuResult<bool> {
        match self.flag(BcpuFlag::Equal) {
            true => Ok(true),
            false => self.jump_register(),
        }
    }

    ///
    /// ## CMPI instruction
    ///
    ///  Sets EQUAL when the register in DR1 holds the immediate in DR2 and
    ///  clears it otherwise. There is no ordering comparison.
    ///
    fn cmpi(&mut self) -> BcpuResult<bool> {
        let val = self.reg_code(self.dr1)?;
        self.set_flag(BcpuFlag::Equal, val == self.dr2);
        Ok(true)
    }

    fn cmpr(&mut self) -> BcpuResult<bool> {
        let first = self.reg_code(self.dr1)?;
        let second = self.reg_code(self.dr2)?;
        self.set_flag(BcpuFlag::Equal, first == second);
        Ok(true)
    }
}

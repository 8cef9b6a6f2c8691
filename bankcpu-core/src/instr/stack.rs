use crate::cpu::BcpuCpu;
use crate::error::BcpuResult;
use crate::mem::Reg;

pub trait BcpuStackOps {
    fn pushi(&mut self) -> BcpuResult<bool>;
    fn pushr(&mut self) -> BcpuResult<bool>;
    fn pop(&mut self) -> BcpuResult<bool>;
}

impl BcpuStackOps for BcpuCpu {
    fn pushi(&mut self) -> BcpuResult<bool> {
        self.mem.push(self.dr1);
        Ok(true)
    }

    ///
    /// ## PUSHR instruction
    ///
    ///  Pushes the register named in DR1, then clears that register. The
    ///  slot is written at the old S, so `PUSHR S` stores S and ends with
    ///  S = 1 (cleared, then incremented).
    ///
    fn pushr(&mut self) -> BcpuResult<bool> {
        let reg = Reg::from_code(self.dr1)?;
        let value = self.reg(reg);

        self.mem.push(value);
        match reg {
            Reg::S => self.set_reg(Reg::S, 1),
            _ => self.set_reg(reg, 0),
        }
        Ok(true)
    }

    /// Always pops into B, no matter which register was pushed.
    fn pop(&mut self) -> BcpuResult<bool> {
        let value = self.mem.pop();
        self.set_reg(Reg::B, value);
        Ok(true)
    }
}

use crate::cpu::BcpuCpu;
use crate::error::BcpuResult;
use crate::mem::Reg;

use log::trace;

///
/// Arithmetic instructions. ADD/SUB always target register A. Every result
/// wraps modulo 256 and no flag is touched.
///
pub trait BcpuArith {
    fn addi(&mut self) -> BcpuResult<bool>;
    fn addr(&mut self) -> BcpuResult<bool>;
    fn subi(&mut self) -> BcpuResult<bool>;
    fn subr(&mut self) -> BcpuResult<bool>;

    fn incb(&mut self) -> BcpuResult<bool>;
    fn decb(&mut self) -> BcpuResult<bool>;
    fn incr(&mut self) -> BcpuResult<bool>;
    fn decr(&mut self) -> BcpuResult<bool>;
}

impl BcpuArith for BcpuCpu {
    fn addi(&mut self) -> BcpuResult<bool> {
        let a = self.reg(Reg::A);
        let res = a.wrapping_add(self.dr1);
        trace!("A: {:02x} + {:02x} = {:02x}", a, self.dr1, res);
        self.set_reg(Reg::A, res);
        Ok(true)
    }

    fn addr(&mut self) -> BcpuResult<bool> {
        let k = self.reg_code(self.dr1)?;
        let res = self.reg(Reg::A).wrapping_add(k);
        self.set_reg(Reg::A, res);
        Ok(true)
    }

    fn subi(&mut self) -> BcpuResult<bool> {
        let res = self.reg(Reg::A).wrapping_sub(self.dr1);
        self.set_reg(Reg::A, res);
        Ok(true)
    }

    fn subr(&mut self) -> BcpuResult<bool> {
        let k = self.reg_code(self.dr1)?;
        let res = self.reg(Reg::A).wrapping_sub(k);
        self.set_reg(Reg::A, res);
        Ok(true)
    }

    ///
    /// ## INCB instruction
    ///
    ///  Increments the byte P points to within bank BI. No operands.
    ///
    fn incb(&mut self) -> BcpuResult<bool> {
        let p = self.reg(Reg::P);
        let val = self.data_read(p).wrapping_add(1);
        self.data_write(p, val);
        Ok(true)
    }

    fn decb(&mut self) -> BcpuResult<bool> {
        let p = self.reg(Reg::P);
        let val = self.data_read(p).wrapping_sub(1);
        self.data_write(p, val);
        Ok(true)
    }

    fn incr(&mut self) -> BcpuResult<bool> {
        let cell = self.mem.regs_mut().resolve(self.dr1)?;
        *cell = cell.wrapping_add(1);
        Ok(true)
    }

    fn decr(&mut self) -> BcpuResult<bool> {
        let cell = self.mem.regs_mut().resolve(self.dr1)?;
        *cell = cell.wrapping_sub(1);
        Ok(true)
    }
}

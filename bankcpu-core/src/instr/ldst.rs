use crate::cpu::BcpuCpu;
use crate::error::BcpuResult;
use crate::mem::Reg;

pub trait BcpuLoadStore {
    fn ldi(&mut self) -> BcpuResult<bool>;
    fn cpy(&mut self) -> BcpuResult<bool>;

    fn movmi(&mut self) -> BcpuResult<bool>;
    fn movmr(&mut self) -> BcpuResult<bool>;
    fn getp(&mut self) -> BcpuResult<bool>;

    fn loadi(&mut self) -> BcpuResult<bool>;
    fn loadr(&mut self) -> BcpuResult<bool>;
    fn stori(&mut self) -> BcpuResult<bool>;
    fn storr(&mut self) -> BcpuResult<bool>;

    fn bswchi(&mut self) -> BcpuResult<bool>;
    fn bswchr(&mut self) -> BcpuResult<bool>;
}

impl BcpuLoadStore for BcpuCpu {
    /// DR1 = register, DR2 = value
    fn ldi(&mut self) -> BcpuResult<bool> {
        self.set_reg_code(self.dr1, self.dr2)?;
        Ok(true)
    }

    /// DR1 = destination register, DR2 = source register
    fn cpy(&mut self) -> BcpuResult<bool> {
        let src = self.reg_code(self.dr2)?;
        self.set_reg_code(self.dr1, src)?;
        Ok(true)
    }

    ///
    /// ## MOVMI instruction
    ///
    ///  Writes the immediate in DR1 to the byte at P within bank BI. P and BI
    ///  together form the indirect address, PC is never involved.
    ///
    fn movmi(&mut self) -> BcpuResult<bool> {
        let p = self.reg(Reg::P);
        self.data_write(p, self.dr1);
        Ok(true)
    }

    fn movmr(&mut self) -> BcpuResult<bool> {
        let val = self.reg_code(self.dr1)?;
        let p = self.reg(Reg::P);
        self.data_write(p, val);
        Ok(true)
    }

    fn getp(&mut self) -> BcpuResult<bool> {
        let p = self.reg(Reg::P);
        let val = self.data_read(p);
        self.set_reg_code(self.dr1, val)?;
        Ok(true)
    }

    /// DR1 = destination register, DR2 = address within bank BI
    fn loadi(&mut self) -> BcpuResult<bool> {
        let val = self.data_read(self.dr2);
        self.set_reg_code(self.dr1, val)?;
        Ok(true)
    }

    /// DR1 = destination register, DR2 = register holding the address
    fn loadr(&mut self) -> BcpuResult<bool> {
        let addr = self.reg_code(self.dr2)?;
        let val = self.data_read(addr);
        self.set_reg_code(self.dr1, val)?;
        Ok(true)
    }

    /// DR1 = source register, DR2 = address within bank BI
    fn stori(&mut self) -> BcpuResult<bool> {
        let val = self.reg_code(self.dr1)?;
        self.data_write(self.dr2, val);
        Ok(true)
    }

    /// DR1 = source register, DR2 = register holding the address
    fn storr(&mut self) -> BcpuResult<bool> {
        let val = self.reg_code(self.dr1)?;
        let addr = self.reg_code(self.dr2)?;
        self.data_write(addr, val);
        Ok(true)
    }

    fn bswchi(&mut self) -> BcpuResult<bool> {
        self.set_reg(Reg::BI, self.dr1);
        Ok(true)
    }

    fn bswchr(&mut self) -> BcpuResult<bool> {
        let bank = self.reg_code(self.dr1)?;
        self.set_reg(Reg::BI, bank);
        Ok(true)
    }
}

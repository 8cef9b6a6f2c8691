use crate::cpu::BcpuCpu;
use crate::error::BcpuResult;

pub trait BcpuLogic {
    fn andi(&mut self) -> BcpuResult<bool>;
    fn andr(&mut self) -> BcpuResult<bool>;
    fn ori(&mut self) -> BcpuResult<bool>;
    fn orr(&mut self) -> BcpuResult<bool>;
    fn xori(&mut self) -> BcpuResult<bool>;
    fn xorr(&mut self) -> BcpuResult<bool>;
    fn not(&mut self) -> BcpuResult<bool>;

    fn shl(&mut self) -> BcpuResult<bool>;
    fn shr(&mut self) -> BcpuResult<bool>;
}

impl BcpuCpu {
    // Immediate forms: DR1 = value, DR2 = destination register
    fn logic_immediate(&mut self, op: fn(u8, u8) -> u8) -> BcpuResult<bool> {
        let value = self.dr1;
        let cell = self.mem.regs_mut().resolve(self.dr2)?;
        *cell = op(*cell, value);
        Ok(true)
    }

    // Register forms: DR1 = destination register, DR2 = operand register
    fn logic_register(&mut self, op: fn(u8, u8) -> u8) -> BcpuResult<bool> {
        let value = self.reg_code(self.dr2)?;
        let cell = self.mem.regs_mut().resolve(self.dr1)?;
        *cell = op(*cell, value);
        Ok(true)
    }

    fn unary(&mut self, op: fn(u8) -> u8) -> BcpuResult<bool> {
        let cell = self.mem.regs_mut().resolve(self.dr1)?;
        *cell = op(*cell);
        Ok(true)
    }
}

impl BcpuLogic for BcpuCpu {
    ///
    /// ## ANDI instruction
    ///
    ///  Note the operand order. The immediate comes in DR1 and the register
    ///  it is applied to comes from the latch in DR2, the reverse of LDI.
    ///
    fn andi(&mut self) -> BcpuResult<bool> {
        self.logic_immediate(|r, v| r & v)
    }

    fn andr(&mut self) -> BcpuResult<bool> {
        self.logic_register(|r, v| r & v)
    }

    fn ori(&mut self) -> BcpuResult<bool> {
        self.logic_immediate(|r, v| r | v)
    }

    fn orr(&mut self) -> BcpuResult<bool> {
        self.logic_register(|r, v| r | v)
    }

    fn xori(&mut self) -> BcpuResult<bool> {
        self.logic_immediate(|r, v| r ^ v)
    }

    fn xorr(&mut self) -> BcpuResult<bool> {
        self.logic_register(|r, v| r ^ v)
    }

    fn not(&mut self) -> BcpuResult<bool> {
        self.unary(|r| !r)
    }

    /// Shifts are by one bit with zero fill. Bits shifted out are lost.
    fn shl(&mut self) -> BcpuResult<bool> {
        self.unary(|r| r << 1)
    }

    fn shr(&mut self) -> BcpuResult<bool> {
        self.unary(|r| r >> 1)
    }
}

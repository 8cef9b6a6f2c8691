mod ram;
pub mod regs;
mod stack;

#[cfg(test)]
mod tests;

pub use regs::{BcpuFlag, BcpuFlags, BcpuRegs, Reg};

use log::{debug, warn};

use crate::consts::{MEM_BANK_NUM_BYTES, MEM_NUM_BYTES};
use crate::error::{BcpuError, BcpuResult};

// ============================================================================
// Trait Declarations
// ============================================================================
trait BcpuMemType {
    fn read(&self, bank_idx: usize, bank_offset: usize) -> u8;
    fn write(&mut self, bank_idx: usize, bank_offset: usize, value: u8);
}

///
/// Machine storage: the 256 banks of data/program memory, the stack region,
/// and the register file.
///
#[derive(Clone)]
pub struct BcpuMemoryMap {
    ram: ram::BcpuRam,
    stack: stack::BcpuStack,
    regs: regs::BcpuRegs,
}

impl BcpuMemoryMap {
    pub fn new() -> BcpuMemoryMap {
        BcpuMemoryMap {
            ram: ram::BcpuRam::new(),
            stack: stack::BcpuStack::new(),
            regs: regs::BcpuRegs::new(),
        }
    }

    pub fn reset(&mut self) {
        self.ram.reset();
        self.stack.reset();
        self.regs.reset();
    }

    pub fn regs(&self) -> &regs::BcpuRegs {
        &self.regs
    }

    pub fn regs_mut(&mut self) -> &mut regs::BcpuRegs {
        &mut self.regs
    }

    pub fn read_byte(&self, bank: u8, address: u8) -> u8 {
        self.ram.read(bank as usize, address as usize)
    }

    pub fn write_byte(&mut self, bank: u8, address: u8, value: u8) {
        self.ram.write(bank as usize, address as usize, value)
    }

    /// Read-only view of a whole bank, used by the display and dumps.
    pub fn bank(&self, bank: u8) -> &[u8; MEM_BANK_NUM_BYTES] {
        self.ram.bank(bank as usize)
    }

    ///
    /// ## `load_program` Function
    ///
    /// Copies a flat program image into memory starting at bank 0, offset 0.
    /// Every 256 bytes the load moves on to the next bank.
    ///
    /// ### Arguments
    ///   - `program` - Raw program image. No header or checksum.
    ///
    /// ### Result
    ///  Number of bytes loaded, or `BcpuError::ProgramTooLarge` if the image
    ///  does not fit within memory. Nothing is written on failure.
    ///
    pub fn load_program(&mut self, program: &[u8]) -> BcpuResult<usize> {
        if program.len() > MEM_NUM_BYTES {
            return Err(BcpuError::ProgramTooLarge { len: program.len() });
        }

        for (bank_idx, chunk) in program.chunks(MEM_BANK_NUM_BYTES).enumerate() {
            for (offset, value) in chunk.iter().enumerate() {
                self.ram.write(bank_idx, offset, *value);
            }
        }
        debug!("Loaded program image: {} bytes", program.len());
        Ok(program.len())
    }

    ///
    /// Pushes a value at S, then increments S. S wraps modulo 256 once the
    /// last stack slot is used.
    ///
    pub fn push(&mut self, value: u8) {
        let sp = self.regs.read(Reg::S);
        self.stack.write(0, sp as usize, value);

        let (next, wrapped) = sp.overflowing_add(1);
        if wrapped {
            warn!("Stack overflow. S wrapped to 0x{:02x}", next);
        }
        self.regs.write(Reg::S, next);
    }

    ///
    /// Decrements S, then reads and clears the slot it points to. S wraps
    /// to 0xFF when popping an empty stack.
    ///
    pub fn pop(&mut self) -> u8 {
        let (sp, wrapped) = self.regs.read(Reg::S).overflowing_sub(1);
        if wrapped {
            warn!("Stack underflow. S wrapped to 0x{:02x}", sp);
        }
        self.regs.write(Reg::S, sp);

        let value = self.stack.read(0, sp as usize);
        self.stack.write(0, sp as usize, 0);
        value
    }

    pub fn read_stack(&self, offset: u8) -> u8 {
        self.stack.read(0, offset as usize)
    }
}

use thiserror::Error;

/// Faults raised by the core while loading or executing a program.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BcpuError {
    /// An operand named a register code outside of 1..=7.
    #[error("invalid register code 0x{code:02x}")]
    InvalidRegister { code: u8 },

    /// The program image does not fit within the banked memory.
    #[error("program image of {len} bytes exceeds memory")]
    ProgramTooLarge { len: usize },
}

pub type BcpuResult<T> = Result<T, BcpuError>;

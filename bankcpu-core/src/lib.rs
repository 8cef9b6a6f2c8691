#![cfg_attr(not(test), no_std)]

pub mod consts;
pub mod cpu;
pub mod disasm;
pub mod error;
pub mod host;
pub mod instr;
pub mod mem;

pub use error::{BcpuError, BcpuResult};

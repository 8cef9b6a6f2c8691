use crate::mem::BcpuMemoryMap;

///
/// The collaborator that receives control after every executed instruction.
/// This is the only suspension and cancellation point of the control loop.
///
pub trait BcpuHost {
    /// Called once per instruction so the display can be redrawn from the
    /// current memory contents. Memory is only ever read here.
    fn refresh(&mut self, _mem: &BcpuMemoryMap) {}

    /// Polled once per instruction after `refresh`. Returning true halts the
    /// machine before the next fetch.
    fn quit_requested(&mut self) -> bool;
}

/// Host that never redraws and never asks to quit.
pub struct NullHost;

impl BcpuHost for NullHost {
    fn quit_requested(&mut self) -> bool {
        false
    }
}

use crate::consts::STACK_NUM_BYTES;
use crate::mem::BcpuMemType;
use log::trace;

///
/// Stack storage. This region sits outside of the banked memory and is only
/// reachable through PUSHI/PUSHR/POP. The stack pointer itself is register S,
/// owned by the register file, so `bank_idx` is ignored here.
///
#[derive(Clone)]
pub struct BcpuStack {
    slots: [u8; STACK_NUM_BYTES],
}

impl BcpuStack {
    pub fn new() -> BcpuStack {
        BcpuStack {
            slots: [0; STACK_NUM_BYTES],
        }
    }

    pub fn reset(&mut self) {
        self.slots = [0; STACK_NUM_BYTES];
    }
}

impl BcpuMemType for BcpuStack {
    fn read(&self, _bank_idx: usize, bank_offset: usize) -> u8 {
        let res = self.slots[bank_offset];
        trace!("Stack Read: 0x{:02x}: 0x{:02x}", bank_offset, res);
        res
    }

    fn write(&mut self, _bank_idx: usize, bank_offset: usize, value: u8) {
        trace!("Stack Write: 0x{:02x}: 0x{:02x}", bank_offset, value);
        self.slots[bank_offset] = value;
    }
}

use crate::consts::{MEM_BANK_NUM_BYTES, MEM_NUM_BANKS};
use crate::mem::BcpuMemType;
use log::trace;

#[derive(Clone)]
pub struct BcpuRam {
    banks: [[u8; MEM_BANK_NUM_BYTES]; MEM_NUM_BANKS],
}

impl BcpuRam {
    ///
    /// Constructor for BcpuRam structure. This will create a blank RAM state of
    /// all zeros across every bank.
    ///
    pub fn new() -> BcpuRam {
        BcpuRam {
            banks: [[0; MEM_BANK_NUM_BYTES]; MEM_NUM_BANKS],
        }
    }

    pub fn reset(&mut self) {
        self.banks = [[0; MEM_BANK_NUM_BYTES]; MEM_NUM_BANKS];
    }

    pub fn bank(&self, bank_idx: usize) -> &[u8; MEM_BANK_NUM_BYTES] {
        &self.banks[bank_idx]
    }
}

impl BcpuMemType for BcpuRam {
    ///
    /// BcpuRam implementation of `read` function. Every bank index and offset
    /// within 0..=255 is valid, there is no access control on any bank.
    ///
    /// # Arguments
    ///
    ///  - `bank_idx` - usize - Bank index of RAM to read from
    ///  - `bank_offset` - usize - Byte offset within a given `bank_idx`
    ///
    fn read(&self, bank_idx: usize, bank_offset: usize) -> u8 {
        let res = self.banks[bank_idx][bank_offset];
        trace!(
            "RAM Read: 0x{:02x},0x{:02x}: 0x{:02x}",
            bank_idx,
            bank_offset,
            res
        );
        res
    }

    fn write(&mut self, bank_idx: usize, bank_offset: usize, value: u8) {
        trace!(
            "RAM Write: 0x{:02x},0x{:02x}: 0x{:02x}",
            bank_idx,
            bank_offset,
            value
        );
        self.banks[bank_idx][bank_offset] = value;
    }
}

#[cfg(test)]
mod ram_unittests {
    use super::BcpuRam;
    use crate::mem::BcpuMemType;

    #[test]
    fn ram_banks_are_independent() {
        let mut ram = BcpuRam::new();
        ram.write(0, 0x10, 0xAA);
        ram.write(1, 0x10, 0x55);
        ram.write(255, 0xFF, 0x01);

        assert_eq!(ram.read(0, 0x10), 0xAA);
        assert_eq!(ram.read(1, 0x10), 0x55);
        assert_eq!(ram.read(255, 0xFF), 0x01);
        assert_eq!(ram.read(2, 0x10), 0x00);
        assert_eq!(ram.bank(1)[0x10], 0x55);

        ram.reset();
        assert_eq!(ram.read(0, 0x10), 0x00);
    }
}

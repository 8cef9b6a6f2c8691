#[cfg(test)]
mod memmap_tests {
    use crate::consts::MEM_NUM_BYTES;
    use crate::error::BcpuError;
    use crate::mem::{BcpuMemoryMap, Reg};

    #[test]
    fn load_program_rolls_into_next_bank() {
        let mut mm = BcpuMemoryMap::new();
        let mut program = [0u8; 300];
        for (i, v) in program.iter_mut().enumerate() {
            *v = (i % 251) as u8 + 1;
        }

        assert_eq!(mm.load_program(&program), Ok(300));

        for i in 0..256 {
            assert_eq!(mm.read_byte(0, i as u8), program[i], "bank 0 offset {}", i);
        }
        for i in 256..300 {
            assert_eq!(
                mm.read_byte(1, (i - 256) as u8),
                program[i],
                "bank 1 offset {}",
                i - 256
            );
        }
        // Nothing past the image is touched
        assert_eq!(mm.read_byte(1, 44), 0);
        assert_eq!(mm.read_byte(2, 0), 0);
    }

    #[test]
    fn load_program_rejects_oversized_image() {
        let mut mm = BcpuMemoryMap::new();
        let program = std::vec![0xAAu8; MEM_NUM_BYTES + 1];
        assert_eq!(
            mm.load_program(&program),
            Err(BcpuError::ProgramTooLarge {
                len: MEM_NUM_BYTES + 1
            })
        );
        assert_eq!(mm.read_byte(0, 0), 0);
    }

    #[test]
    fn load_program_fills_all_of_memory() {
        let mut mm = BcpuMemoryMap::new();
        let program = std::vec![0x5Au8; MEM_NUM_BYTES];
        assert_eq!(mm.load_program(&program), Ok(MEM_NUM_BYTES));
        assert_eq!(mm.read_byte(255, 255), 0x5A);
    }

    #[test]
    fn push_pop_round_trip() {
        let mut mm = BcpuMemoryMap::new();
        mm.push(0x11);
        mm.push(0x22);
        assert_eq!(mm.regs().read(Reg::S), 2);
        assert_eq!(mm.read_stack(0), 0x11);
        assert_eq!(mm.read_stack(1), 0x22);

        assert_eq!(mm.pop(), 0x22);
        assert_eq!(mm.pop(), 0x11);
        assert_eq!(mm.regs().read(Reg::S), 0);

        // Popped slots are cleared
        assert_eq!(mm.read_stack(0), 0);
        assert_eq!(mm.read_stack(1), 0);
    }

    #[test]
    fn stack_pointer_wraps_on_overflow() {
        let mut mm = BcpuMemoryMap::new();
        mm.regs_mut().write(Reg::S, 0xFF);
        mm.push(0x77);

        assert_eq!(mm.read_stack(0xFF), 0x77);
        assert_eq!(mm.regs().read(Reg::S), 0x00);
    }

    #[test]
    fn stack_pointer_wraps_on_underflow() {
        let mut mm = BcpuMemoryMap::new();
        mm.push(0x00);
        mm.pop();
        // Stack is empty, the next pop reads the top slot
        mm.regs_mut().write(Reg::S, 0xFF);
        mm.push(0x99);
        mm.regs_mut().write(Reg::S, 0x00);

        assert_eq!(mm.pop(), 0x99);
        assert_eq!(mm.regs().read(Reg::S), 0xFF);
    }

    #[test]
    fn reset_clears_everything() {
        let mut mm = BcpuMemoryMap::new();
        mm.write_byte(7, 7, 7);
        mm.push(1);
        mm.regs_mut().write(Reg::D, 4);
        mm.reset();

        assert_eq!(mm.read_byte(7, 7), 0);
        assert_eq!(mm.read_stack(0), 0);
        assert_eq!(mm.regs().read(Reg::D), 0);
        assert_eq!(mm.regs().read(Reg::S), 0);
    }
}

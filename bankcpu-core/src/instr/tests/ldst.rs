#[cfg(test)]
mod ldst_tests {
    use crate::consts::cpu::*;
    use crate::consts::opcodes::*;
    use crate::instr::tests::{load_cpu, validate_cpu_state};
    use crate::mem::Reg;

    #[test]
    fn cpy_copies_latched_source() {
        let mut cpu = load_cpu(&[SOR, REG_B, CPY, REG_D]);
        cpu.set_reg(Reg::B, 0x5A);
        cpu.step().unwrap();
        cpu.step().unwrap();

        assert_eq!(cpu.reg(Reg::D), 0x5A);
        assert_eq!(cpu.reg(Reg::B), 0x5A);
    }

    #[test]
    fn movm_writes_through_p() {
        let mut cpu = load_cpu(&[BSWCHI, 0x10, MOVMI, 0xAB, MOVMR, REG_C]);
        cpu.set_reg(Reg::P, 0x21);
        cpu.set_reg(Reg::C, 0xCD);

        cpu.step().unwrap();
        cpu.step().unwrap();
        assert_eq!(cpu.read(0x10, 0x21), 0xAB);

        cpu.set_reg(Reg::P, 0x22);
        cpu.step().unwrap();
        assert_eq!(cpu.read(0x10, 0x22), 0xCD);
    }

    #[test]
    fn getp_reads_through_p() {
        let mut cpu = load_cpu(&[GETP, REG_B]);
        cpu.set_reg(Reg::BI, 0x03);
        cpu.set_reg(Reg::P, 0x77);
        cpu.write(0x03, 0x77, 0x99);

        cpu.step().unwrap();
        assert_eq!(cpu.reg(Reg::B), 0x99);
    }

    #[test]
    fn load_store_immediate_address() {
        let mut cpu = load_cpu(&[BSWCHI, 0x02, SOI, 0x40, STORI, REG_A, LOADI, REG_C]);
        cpu.set_reg(Reg::A, 0x66);
        for _ in 0..4 {
            cpu.step().unwrap();
        }

        assert_eq!(cpu.read(0x02, 0x40), 0x66);
        assert_eq!(cpu.reg(Reg::C), 0x66);
    }

    #[test]
    fn load_store_register_address() {
        let mut cpu = load_cpu(&[SOR, REG_D, STORR, REG_A, LOADR, REG_B]);
        cpu.set_reg(Reg::BI, 0x08);
        cpu.set_reg(Reg::A, 0x12);
        cpu.set_reg(Reg::D, 0xF0);
        for _ in 0..3 {
            cpu.step().unwrap();
        }

        assert_eq!(cpu.read(0x08, 0xF0), 0x12);
        assert_eq!(cpu.reg(Reg::B), 0x12);
    }

    #[test]
    fn bank_switch_keeps_pc() {
        let mut cpu = load_cpu(&[BSWCHI, 0x05, BSWCHR, REG_C, ADDI, 0x01]);
        cpu.set_reg(Reg::C, 0xFB);

        cpu.step().unwrap();
        assert_eq!(cpu.reg(Reg::BI), 0x05);
        validate_cpu_state(&cpu, 0, 2);

        cpu.step().unwrap();
        assert_eq!(cpu.reg(Reg::BI), 0xFB);
        validate_cpu_state(&cpu, 0, 4);

        // Code is still fetched from bank 0
        cpu.step().unwrap();
        assert_eq!(cpu.reg(Reg::A), 0x01);
    }

    #[test]
    fn ldi_bad_register_faults() {
        let mut cpu = load_cpu(&[SOI, 0x01, LDI, 0x08]);
        cpu.step().unwrap();
        assert!(cpu.step().is_err());
        validate_cpu_state(&cpu, 0, 2);
    }
}

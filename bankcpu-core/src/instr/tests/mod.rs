use crate::cpu::BcpuCpu;
use crate::mem::BcpuMemoryMap;

#[allow(dead_code)]
pub fn init_cpu() -> BcpuCpu {
    let mm = BcpuMemoryMap::new();
    BcpuCpu::new(mm)
}

#[allow(dead_code)]
pub fn load_cpu(program: &[u8]) -> BcpuCpu {
    let mut cpu = init_cpu();
    cpu.load_program(program).unwrap();
    cpu
}

#[allow(dead_code)]
pub fn validate_cpu_state(cpu: &BcpuCpu, bank: u8, addr: u8) {
    assert_eq!(
        (cpu.pc.bank, cpu.pc.addr),
        (bank, addr),
        "PC mismatch: e:{:02x}:{:02x} | r:{}",
        bank,
        addr,
        cpu.pc
    );
}

mod init_tests {
    #[test]
    fn helloworld() {
        let _ = env_logger::builder().is_test(true).try_init();
    }
}

mod ldst;

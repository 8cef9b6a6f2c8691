
/* Number of banks within the addressable memory */
pub const MEM_NUM_BANKS: usize = 256;

/* Number of bytes within a given memory bank */
pub const MEM_BANK_NUM_BYTES: usize = 256;

/* Total number of addressable bytes. Program images may not exceed this */
pub const MEM_NUM_BYTES: usize = MEM_NUM_BANKS * MEM_BANK_NUM_BYTES;

/* Size of the stack region, which lives outside of the banked memory */
pub const STACK_NUM_BYTES: usize = 256;

/* Number of executed instructions kept in the trace history */
pub const TRACE_DEPTH: usize = 16;

pub mod display {
    /* First bank mirrored by the display. Banks 251..=254 are video memory */
    pub const VRAM_FIRST_BANK: u8 = 251;
    pub const VRAM_NUM_BANKS: usize = 4;
    pub const VRAM_NUM_BYTES: usize = VRAM_NUM_BANKS * super::MEM_BANK_NUM_BYTES;
}

pub mod cpu {
    // Register codes as they appear in instruction operands. Code 0 and
    // anything above REG_S do not name a register.
    pub const REG_A: u8 = 0x01;
    pub const REG_B: u8 = 0x02;
    pub const REG_C: u8 = 0x03;
    pub const REG_D: u8 = 0x04;
    pub const REG_BI: u8 = 0x05; // Bank select for data access
    pub const REG_P: u8 = 0x06; // Pointer within bank BI
    pub const REG_S: u8 = 0x07; // Stack pointer

    pub const NUM_REGS: usize = 7;
}

pub mod opcodes {
    // Special
    pub const NOP: u8 = 0b0000_0000;
    pub const SOI: u8 = 0b1000_0000; // Second operand immediate
    pub const SOR: u8 = 0b1000_0001; // Second operand register
    pub const BSWCHI: u8 = 0b0010_0110;
    pub const BSWCHR: u8 = 0b0010_0111;

    // Arithmetic, result always in A
    pub const ADDI: u8 = 0b0000_0010;
    pub const ADDR: u8 = 0b0000_0011;
    pub const SUBI: u8 = 0b0000_0100;
    pub const SUBR: u8 = 0b0000_0101;

    // Register
    pub const LDI: u8 = 0b0000_0110;
    pub const CPY: u8 = 0b0000_0111;
    pub const MOVMI: u8 = 0b0000_1000;
    pub const MOVMR: u8 = 0b0000_1001;
    pub const GETP: u8 = 0b0010_1001;
    pub const SHL: u8 = 0b1000_1011;
    pub const SHR: u8 = 0b1000_1101;

    // Branching
    pub const JMPI: u8 = 0b0000_1010;
    pub const JMPR: u8 = 0b0000_1011;
    pub const JEI: u8 = 0b0000_1100;
    pub const JER: u8 = 0b0000_1101;
    pub const JNEI: u8 = 0b0000_1110;
    pub const JNER: u8 = 0b0000_1111;
    pub const CMPI: u8 = 0b0001_0000;
    pub const CMPR: u8 = 0b0001_0001;

    // Memory
    pub const LOADI: u8 = 0b0001_0010;
    pub const LOADR: u8 = 0b0001_0011;
    pub const STORI: u8 = 0b0001_0100;
    pub const STORR: u8 = 0b0001_0101;
    pub const PUSHI: u8 = 0b0001_0110;
    pub const PUSHR: u8 = 0b0001_0111;
    pub const POP: u8 = 0b0001_1001;

    // Increment / Decrement
    pub const INCB: u8 = 0b0001_1000;
    pub const DECB: u8 = 0b0001_1010;
    pub const INCR: u8 = 0b0001_1011;
    pub const DECR: u8 = 0b0001_1101;

    // Logic
    pub const ANDI: u8 = 0b0001_1110;
    pub const ANDR: u8 = 0b0001_1111;
    pub const ORI: u8 = 0b0010_0000;
    pub const ORR: u8 = 0b0010_0001;
    pub const XORI: u8 = 0b0010_0010;
    pub const XORR: u8 = 0b0010_0011;
    pub const NOT: u8 = 0b0010_0101;
}

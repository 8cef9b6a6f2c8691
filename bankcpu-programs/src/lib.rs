#![no_std]

pub static COUNTDOWN_PROGRAM: &'static [u8] = include_bytes!("../res/COUNTDOWN.BIN");
pub static PALETTE_PROGRAM: &'static [u8] = include_bytes!("../res/PALETTE.BIN");
pub static BLANK_PROGRAM: &'static [u8] = &[];

/// Names accepted by `find_program`.
pub const PROGRAM_NAMES: [&str; 3] = ["countdown", "palette", "blank"];

pub fn find_program(name: &str) -> Option<&'static [u8]> {
    match name {
        "countdown" => Some(COUNTDOWN_PROGRAM),
        "palette" => Some(PALETTE_PROGRAM),
        "blank" => Some(BLANK_PROGRAM),
        _ => None,
    }
}

#[cfg(test)]
mod programs_tests {
    use super::*;

    #[test]
    fn every_name_resolves() {
        for name in PROGRAM_NAMES.iter() {
            assert!(find_program(name).is_some(), "missing {}", name);
        }
        assert!(find_program("luminary").is_none());
    }

    #[test]
    fn image_sizes() {
        assert_eq!(COUNTDOWN_PROGRAM.len(), 20);
        assert_eq!(PALETTE_PROGRAM.len(), 32);
        assert!(BLANK_PROGRAM.is_empty());
    }
}

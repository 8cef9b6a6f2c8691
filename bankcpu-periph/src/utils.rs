#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
}

/* Scale factor from a 2-bit channel level to an 8-bit intensity */
const LEVEL_SCALE: u8 = 85;

///
/// # Description
///
/// Converts a video memory byte into the colour of its display block. Each
/// channel takes two bits and is scaled so level 3 is full intensity.
///
/// # Arguments
///
///  - `value` - Packed colour. Bits 0-1 red, bits 2-3 green, bits 4-5 blue.
///              Bits 6-7 are ignored.
///
/// # Return Value
///
///  - `Rgb` - Decoded colour. A zero byte always yields black.
///
pub fn decode_color(value: u8) -> Rgb {
    if value == 0 {
        return Rgb::BLACK;
    }

    Rgb {
        r: (value & 0x3) * LEVEL_SCALE,
        g: ((value >> 2) & 0x3) * LEVEL_SCALE,
        b: ((value >> 4) & 0x3) * LEVEL_SCALE,
    }
}

#[cfg(test)]
mod utils_tests {
    use super::*;

    #[test]
    fn channel_levels() {
        assert_eq!(decode_color(0x01), Rgb { r: 85, g: 0, b: 0 });
        assert_eq!(decode_color(0x0C), Rgb { r: 0, g: 255, b: 0 });
        assert_eq!(decode_color(0x20), Rgb { r: 0, g: 0, b: 170 });
        assert_eq!(decode_color(0x3F), Rgb { r: 255, g: 255, b: 255 });
    }

    #[test]
    fn zero_is_black() {
        assert_eq!(decode_color(0x00), Rgb::BLACK);
    }

    #[test]
    fn high_bits_ignored() {
        assert_eq!(decode_color(0xC5), decode_color(0x05));
        // Only the ignored bits are set, still decodes through the channels
        assert_eq!(decode_color(0xC0), Rgb::BLACK);
    }
}

use byteorder::{LittleEndian, WriteBytesExt};
use std::io::{self, Write};

/// Number of bytes the minimal-width ladder uses for `value`: 1, 2, 3, 4 or 8.
pub fn width_class(value: u64) -> usize {
    match value {
        0..=0xFF => 1,
        0x100..=0xFFFF => 2,
        0x1_0000..=0xFF_FFFF => 3,
        0x100_0000..=0xFFFF_FFFF => 4,
        _ => 8,
    }
}

/// Writes `value` little-endian using exactly [`width_class`] bytes.
pub fn write_min_width<W: Write>(writer: &mut W, value: u64) -> io::Result<()> {
    writer.write_uint::<LittleEndian>(value, width_class(value))
}

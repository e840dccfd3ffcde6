use byteorder::{LittleEndian, WriteBytesExt};
use std::io::Write;

use super::width::write_min_width;
use super::{ROW_SENTINEL, STF_PREAMBLE};
use crate::error::EncodingError;

/// Encodes ordered (key, value) rows into the STF byte layout.
///
/// Layout: preamble, `u32` row count, then every row's value followed by every
/// row's key. Rows are numbered from 1 in input order. Value characters are each
/// followed by a zero byte; key characters are not.
pub fn encode_table<K, V>(rows: &[(K, V)]) -> Result<Vec<u8>, EncodingError>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let row_count =
        u32::try_from(rows.len()).map_err(|_| EncodingError::RowCountOverflow(rows.len()))?;

    let mut out = Vec::with_capacity(estimate_size(rows));
    out.write_all(&STF_PREAMBLE)?;
    out.write_u32::<LittleEndian>(row_count)?;

    for (row, (_, value)) in (1..=row_count).zip(rows) {
        out.write_u32::<LittleEndian>(row)?;
        out.write_all(&ROW_SENTINEL)?;
        write_chars(&mut out, row, "value", value.as_ref(), true)?;
    }

    for (row, (key, _)) in (1..=row_count).zip(rows) {
        out.write_u32::<LittleEndian>(row)?;
        write_chars(&mut out, row, "key", key.as_ref(), false)?;
    }

    tracing::debug!(rows = rows.len(), bytes = out.len(), "string table encoded");
    Ok(out)
}

fn write_chars<W: Write>(
    out: &mut W,
    row: u32,
    section: &'static str,
    text: &str,
    padded: bool,
) -> Result<(), EncodingError> {
    let length = text.chars().count();
    let count = u32::try_from(length).map_err(|_| EncodingError::LengthOverflow {
        row: row as usize,
        section,
        length,
    })?;
    out.write_u32::<LittleEndian>(count)?;

    for c in text.chars() {
        write_min_width(out, u64::from(u32::from(c)))?;
        if padded {
            out.write_u8(0)?;
        }
    }
    Ok(())
}

fn estimate_size<K: AsRef<str>, V: AsRef<str>>(rows: &[(K, V)]) -> usize {
    let text: usize = rows
        .iter()
        .map(|(k, v)| k.as_ref().len() + 2 * v.as_ref().len())
        .sum();
    STF_PREAMBLE.len() + 4 + rows.len() * 20 + text
}

use std::fmt;
use num_enum::TryFromPrimitive;

/// Render a registry value by variant name, falling back to hex for unknown values.
pub fn enum_name_or_hex<T>(raw: T::Primitive) -> String
where
    T: TryFromPrimitive + fmt::Debug,
    T::Primitive: fmt::LowerHex,
{
    match T::try_from_primitive(raw) {
        Ok(variant) => format!("{:?}", variant),
        Err(_) => format!("0x{:x}", raw),
    }
}

/// Printable ASCII renders as a byte string, anything else as hex.
pub fn fmt_bytes(b: &[u8]) -> String {
    if b.iter().all(|&c| c.is_ascii_graphic() || c == b' ') {
        format!("b\"{}\"", String::from_utf8_lossy(b))
    } else {
        format!("0x{}", hex::encode(b))
    }
}

#[inline]
pub fn div_ceil(n: usize, d: usize) -> usize {
    (n + d - 1) / d
}

/// Count of distinct `block`-sized chunks in `data` (a short tail counts as its own chunk).
pub fn unique_blocks(data: &[u8], block: usize) -> usize {
    let mut seen: Vec<&[u8]> = data.chunks(block).collect();
    seen.sort_unstable();
    seen.dedup();
    seen.len()
}

//! Human-readable size parsing.

use anyhow::Context;

/// Parse a size string like "4096", "20MB", "1.5 GiB" into bytes.
/// Supports:
/// - Plain numbers (interpreted as bytes): "4096"
/// - SI suffixes, powers of 1000: "kB", "MB", "GB", "TB", "PB", "EB" (also "k", "M", ...)
/// - IEC suffixes, powers of 1024: "KiB", "MiB", "GiB", "TiB", "PiB", "EiB" (also "Ki", ...)
///
/// Suffixes are case-insensitive, may be separated by whitespace and may
/// follow a decimal number. Fractional bytes are truncated.
pub fn parse_size(s: &str) -> anyhow::Result<u64> {
    let s = s.trim();
    if s.is_empty() {
        anyhow::bail!("Empty size string");
    }

    let split = s
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(s.len());
    let (num_str, unit) = s.split_at(split);
    let unit = unit.trim();

    let value: f64 = num_str
        .parse()
        .with_context(|| format!("Invalid size value: {s}"))?;
    let multiplier =
        unit_multiplier(unit).with_context(|| format!("Unknown size unit: {unit}"))?;

    let bytes = value * multiplier as f64;
    if !bytes.is_finite() || bytes >= u64::MAX as f64 {
        anyhow::bail!("Size out of range: {s}");
    }
    Ok(bytes as u64)
}

fn unit_multiplier(unit: &str) -> Option<u64> {
    const KB: u64 = 1000;
    const KIB: u64 = 1024;

    let multiplier = match unit.to_ascii_lowercase().as_str() {
        "" | "b" => 1,
        "k" | "kb" => KB,
        "m" | "mb" => KB.pow(2),
        "g" | "gb" => KB.pow(3),
        "t" | "tb" => KB.pow(4),
        "p" | "pb" => KB.pow(5),
        "e" | "eb" => KB.pow(6),
        "ki" | "kib" => KIB,
        "mi" | "mib" => KIB.pow(2),
        "gi" | "gib" => KIB.pow(3),
        "ti" | "tib" => KIB.pow(4),
        "pi" | "pib" => KIB.pow(5),
        "ei" | "eib" => KIB.pow(6),
        _ => return None,
    };
    Some(multiplier)
}

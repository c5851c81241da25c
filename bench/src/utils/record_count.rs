use crate::args::defaults::DEFAULT_RECORD_COUNT;

/// Reads a record count the lenient way: leading decimal digits are used and
/// the rest is ignored. Input without leading digits, a zero count or an
/// overflowing number falls back to the default instead of being an error.
pub fn parse_record_count(input: &str) -> u64 {
    let input = input.trim_start();
    let digits_end = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());

    match input[..digits_end].parse::<u64>() {
        Ok(0) | Err(_) => DEFAULT_RECORD_COUNT,
        Ok(count) => count,
    }
}

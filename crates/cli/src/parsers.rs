use std::{fmt::Display, str::FromStr};

fn parse_bounded_number<T>(s: &str, min: T, max: Option<T>) -> Result<T, String>
where
    T: Copy + PartialOrd + Display + FromStr,
    <T as FromStr>::Err: Display,
{
    let value = s
        .trim()
        .parse::<T>()
        .map_err(|err| format!("invalid number '{s}': {err}"))?;
    if value < min {
        return Err(format!("value must be at least {min}"));
    }
    if let Some(max_bound) = max
        && value > max_bound
    {
        return Err(format!("value must be at most {max_bound}"));
    }
    Ok(value)
}

/// Parse a positive `usize` (>= 1) from CLI input.
///
/// # Errors
/// Returns an error if the input string is not a valid number or is less than 1.
pub fn parse_positive_usize(s: &str) -> Result<usize, String> {
    parse_bounded_number(s, 1, None)
}

/// Parse a `usize` constrained to the inclusive range [1, 512].
///
/// # Errors
/// Returns an error if the input string is not a valid number or is outside the range [1, 512].
pub fn parse_usize_1_to_512(s: &str) -> Result<usize, String> {
    parse_bounded_number(s, 1, Some(512))
}

/// Parse a glob pattern, rejecting empty input.
///
/// # Errors
/// Returns an error if the pattern is empty after trimming.
pub fn parse_pattern(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err("pattern must not be empty".to_string());
    }
    Ok(trimmed.to_string())
}

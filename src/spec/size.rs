//! Human-readable byte sizes ("20k" -> 20480)

use crate::error::ApiError;

/// Multiplier for a unit suffix; binary multiples, case-sensitive
fn unit_multiplier(unit: char) -> Option<u64> {
    match unit {
        'k' => Some(1 << 10),
        'M' => Some(1 << 20),
        'G' => Some(1 << 30),
        'T' => Some(1 << 40),
        _ => None,
    }
}

/// Parse a bare integer or an integer followed by one of `k`, `M`, `G`, `T`.
pub fn parse_size(value: &str) -> Result<u64, ApiError> {
    let trimmed = value.trim();
    let last = trimmed
        .chars()
        .last()
        .ok_or_else(|| ApiError::ConfigError("Size cannot be empty".to_string()))?;

    let (digits, multiplier) = if last.is_ascii_digit() {
        (trimmed, 1)
    } else {
        let multiplier = unit_multiplier(last).ok_or_else(|| {
            ApiError::ConfigError(format!(
                "Unknown size suffix '{}' in '{}' (expected k, M, G or T)",
                last, value
            ))
        })?;
        (&trimmed[..trimmed.len() - last.len_utf8()], multiplier)
    };

    let base: u64 = digits.trim().parse().map_err(|_| {
        ApiError::ConfigError(format!("Invalid size '{}': not a whole number", value))
    })?;

    base.checked_mul(multiplier)
        .ok_or_else(|| ApiError::ConfigError(format!("Size '{}' is too large", value)))
}

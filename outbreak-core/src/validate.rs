use crate::OutbreakError;

/// Trim `code` and reject it when nothing is left.
///
/// # Errors
/// Returns `InvalidArg` for empty or whitespace-only codes.
pub fn validate_code(code: &str) -> Result<&str, OutbreakError> {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        return Err(OutbreakError::InvalidArg(
            "country code must not be empty".into(),
        ));
    }
    Ok(trimmed)
}

/// Reject a history window shorter than one day.
///
/// # Errors
/// Returns `InvalidArg` when `days` is 0.
pub fn validate_days(days: u32) -> Result<u32, OutbreakError> {
    if days < 1 {
        return Err(OutbreakError::InvalidArg(format!(
            "history window must be at least 1 day, got {days}"
        )));
    }
    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_is_trimmed() {
        assert_eq!(validate_code("  FR ").unwrap(), "FR");
    }

    #[test]
    fn blank_code_is_rejected() {
        for code in ["", "   ", "\t\n"] {
            let err = validate_code(code).unwrap_err();
            assert!(matches!(err, OutbreakError::InvalidArg(_)), "{code:?}");
        }
    }

    #[test]
    fn zero_days_is_rejected() {
        assert!(matches!(
            validate_days(0),
            Err(OutbreakError::InvalidArg(_))
        ));
        assert_eq!(validate_days(1).unwrap(), 1);
        assert_eq!(validate_days(1500).unwrap(), 1500);
    }
}

use crate::utils::error::{GoldbachError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(GoldbachError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(GoldbachError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(GoldbachError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| GoldbachError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(GoldbachError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 質數上界必須非負
pub fn validate_bound(value: i64) -> Result<u64> {
    u64::try_from(value).map_err(|_| GoldbachError::InvalidBound { value })
}

/// Goldbach 猜想只涵蓋 >= 4 的偶數
pub fn validate_target(value: i64) -> Result<i64> {
    if value < 4 || value % 2 != 0 {
        return Err(GoldbachError::InvalidTarget { value });
    }
    Ok(value)
}

/// 取所有輸入的最大值作為上界，負數一律視為 0
pub fn bound_for(values: &[i64]) -> u64 {
    let max = values.iter().copied().max().unwrap_or(0);
    match validate_bound(max) {
        Ok(bound) => bound,
        Err(e) => {
            tracing::warn!("{}; clamping bound to 0", e);
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("input.path", "data.txt").is_ok());
        assert!(validate_path("input.path", "").is_err());
        assert!(validate_path("input.path", "da\0ta.txt").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("primes.channel_capacity", 5, 1).is_ok());
        assert!(validate_positive_number("primes.channel_capacity", 0, 1).is_err());
    }

    #[test]
    fn test_validate_bound_and_target() {
        assert_eq!(validate_bound(10).unwrap(), 10);
        assert!(matches!(
            validate_bound(-5),
            Err(GoldbachError::InvalidBound { value: -5 })
        ));

        assert!(validate_target(4).is_ok());
        assert!(validate_target(100).is_ok());
        assert!(validate_target(2).is_err());
        assert!(validate_target(15).is_err());
        assert!(validate_target(-8).is_err());
    }

    #[test]
    fn test_bound_for_clamps_negative_maximum() {
        assert_eq!(bound_for(&[3, 4, 14, 26, 100]), 100);
        assert_eq!(bound_for(&[-7, -2]), 0);
        assert_eq!(bound_for(&[]), 0);
    }
}

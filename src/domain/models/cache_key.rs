//! Stable cache keys for chaos input

/// 32-bit rolling hash over UTF-16 code units, rendered as lowercase hex of
/// its absolute value.
pub fn stable_hash(value: &str) -> String {
    let hash = value
        .encode_utf16()
        .fold(0i32, |hash, unit| {
            hash.wrapping_shl(5)
                .wrapping_sub(hash)
                .wrapping_add(i32::from(unit))
        });
    format!("{:x}", i64::from(hash).abs())
}

/// Cache key for `input` under `prefix`
pub fn cache_key(prefix: &str, input: &str) -> String {
    format!("{prefix}{}", stable_hash(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_hash_is_zero() {
        assert_eq!(stable_hash(""), "0");
    }

    #[test]
    fn test_known_values() {
        // "a" = 97, "ab" = 97 * 31 + 98
        assert_eq!(stable_hash("a"), "61");
        assert_eq!(stable_hash("ab"), format!("{:x}", 97 * 31 + 98));
    }

    #[test]
    fn test_wraps_and_takes_absolute_value() {
        let long = "Q4 deck chaos for the LT, seventeen copies and counting";
        let hash = stable_hash(long);
        assert!(!hash.starts_with('-'));
        assert_eq!(hash, stable_hash(long));
    }

    #[test]
    fn test_min_value_does_not_overflow() {
        // i32::MIN has no i32 absolute value; widening keeps it representable
        assert_eq!(format!("{:x}", i64::from(i32::MIN).abs()), "80000000");
    }

    #[test]
    fn test_cache_key_prefix() {
        assert_eq!(cache_key("bell_", "a"), "bell_61");
        assert_ne!(cache_key("walk_", "x"), cache_key("bell_", "x"));
    }
}

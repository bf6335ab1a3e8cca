//! Structural input checks run before any disk I/O.
//!
//! These are pure predicates: they never touch the filesystem and report through
//! their return value. [`crate::project::ProjectConfig::validate`] turns them into
//! typed errors.

/// Length of a private key in hex characters, without the `0x` prefix.
pub const CREDENTIAL_HEX_LEN: usize = 64;

/// Returns `true` iff `name` is non-empty and made only of ASCII letters, digits,
/// `-` and `_`.
///
/// No length cap is applied here; the orchestrator bounds it separately.
pub fn validate_project_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Returns `true` iff `key` is exactly 64 hex characters after stripping an
/// optional `0x` prefix.
///
/// Purely structural: no checksum, no curve check.
pub fn validate_credential(key: &str) -> bool {
    let hex_part = strip_hex_prefix(key);
    hex_part.len() == CREDENTIAL_HEX_LEN && hex::decode(hex_part).is_ok()
}

/// Mask a private key for display: first 6 characters, `...`, last 4.
///
/// Inputs shorter than 10 characters become `***`. Only for human-facing output;
/// the unmasked value is what goes into the secrets file.
pub fn mask_credential(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() < 10 {
        return "***".to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

fn strip_hex_prefix(key: &str) -> &str {
    key.strip_prefix("0x").unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_name_accepts_allowed_charset() {
        for name in ["my-app", "my_app", "App2", "a", "-", "_", "ABC-def_123"] {
            assert!(validate_project_name(name), "{name} should be valid");
        }
    }

    #[test]
    fn test_project_name_rejects_other_characters() {
        for name in [
            "", "my app", "my.app", "my/app", "../escape", "app!", "née", "tab\there", "semi;colon",
        ] {
            assert!(!validate_project_name(name), "{name:?} should be invalid");
        }
    }

    #[test]
    fn test_project_name_has_no_length_cap() {
        assert!(validate_project_name(&"a".repeat(10_000)));
    }

    #[test]
    fn test_credential_with_and_without_prefix() {
        let key = "a".repeat(64);
        assert!(validate_credential(&key));
        assert!(validate_credential(&format!("0x{key}")));
        assert!(validate_credential(&"0123456789abcdefABCDEF".repeat(3)[..64]));
    }

    #[test]
    fn test_credential_wrong_length() {
        assert!(!validate_credential(""));
        assert!(!validate_credential("0x"));
        assert!(!validate_credential(&"a".repeat(63)));
        assert!(!validate_credential(&"a".repeat(65)));
        assert!(!validate_credential(&format!("0x{}", "a".repeat(63))));
    }

    #[test]
    fn test_credential_non_hex() {
        let mut key = "a".repeat(63);
        key.push('g');
        assert!(!validate_credential(&key));
        assert!(!validate_credential(&format!("0X{}", "a".repeat(64))));
        assert!(!validate_credential(&"é".repeat(32)));
    }

    #[test]
    fn test_mask_short_input() {
        assert_eq!(mask_credential(""), "***");
        assert_eq!(mask_credential("123456789"), "***");
    }

    #[test]
    fn test_mask_keeps_head_and_tail() {
        let key = format!("0x{}", "ab".repeat(32));
        assert_eq!(mask_credential(&key), "0xabab...abab");
        assert_eq!(mask_credential("0123456789"), "012345...6789");
    }

    #[test]
    fn test_mask_is_deterministic_and_bounded() {
        let key = "f".repeat(64);
        let masked = mask_credential(&key);
        assert_eq!(masked, mask_credential(&key));
        let revealed = masked.replace("...", "");
        assert!(revealed.len() <= 10);
    }
}

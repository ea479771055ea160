//! Typed path parameter helpers.

use userhub_core::error::AppError;
use userhub_core::types::AccountId;

/// Parses an account id from a path segment.
pub fn parse_account_id(s: &str) -> Result<AccountId, AppError> {
    s.parse()
        .map_err(|_| AppError::validation(format!("Invalid account id: {s}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_account_id() {
        let id = AccountId::new();
        assert_eq!(parse_account_id(&id.to_string()).unwrap(), id);
        assert!(parse_account_id("42").is_err());
    }
}

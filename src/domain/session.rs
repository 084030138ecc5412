//! Mock session record.
//!
//! The session is a gate for the favorites feature, not authentication: a
//! record holds an email that was only checked for an `@`.

use serde::{Deserialize, Serialize};

use super::error::{Result, ZatlasError};

/// The logged-in identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub email: String,

    /// Unix timestamp of the login. Older storage files may lack it.
    #[serde(default)]
    pub logged_in_at: i64,
}

impl SessionRecord {
    /// Validates `email` and builds a record stamped with the current time.
    ///
    /// Only the presence of `@` is checked, after trimming surrounding
    /// whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ZatlasError::Validation`] when the address has no `@`.
    ///
    /// # Examples
    ///
    /// ```
    /// use zatlas::domain::SessionRecord;
    ///
    /// assert_eq!(SessionRecord::new("a@b.com").unwrap().email, "a@b.com");
    /// assert!(SessionRecord::new("not-an-email").is_err());
    /// ```
    pub fn new(email: &str) -> Result<Self> {
        let email = email.trim();
        if !email.contains('@') {
            return Err(ZatlasError::Validation(format!(
                "'{email}' is not an email address"
            )));
        }
        Ok(Self {
            email: email.to_string(),
            logged_in_at: chrono::Utc::now().timestamp(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_and_validates() {
        let record = SessionRecord::new("  a@b.com ").unwrap();
        assert_eq!(record.email, "a@b.com");
        assert!(record.logged_in_at > 0);

        assert!(matches!(
            SessionRecord::new("   "),
            Err(ZatlasError::Validation(_))
        ));
    }

    #[test]
    fn test_missing_timestamp_defaults() {
        let record: SessionRecord = serde_json::from_str(r#"{"email":"a@b.com"}"#).unwrap();
        assert_eq!(record.logged_in_at, 0);
    }
}

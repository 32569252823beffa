//! Login check against the configured admin credentials.
//!
//! This is a credential check only; no session or token is issued.

use crate::{config::AdminCredentials, error::AppError};

/// Accept the request only if both username and password match.
pub fn check_credentials(
    expected: &AdminCredentials,
    username: &str,
    password: &str,
) -> Result<(), AppError> {
    // Evaluate both so timing does not reveal which field was wrong.
    let username_ok = constant_time_eq(expected.username.as_bytes(), username.as_bytes());
    let password_ok = constant_time_eq(expected.password.as_bytes(), password.as_bytes());

    if username_ok & password_ok {
        Ok(())
    } else {
        Err(AppError::InvalidCredentials)
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> AdminCredentials {
        AdminCredentials {
            username: "admin".into(),
            password: "admin123".into(),
        }
    }

    #[test]
    fn accepts_configured_pair() {
        assert!(check_credentials(&admin(), "admin", "admin123").is_ok());
    }

    #[test]
    fn rejects_any_other_pair() {
        let creds = admin();
        for (user, pass) in [
            ("admin", "admin"),
            ("root", "admin123"),
            ("Admin", "admin123"),
            ("admin", "admin1234"),
            ("", ""),
        ] {
            assert!(matches!(
                check_credentials(&creds, user, pass),
                Err(AppError::InvalidCredentials)
            ));
        }
    }

    #[test]
    fn byte_comparison() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"ab"));
        assert!(constant_time_eq(b"", b""));
    }
}

//! Flow purpose tag distinguishing codes issued for different flows.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The flow a verification code was issued for.
///
/// Codes for different purposes on the same identity never interfere:
/// a `signup` code cannot satisfy a `recovery` verification and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Purpose {
    /// Phone/email sign-in or first registration
    Signup,
    /// PIN recovery flow
    Recovery,
    /// Email address ownership verification
    EmailVerify,
}

impl Purpose {
    /// Stable string form used as the storage key component
    pub fn as_str(&self) -> &'static str {
        match self {
            Purpose::Signup => "signup",
            Purpose::Recovery => "recovery",
            Purpose::EmailVerify => "email_verify",
        }
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Purpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "signup" => Ok(Purpose::Signup),
            "recovery" => Ok(Purpose::Recovery),
            "email_verify" => Ok(Purpose::EmailVerify),
            other => Err(format!("Unknown purpose: {}", other)),
        }
    }
}

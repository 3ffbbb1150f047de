//! Shared-secret gate for destructive operations.
//!
//! The ledger itself never checks permissions. Callers authenticate
//! first and hand the resulting wrapper to mutating command handlers.

use subtle::ConstantTimeEq;
use thiserror::Error;

use crate::ledger::Ledger;


#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("admin secret required for this operation (pass --secret or set SUBSPLIT_ADMIN_SECRET)")]
    MissingSecret,

    #[error("invalid admin secret")]
    BadSecret,
}


/// The static shared secret gating destructive operations.
pub struct AdminSecret(String);


impl AdminSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Constant-time comparison against a presented secret.
    pub fn matches(&self, presented: &str) -> bool {
        self.0.as_bytes().ct_eq(presented.as_bytes()).into()
    }
}


/// Proof that the caller presented the admin secret.
pub struct AuthorizedCaller<'a> {
    ledger: &'a Ledger<'a>,
}

impl std::fmt::Debug for AuthorizedCaller<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizedCaller").finish_non_exhaustive()
    }
}


impl<'a> AuthorizedCaller<'a> {
    /// Gate a ledger behind the expected secret.
    ///
    /// A store with no configured secret is ungated and authorizes any
    /// caller.
    pub fn authenticate(
        ledger: &'a Ledger<'a>,
        expected: Option<&AdminSecret>,
        presented: Option<&str>,
    ) -> Result<Self, AuthError> {
        match expected {
            None => Ok(Self { ledger }),
            Some(secret) => match presented {
                None => Err(AuthError::MissingSecret),
                Some(p) if secret.matches(p) => Ok(Self { ledger }),
                Some(_) => Err(AuthError::BadSecret),
            },
        }
    }

    pub fn ledger(&self) -> &Ledger<'a> {
        self.ledger
    }
}

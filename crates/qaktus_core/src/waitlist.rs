use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WaitlistError {
    #[error("please enter a valid email address")]
    InvalidEmail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaitlistOutcome {
    #[default]
    Idle,
    Submitting,
    Success,
    Error,
}

/// How the waitlist collaborator acknowledged a signup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupReceipt {
    Created,
    AlreadyListed,
}

pub fn is_valid_email(text: &str) -> bool {
    EMAIL_REGEX.is_match(text.trim())
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WaitlistForm {
    email: String,
    outcome: WaitlistOutcome,
    client_error: Option<WaitlistError>,
}

impl WaitlistForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn outcome(&self) -> WaitlistOutcome {
        self.outcome
    }

    pub fn client_error(&self) -> Option<WaitlistError> {
        self.client_error
    }

    /// Returns false once the signup succeeded; the form is closed for good.
    pub fn set_email(&mut self, text: impl Into<String>) -> bool {
        if self.outcome == WaitlistOutcome::Success {
            return false;
        }
        self.email = text.into();
        self.client_error = None;
        true
    }

    /// Starts a submission and returns the trimmed address to send.
    ///
    /// `Ok(None)` means nothing to do: a request is in flight or the signup
    /// already succeeded.
    pub fn submit(&mut self) -> Result<Option<String>, WaitlistError> {
        match self.outcome {
            WaitlistOutcome::Submitting | WaitlistOutcome::Success => return Ok(None),
            WaitlistOutcome::Idle | WaitlistOutcome::Error => {}
        }
        if !is_valid_email(&self.email) {
            self.client_error = Some(WaitlistError::InvalidEmail);
            return Err(WaitlistError::InvalidEmail);
        }
        self.client_error = None;
        self.outcome = WaitlistOutcome::Submitting;
        Ok(Some(self.email.trim().to_string()))
    }

    /// Applies the collaborator's answer. Ignored unless a request is in flight.
    pub fn complete<E>(&mut self, result: &Result<SignupReceipt, E>) -> bool {
        if self.outcome != WaitlistOutcome::Submitting {
            return false;
        }
        self.outcome = match result {
            Ok(SignupReceipt::Created | SignupReceipt::AlreadyListed) => WaitlistOutcome::Success,
            Err(_) => WaitlistOutcome::Error,
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_pattern_accepts_common_addresses() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("  first.last+tag@mail.example.org "));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email(""));
    }
}

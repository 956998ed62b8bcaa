//! Phone-number signup with a one-time password.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{DomainError, DomainResult};

/// Shortest password accepted at signup.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Everything the user enters on the verify-and-create step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupForm {
    /// Phone number the OTP was sent to
    pub phone: String,
    /// OTP code received
    pub otp_code: String,
    /// Full name
    pub name: String,
    /// Email address
    pub email: String,
    /// Chosen password
    pub password: String,
    /// Password typed a second time
    pub confirm_password: String,
    /// Whether the terms were accepted
    pub consent: bool,
}

impl SignupForm {
    /// Checks the form before anything is sent.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: blank phone or OTP, mismatched
    /// passwords, a short password, or missing consent.
    pub fn validate(&self) -> DomainResult<()> {
        if self.phone.trim().is_empty() {
            return Err(DomainError::MissingField("Phone number"));
        }
        if self.otp_code.trim().is_empty() {
            return Err(DomainError::MissingField("OTP code"));
        }
        if self.password != self.confirm_password {
            return Err(DomainError::PasswordMismatch);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(DomainError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            });
        }
        if !self.consent {
            return Err(DomainError::ConsentRequired);
        }
        Ok(())
    }

    /// Logical values sent to the verify endpoints.
    #[must_use]
    pub fn to_values(&self) -> Map<String, Value> {
        let mut values = Map::new();
        values.insert("phone".into(), Value::String(self.phone.trim().to_string()));
        values.insert("otp".into(), Value::String(self.otp_code.trim().to_string()));
        values.insert("name".into(), Value::String(self.name.trim().to_string()));
        values.insert("email".into(), Value::String(self.email.trim().to_string()));
        values.insert("password".into(), Value::String(self.password.clone()));
        values.insert("consent".into(), Value::Bool(self.consent));
        values
    }
}

/// Acknowledgement that an OTP was sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtpDispatch {
    /// Phone number the code went to
    pub phone: String,
    /// Raw server answer
    pub body: Map<String, Value>,
}

/// Result of a successful OTP verification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignupVerified {
    /// Token issued with the new account, if the server sent one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Raw server answer
    pub body: Map<String, Value>,
}

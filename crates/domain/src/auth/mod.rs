//! Authentication domain types

mod signup;
mod types;

pub use signup::{MIN_PASSWORD_LEN, OtpDispatch, SignupForm, SignupVerified};
pub use types::{AccessGrant, TOKEN_ALIASES, UserProfile, extract_access_token};

//! Candidate tables for every live operation.
//!
//! Order is priority: the first candidate that answers usefully wins.
//! Logical field names used by the client:
//!
//! - login: `identifier`, `password`
//! - OTP send: `phone`
//! - OTP verify: `phone`, `otp`, `name`, `email`, `password`, `consent`
//! - search: `query`
//! - record creation: the draft's own snake_case fields

use sambharalu_domain::{
    EndpointCandidate, PayloadShape,
    request::HttpMethod,
};

/// An operation tried against the live API, candidate by candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    /// Name used in diagnostics
    pub name: &'static str,
    /// Method shared by all candidates
    pub method: HttpMethod,
    /// Candidates in priority order
    pub candidates: &'static [EndpointCandidate],
    /// A 401/403 ends the search instead of moving on
    pub stop_on_reject: bool,
}

/// Chunk upload path. No fallback: there is a single known route.
pub const UPLOAD_CHUNK_PATH: &str = "records/upload/chunk";

const GRANT_PASSWORD: &[(&str, &str)] = &[("grant_type", "password")];
const AS_USERNAME: &[(&str, &str)] = &[("identifier", "username")];

/// Password login.
pub const LOGIN: Operation = Operation {
    name: "Login",
    method: HttpMethod::Post,
    stop_on_reject: true,
    candidates: &[
        EndpointCandidate::new("auth/login", PayloadShape::json(&[("identifier", "phone")])),
        EndpointCandidate::new("auth/login", PayloadShape::json(AS_USERNAME)),
        EndpointCandidate::new("auth/login", PayloadShape::json(&[("identifier", "email")])),
        EndpointCandidate::new("users/login", PayloadShape::json(AS_USERNAME)),
        EndpointCandidate::new("users/login", PayloadShape::json(&[("identifier", "email")])),
        EndpointCandidate::new("sessions", PayloadShape::json(&[("identifier", "login")])),
        EndpointCandidate::new("login", PayloadShape::json(AS_USERNAME)),
        EndpointCandidate::new("login", PayloadShape::json(&[("identifier", "phone")])),
        EndpointCandidate::new("auth/token", PayloadShape::form(AS_USERNAME, GRANT_PASSWORD)),
        EndpointCandidate::new("oauth/token", PayloadShape::form(AS_USERNAME, GRANT_PASSWORD)),
        EndpointCandidate::new("token", PayloadShape::form(AS_USERNAME, GRANT_PASSWORD)),
        EndpointCandidate::new("auth/jwt/create", PayloadShape::json(AS_USERNAME)),
    ],
};

/// Profile of the token holder.
pub const CURRENT_USER: Operation = Operation {
    name: "Current user",
    method: HttpMethod::Get,
    stop_on_reject: false,
    candidates: &[
        EndpointCandidate::bare("auth/me"),
        EndpointCandidate::bare("users/me"),
        EndpointCandidate::bare("me"),
        EndpointCandidate::bare("profile"),
        EndpointCandidate::bare("api/me"),
    ],
};

/// Category listing.
pub const CATEGORIES: Operation = Operation {
    name: "Categories",
    method: HttpMethod::Get,
    stop_on_reject: false,
    candidates: &[
        EndpointCandidate::bare("categories"),
        EndpointCandidate::bare("api/categories"),
        EndpointCandidate::bare("records/categories"),
    ],
};

/// Record listing.
pub const RECORDS: Operation = Operation {
    name: "Records",
    method: HttpMethod::Get,
    stop_on_reject: false,
    candidates: &[
        EndpointCandidate::bare("records"),
        EndpointCandidate::bare("api/records"),
    ],
};

/// Record search.
pub const SEARCH_RECORDS: Operation = Operation {
    name: "Record search",
    method: HttpMethod::Get,
    stop_on_reject: false,
    candidates: &[
        EndpointCandidate::new("records/search", PayloadShape::query(&[("query", "q")])),
        EndpointCandidate::new("records", PayloadShape::query(&[("query", "search")])),
    ],
};

/// Record creation.
pub const CREATE_RECORD: Operation = Operation {
    name: "Create record",
    method: HttpMethod::Post,
    stop_on_reject: true,
    candidates: &[
        EndpointCandidate::new("records", PayloadShape::json(&[])),
        EndpointCandidate::new("api/records", PayloadShape::json(&[])),
        EndpointCandidate::new("items", PayloadShape::json(&[])),
    ],
};

const AS_PHONE_NUMBER: &[(&str, &str)] = &[("phone", "phone_number")];

/// Signup OTP dispatch.
pub const SEND_OTP: Operation = Operation {
    name: "Send OTP",
    method: HttpMethod::Post,
    stop_on_reject: true,
    candidates: &[
        EndpointCandidate::new("auth/signup/send-otp", PayloadShape::json(AS_PHONE_NUMBER)),
        EndpointCandidate::new("auth/signup/send-otp", PayloadShape::json(&[])),
        EndpointCandidate::new("auth/send-otp", PayloadShape::json(AS_PHONE_NUMBER)),
        EndpointCandidate::new("auth/send-otp", PayloadShape::json(&[])),
        EndpointCandidate::new("auth/otp/send", PayloadShape::json(AS_PHONE_NUMBER)),
        EndpointCandidate::new("auth/otp/send", PayloadShape::json(&[])),
        EndpointCandidate::new("otp/send", PayloadShape::json(AS_PHONE_NUMBER)),
        EndpointCandidate::new("otp/send", PayloadShape::json(&[])),
    ],
};

const VERIFY_LONG: &[(&str, &str)] = &[
    ("phone", "phone_number"),
    ("otp", "otp_code"),
    ("consent", "has_given_consent"),
];
const VERIFY_SHORT: &[(&str, &str)] = &[("consent", "has_given_consent")];

/// Signup OTP verification and account creation.
pub const VERIFY_OTP: Operation = Operation {
    name: "Verify OTP",
    method: HttpMethod::Post,
    stop_on_reject: true,
    candidates: &[
        EndpointCandidate::new("auth/signup/verify-otp", PayloadShape::json(VERIFY_LONG)),
        EndpointCandidate::new("auth/signup/verify-otp", PayloadShape::json(VERIFY_SHORT)),
        EndpointCandidate::new("auth/verify-otp", PayloadShape::json(VERIFY_LONG)),
        EndpointCandidate::new("auth/verify-otp", PayloadShape::json(VERIFY_SHORT)),
        EndpointCandidate::new("auth/otp/verify", PayloadShape::json(VERIFY_LONG)),
        EndpointCandidate::new("auth/otp/verify", PayloadShape::json(VERIFY_SHORT)),
        EndpointCandidate::new("otp/verify", PayloadShape::json(VERIFY_LONG)),
        EndpointCandidate::new("otp/verify", PayloadShape::json(VERIFY_SHORT)),
    ],
};

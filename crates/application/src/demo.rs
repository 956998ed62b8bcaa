//! Canned data for demo mode.
//!
//! Nothing here touches the network. Every function is deterministic
//! except [`created_record`], whose id comes from the supplied time.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value, json};

use sambharalu_domain::{
    AccessGrant, Category, CreatedRecord, OtpDispatch, RecordDraft, RecordSummary, SignupForm,
    SignupVerified, UserProfile,
};

/// The only password demo login accepts.
pub const DEMO_PASSWORD: &str = "demo123";

/// Token handed out by demo login and signup.
pub const DEMO_TOKEN: &str = "demo-token";

/// Display name of the canned user.
pub const DEMO_FULL_NAME: &str = "Demo User";

const FESTIVALS: &[(&str, &str, &str, &str)] = &[
    (
        "bathukamma",
        "Bathukamma",
        "బతుకమ్మ",
        "Flower festival celebrating life and sisterhood across Telangana.",
    ),
    (
        "bonalu",
        "Bonalu",
        "బోనాలు",
        "Offerings to Mahankali with decorated pots, dances and drums.",
    ),
    (
        "ugadi",
        "Ugadi",
        "ఉగాది",
        "Telugu New Year marked with Ugadi Pachadi, the six tastes of life.",
    ),
    (
        "sri_rama_navami",
        "Sri Rama Navami",
        "శ్రీరామనవమి",
        "Celebrates the birth of Lord Rama with kalyanam and prasadam.",
    ),
    (
        "vinayaka_chavithi",
        "Vinayaka Chavithi",
        "వినాయక చవితి",
        "Ganesh festival: install, worship and immerse Lord Ganesha.",
    ),
    (
        "navaratri",
        "Navaratri",
        "నవరాత్రి",
        "Nine nights of Devi worship, music and dance.",
    ),
];

fn profile(username: &str) -> UserProfile {
    let mut fields = Map::new();
    fields.insert("username".into(), Value::String(username.to_string()));
    fields.insert("full_name".into(), Value::String(DEMO_FULL_NAME.to_string()));
    UserProfile::new(fields)
}

/// Logs in with any identifier, provided the password is [`DEMO_PASSWORD`].
#[must_use]
pub fn login(identifier: &str, password: &str) -> Option<AccessGrant> {
    (password == DEMO_PASSWORD).then(|| AccessGrant {
        access_token: DEMO_TOKEN.to_string(),
        user: Some(profile(identifier)),
    })
}

/// Profile returned by the current-user lookup.
#[must_use]
pub fn current_user() -> UserProfile {
    profile("demo")
}

/// Acknowledges an OTP request, revealing the code to use.
#[must_use]
pub fn otp_dispatch(phone: &str, otp_code: &str) -> OtpDispatch {
    let phone = phone.trim().to_string();
    let body = match json!({ "sent": true, "phone": phone, "demo_otp": otp_code }) {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    OtpDispatch { phone, body }
}

/// Verifies a signup against the demo OTP code.
#[must_use]
pub fn verify(form: &SignupForm, otp_code: &str) -> Option<SignupVerified> {
    if form.otp_code.trim() != otp_code {
        return None;
    }
    let mut body = Map::new();
    body.insert("verified".into(), Value::Bool(true));
    body.insert("access_token".into(), Value::String(DEMO_TOKEN.to_string()));
    body.insert(
        "user".into(),
        json!({ "full_name": form.name.trim(), "email": form.email.trim(), "phone": form.phone.trim() }),
    );
    Some(SignupVerified {
        access_token: Some(DEMO_TOKEN.to_string()),
        body,
    })
}

/// Canned categories.
#[must_use]
pub fn categories() -> Vec<Category> {
    vec![
        Category::new(1, "Festivals"),
        Category::new(2, "Food & Cuisine"),
        Category::new(3, "Folk Arts"),
    ]
}

/// Canned festival records.
#[must_use]
pub fn records() -> Vec<RecordSummary> {
    FESTIVALS
        .iter()
        .zip(1_i64..)
        .map(|(&(slug, title, title_te, description), id)| {
            let mut record = RecordSummary::new(json!(id), title, description);
            record.extra.insert("slug".into(), json!(slug));
            record.extra.insert("title_te".into(), json!(title_te));
            record.extra.insert("category_id".into(), json!(1));
            record
        })
        .collect()
}

/// Canned records whose title or description contains `query`, ignoring case.
///
/// A blank query returns everything.
#[must_use]
pub fn search(query: &str) -> Vec<RecordSummary> {
    records().into_iter().filter(|r| r.matches(query)).collect()
}

/// Pretends to store `draft`, returning it with a time-derived id.
#[must_use]
pub fn created_record(draft: &RecordDraft, now: DateTime<Utc>) -> CreatedRecord {
    let mut body = draft.to_payload();
    body.insert("id".into(), json!(now.timestamp().rem_euclid(100_000)));
    body.insert("demo".into(), Value::Bool(true));
    CreatedRecord::from_body(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_login_accepts_only_demo_password() {
        for id in ["", "ravi", "+919876543210", "sita@example.org"] {
            let grant = login(id, DEMO_PASSWORD);
            assert_eq!(grant.as_ref().map(|g| g.access_token.as_str()), Some(DEMO_TOKEN));
            assert_eq!(
                grant.and_then(|g| g.user).and_then(|u| u.get("username").cloned()),
                Some(json!(id))
            );
            assert!(login(id, "demo1234").is_none());
            assert!(login(id, "").is_none());
        }
    }

    #[test]
    fn test_search_is_case_insensitive_over_title_and_description() {
        let titles = |q: &str| search(q).into_iter().map(|r| r.title).collect::<Vec<_>>();
        assert_eq!(titles("BONALU"), vec!["Bonalu"]);
        assert_eq!(titles("lord"), vec!["Sri Rama Navami", "Vinayaka Chavithi"]);
        assert_eq!(titles("  ").len(), 6);
        assert!(titles("diwali").is_empty());
    }

    #[test]
    fn test_created_record_id_and_echo() {
        let now = Utc.timestamp_opt(1_760_000_123, 0).single().unwrap_or_default();
        let draft = RecordDraft::new("Bathukamma Procession", "Flowers", 1);
        let created = created_record(&draft, now);
        assert_eq!(created.id, Some(json!(123)));
        assert_eq!(created.title(), Some("Bathukamma Procession"));
        assert_eq!(created.body.get("demo"), Some(&json!(true)));
    }

    #[test]
    fn test_verify_checks_code() {
        let form = SignupForm {
            phone: "9876543210".into(),
            otp_code: "123456".into(),
            name: "Sita".into(),
            email: "sita@example.org".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
            consent: true,
        };
        assert!(verify(&form, "123456").is_some());
        assert!(verify(&form, "000000").is_none());
    }

    #[test]
    fn test_categories_and_records_are_fixed() {
        assert_eq!(categories().len(), 3);
        let all = records();
        assert_eq!(all.len(), 6);
        assert_eq!(all[0].id, Some(json!(1)));
        assert_eq!(all[5].title, "Navaratri");
    }
}

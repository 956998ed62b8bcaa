//! Command execution.
//!
//! Every command prints one pretty JSON document on stdout.

use std::path::Path;

use anyhow::{Context, bail};
use sambharalu_application::FestivalClient;
use sambharalu_domain::{ClientSettings, Location, RecordDraft, SignupForm, UploadReport};
use sambharalu_infrastructure::{SettingsRepository, load_attachment};
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

use crate::cli::{Command, SignupCommand, SubmitArgs, VerifyArgs};

/// Runs `command` against `client`.
pub async fn run(
    client: &mut FestivalClient,
    command: Command,
    settings_path: Option<&Path>,
) -> anyhow::Result<()> {
    match command {
        Command::Login {
            identifier,
            password,
            remember,
        } => {
            let Some(grant) = client.login(&identifier, &password).await? else {
                bail!("Login failed: invalid credentials");
            };
            if should_save_token(remember, client.is_demo()) {
                remember_token(settings_path, &grant.access_token).await?;
            } else if remember {
                warn!("demo token not saved");
            }
            let profile = client.read_current_user().await;
            print_json(&json!({
                "access_token": grant.access_token,
                "user": grant.user.or(profile),
            }))
        }

        Command::Me => {
            let Some(profile) = client.read_current_user().await else {
                bail!("No user profile available; log in or pass --token");
            };
            print_json(&profile)
        }

        Command::Categories => print_json(&client.get_categories().await?),

        Command::Records { query } => {
            let records = match query {
                Some(query) => client.search_records(&query).await?,
                None => client.get_records().await?,
            };
            print_json(&records)
        }

        Command::Signup(SignupCommand::SendOtp { phone }) => {
            print_json(&client.send_signup_otp(&phone).await?)
        }

        Command::Signup(SignupCommand::Verify(args)) => {
            let Some(verified) = client.verify_signup_otp(&signup_form(args)).await? else {
                bail!("Invalid OTP code");
            };
            print_json(&verified)
        }

        Command::Submit(args) => submit(client, args).await,
    }
}

async fn submit(client: &FestivalClient, args: SubmitArgs) -> anyhow::Result<()> {
    let draft = record_draft(&args)?;
    let created = client.create_record(draft).await?;

    let mut uploads: Vec<UploadReport> = Vec::with_capacity(args.attachments.len());
    for path in &args.attachments {
        let attachment = load_attachment(path).await?;
        let report = client.upload_all(&attachment).await;
        uploads.push(report);

        if !report.completed {
            print_json(&json!({ "record": created, "uploads": uploads }))?;
            bail!(
                "Upload of {} stopped after {} of {} chunks",
                path.display(),
                report.chunks_sent,
                report.total_chunks
            );
        }
    }

    print_json(&json!({ "record": created, "uploads": uploads }))
}

fn record_draft(args: &SubmitArgs) -> anyhow::Result<RecordDraft> {
    let mut draft = RecordDraft::new(&args.title, &args.description, args.category_id);
    if let Some(language) = &args.language {
        draft = draft.with_language(language);
    }
    if let Some(rights) = &args.release_rights {
        draft = draft.with_release_rights(rights);
    }
    if let (Some(latitude), Some(longitude)) = (args.latitude, args.longitude) {
        draft = draft.with_location(Location::new(latitude, longitude)?);
    }
    Ok(draft)
}

fn signup_form(args: VerifyArgs) -> SignupForm {
    SignupForm {
        phone: args.phone,
        otp_code: args.otp,
        name: args.name,
        email: args.email,
        password: args.password,
        confirm_password: args.confirm_password,
        consent: args.consent,
    }
}

/// Demo tokens are never written to the settings file.
const fn should_save_token(remember: bool, demo: bool) -> bool {
    remember && !demo
}

async fn remember_token(settings_path: Option<&Path>, token: &str) -> anyhow::Result<()> {
    let repository = match settings_path {
        Some(path) => SettingsRepository::new(path),
        None => SettingsRepository::default_location()?,
    };

    let mut settings: ClientSettings = repository.load().await?.unwrap_or_default();
    settings.api_token = Some(token.to_string());

    repository
        .save(&settings)
        .await
        .with_context(|| format!("Failed to save token to {}", repository.path().display()))?;
    info!(path = %repository.path().display(), "token saved");
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sambharalu_application::ClientConfig;
    use sambharalu_application::demo::{DEMO_PASSWORD, DEMO_TOKEN};
    use sambharalu_infrastructure::build_client;
    use std::path::PathBuf;

    fn submit_args() -> SubmitArgs {
        SubmitArgs {
            title: "Bonalu".into(),
            description: "Offering to the goddess".into(),
            category_id: 3,
            language: Some("telugu".into()),
            release_rights: None,
            latitude: Some(17.38),
            longitude: Some(78.48),
            attachments: vec![PathBuf::from("a.jpg")],
        }
    }

    #[test]
    fn test_record_draft_from_args() {
        let draft = record_draft(&submit_args()).unwrap();
        assert_eq!(draft.title, "Bonalu");
        assert_eq!(draft.category_id, 3);
        assert_eq!(draft.language, "telugu");
        assert!(draft.location.is_some());
    }

    #[test]
    fn test_only_live_tokens_are_saved() {
        assert!(should_save_token(true, false));
        assert!(!should_save_token(true, true));
        assert!(!should_save_token(false, false));
    }

    #[tokio::test]
    async fn test_demo_login_does_not_write_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut client = build_client(ClientConfig::demo()).unwrap();

        let command = Command::Login {
            identifier: "ravi".into(),
            password: DEMO_PASSWORD.into(),
            remember: true,
        };
        run(&mut client, command, Some(&path)).await.unwrap();

        assert_eq!(client.session().token(), Some(DEMO_TOKEN));
        assert!(!path.exists());
    }

    #[test]
    fn test_out_of_range_location_is_rejected() {
        let args = SubmitArgs {
            latitude: Some(123.0),
            ..submit_args()
        };
        assert!(record_draft(&args).is_err());
    }
}

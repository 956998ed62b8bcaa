//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "sambharalu")]
#[command(about = "Client for the Sambharalu festival records API")]
#[command(version)]
pub struct Cli {
    /// Settings file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Serve every command from canned demo data
    #[arg(long, global = true, conflicts_with = "live")]
    pub demo: bool,

    /// Talk to the real API
    #[arg(long, global = true)]
    pub live: bool,

    /// API base URL
    #[arg(long, global = true, value_name = "URL")]
    pub api_base: Option<String>,

    /// Bearer token to start with
    #[arg(long, global = true, value_name = "TOKEN")]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Demo mode forced by a flag, if any.
    pub const fn mode_override(&self) -> Option<bool> {
        if self.demo {
            Some(true)
        } else if self.live {
            Some(false)
        } else {
            None
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and print the access token
    Login {
        /// Phone number, username or email
        identifier: String,

        /// Account password
        #[arg(long, short = 'p', env = "SAMBHARALU_PASSWORD", hide_env_values = true)]
        password: String,

        /// Store the token in the settings file
        #[arg(long)]
        remember: bool,
    },

    /// Show the signed-in user's profile
    Me,

    /// List record categories
    Categories,

    /// List or search records
    Records {
        /// Search title and description
        #[arg(long, short = 'q')]
        query: Option<String>,
    },

    /// Create an account with a phone OTP
    #[command(subcommand)]
    Signup(SignupCommand),

    /// Create a record and upload its attachments
    Submit(SubmitArgs),
}

#[derive(Subcommand, Debug)]
pub enum SignupCommand {
    /// Text an OTP to a phone number
    SendOtp {
        /// Phone number
        #[arg(long)]
        phone: String,
    },

    /// Verify the OTP and create the account
    Verify(VerifyArgs),
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Phone number the OTP was sent to
    #[arg(long)]
    pub phone: String,

    /// OTP code
    #[arg(long)]
    pub otp: String,

    /// Full name
    #[arg(long)]
    pub name: String,

    /// Email address
    #[arg(long)]
    pub email: String,

    /// Password, at least 6 characters
    #[arg(long)]
    pub password: String,

    /// Password again
    #[arg(long)]
    pub confirm_password: String,

    /// Agree to the terms of contribution
    #[arg(long)]
    pub consent: bool,
}

#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Record title
    #[arg(long)]
    pub title: String,

    /// Record description
    #[arg(long)]
    pub description: String,

    /// Category id
    #[arg(long, default_value_t = 1)]
    pub category_id: i64,

    /// Language of the record
    #[arg(long)]
    pub language: Option<String>,

    /// Release rights
    #[arg(long)]
    pub release_rights: Option<String>,

    /// Latitude of the record's location
    #[arg(long, requires = "longitude", allow_hyphen_values = true)]
    pub latitude: Option<f64>,

    /// Longitude of the record's location
    #[arg(long, requires = "latitude", allow_hyphen_values = true)]
    pub longitude: Option<f64>,

    /// File to upload after the record is created (repeatable)
    #[arg(long = "attach", value_name = "FILE")]
    pub attachments: Vec<PathBuf>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["sambharalu", "records", "--query", "bonalu", "--live"]).unwrap();
        assert_eq!(cli.mode_override(), Some(false));
        match cli.command {
            Command::Records { query } => assert_eq!(query.as_deref(), Some("bonalu")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_demo_and_live_conflict() {
        let result = Cli::try_parse_from(["sambharalu", "--demo", "--live", "me"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_submit_collects_attachments() {
        let cli = Cli::try_parse_from([
            "sambharalu",
            "submit",
            "--title",
            "Bonalu",
            "--description",
            "Offering",
            "--attach",
            "a.jpg",
            "--attach",
            "b.mp3",
            "--latitude",
            "17.38",
            "--longitude",
            "78.48",
        ])
        .unwrap();
        let Command::Submit(args) = cli.command else {
            panic!("expected submit");
        };
        assert_eq!(args.category_id, 1);
        assert_eq!(
            args.attachments,
            vec![PathBuf::from("a.jpg"), PathBuf::from("b.mp3")]
        );
        assert_eq!(args.latitude, Some(17.38));
    }

    #[test]
    fn test_latitude_requires_longitude() {
        let result = Cli::try_parse_from([
            "sambharalu",
            "submit",
            "--title",
            "t",
            "--description",
            "d",
            "--latitude",
            "1.0",
        ]);
        assert!(result.is_err());
    }
}

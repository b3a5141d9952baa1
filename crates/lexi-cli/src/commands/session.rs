use lexi_core::util::{normalize_text_option, unix_timestamp_now};
use lexi_core::{AppContext, SessionSnapshot, TokenInfo, UserIdentity, UserProfile};

use crate::cli::SessionCommands;
use crate::commands::common::format_unix_timestamp;
use crate::error::CliError;

pub fn run_session(command: SessionCommands, context: &AppContext) -> Result<(), CliError> {
    match command {
        SessionCommands::Status => {
            match context.session.current_identity() {
                UserIdentity::Guest => println!("Guest mode"),
                UserIdentity::LoggedIn(profile) => {
                    println!("Signed in as {} <{}>", profile.display_name, profile.email);
                }
            }
            if let Some(snapshot) = context.session.load_session() {
                let state = if context.session.is_session_valid() {
                    "valid"
                } else {
                    "expired"
                };
                println!(
                    "Persisted session for {} is {} (expires {})",
                    snapshot.user.email,
                    state,
                    format_unix_timestamp(snapshot.token.expires_at)
                );
            }
        }
        SessionCommands::Login {
            user_id,
            email,
            name,
            avatar_url,
            token,
            expires_in,
        } => {
            let snapshot = build_snapshot(
                user_id,
                email,
                name,
                avatar_url,
                token,
                unix_timestamp_now().saturating_add(expires_in),
            )?;
            context.sign_in(&snapshot);
            println!("Signed in as {}", snapshot.user.email);
        }
        SessionCommands::Logout => {
            let email = context
                .session
                .current_identity()
                .email()
                .map(ToString::to_string);
            context.sign_out();
            match email {
                Some(email) => println!("Signed out {email}"),
                None => println!("Signed out"),
            }
        }
    }
    Ok(())
}

pub fn build_snapshot(
    user_id: String,
    email: String,
    display_name: String,
    avatar_url: Option<String>,
    access_token: String,
    expires_at: i64,
) -> Result<SessionSnapshot, CliError> {
    let require = |value: String, field: &str| {
        normalize_text_option(Some(value))
            .ok_or_else(|| CliError::Config(format!("{field} must not be empty")))
    };

    Ok(SessionSnapshot {
        user: UserProfile {
            user_id: require(user_id, "user id")?,
            email: require(email, "email")?,
            display_name: require(display_name, "display name")?,
            avatar_url: normalize_text_option(avatar_url),
        },
        token: TokenInfo {
            access_token: require(access_token, "token")?,
            refresh_token: None,
            expires_at,
        },
    })
}

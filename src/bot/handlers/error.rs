//! Command error listener.
//!
//! Converts poise framework errors into core failures, sends the classified
//! notice to the invoking user and writes unclassified failures to the error log.

use crate::{
    bot::{BotData, Context, render},
    core::{
        classifier::{self, Failure, Invocation, Notice},
        error_log,
    },
    errors::Error,
};
use std::time::Duration;
use tracing::{debug, error};

/// Maps a framework error to a failure, or None if it should be handled by
/// poise's default handler.
fn failure_from(error: &poise::FrameworkError<'_, BotData, Error>) -> Option<Failure> {
    use poise::FrameworkError as Fe;

    match error {
        Fe::Command { error, .. } | Fe::CommandCheckFailed { error: Some(error), .. } => {
            Some(failure_from_command_error(error))
        }
        Fe::ArgumentParse { error, input, .. } => {
            let detail = match input {
                Some(input) => format!("Cannot parse `{input}` as argument: {error}"),
                None => error.to_string(),
            };
            if error.is::<poise::TooManyArguments>() {
                Some(Failure::TooManyArguments { detail })
            } else {
                Some(Failure::BadArgument { detail })
            }
        }
        Fe::CommandStructureMismatch { description, .. } => Some(Failure::BadArgument {
            detail: (*description).to_string(),
        }),
        Fe::MissingUserPermissions {
            missing_permissions,
            ..
        } => Some(Failure::MissingPermissions {
            detail: missing_permissions.map_or_else(
                || "Could not determine your permissions".to_string(),
                |permissions| format!("Missing permissions: {permissions}"),
            ),
        }),
        Fe::MissingBotPermissions {
            missing_permissions,
            ..
        } => Some(Failure::BotMissingPermissions {
            detail: missing_permissions.to_string(),
        }),
        Fe::CooldownHit {
            remaining_cooldown,
            ctx,
            ..
        } => Some(Failure::Cooldown {
            retry_after: *remaining_cooldown,
            period: cooldown_period(*ctx),
        }),
        Fe::GuildOnly { .. } => Some(Failure::WrongContext { in_guild: false }),
        Fe::DmOnly { .. } => Some(Failure::WrongContext { in_guild: true }),
        Fe::CommandPanic { payload, .. } => Some(Failure::Other {
            detail: payload
                .clone()
                .unwrap_or_else(|| "Command panicked".to_string()),
        }),
        _ => None,
    }
}

/// Cooldown period configured on the command, if any.
fn cooldown_period(ctx: Context<'_>) -> Option<Duration> {
    let config = ctx.command().cooldown_config.read().ok()?;
    first_configured([
        config.user,
        config.member,
        config.channel,
        config.guild,
        config.global,
    ])
}

/// Most specific bucket first: user, member, channel, guild, global.
fn first_configured(buckets: [Option<Duration>; 5]) -> Option<Duration> {
    buckets.into_iter().flatten().next()
}

fn failure_from_command_error(error: &Error) -> Failure {
    match error {
        Error::FirstTimeUser => Failure::FirstTimeUser,
        other => Failure::Other {
            detail: other.to_string(),
        },
    }
}

fn invocation_from(ctx: Context<'_>) -> Invocation {
    Invocation {
        command_name: ctx.command().qualified_name.clone(),
        user_id: ctx.author().id.get(),
        user_name: ctx.author().name.clone(),
        guild_id: ctx.guild_id().map(|id| id.get()),
    }
}

async fn send_notice(ctx: Context<'_>, notice: Notice) -> Result<(), Error> {
    let reply = match notice {
        Notice::Text(text) => poise::CreateReply::default().content(text),
        Notice::Embed(content) => poise::CreateReply::default().embed(render::embed(&content)),
    };
    ctx.send(reply.ephemeral(true)).await?;
    Ok(())
}

/// Framework error handler installed in `FrameworkOptions::on_error`.
pub async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    if let poise::FrameworkError::Setup { error, .. } = &error {
        error!("Failed to start bot: {:?}", error);
        return;
    }

    let (Some(ctx), Some(failure)) = (error.ctx(), failure_from(&error)) else {
        if let Err(e) = poise::builtins::on_error(error).await {
            error!("Error while handling error: {}", e);
        }
        return;
    };

    let invocation = invocation_from(ctx);
    let outcome = classifier::decide(&failure, &invocation, &ctx.data().config);

    if outcome.persist {
        error!(
            "Error in command `{}`: {}",
            invocation.command_name, failure
        );
        if let Err(e) = error_log::log_error(&ctx.data().database, &failure, &invocation).await {
            error!("Failed to write error log: {}", e);
        }
    } else {
        debug!(
            category = ?outcome.category,
            command = %invocation.command_name,
            "Handled command error"
        );
    }

    if let Some(notice) = outcome.notice {
        if let Err(e) = send_notice(ctx, notice).await {
            error!("Failed to send error message: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cooldown_period_prefers_most_specific_bucket() {
        let secs = |n| Some(Duration::from_secs(n));

        assert_eq!(
            first_configured([None, secs(10), None, secs(30), secs(60)]),
            secs(10)
        );
        assert_eq!(
            first_configured([secs(5), secs(10), secs(20), secs(30), secs(60)]),
            secs(5)
        );
        assert_eq!(first_configured([None, None, None, None, secs(60)]), secs(60));
        assert_eq!(first_configured([None; 5]), None);
    }

    #[test]
    fn test_first_time_user_error_is_onboarding() {
        assert_eq!(
            failure_from_command_error(&Error::FirstTimeUser),
            Failure::FirstTimeUser
        );
    }

    #[test]
    fn test_other_command_errors_keep_text() {
        let failure = failure_from_command_error(&Error::InvalidSelection {
            label: "Z".to_string(),
        });
        assert_eq!(
            failure,
            Failure::Other {
                detail: "'Z' is not one of the available options".to_string()
            }
        );
        assert_eq!(
            classifier::classify(&failure),
            classifier::Category::Unclassified
        );
    }
}

//! Gateway event handling - startup presence and guild welcome messages.

use crate::{
    bot::BotData,
    core::help::welcome_message,
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use tracing::{info, warn};

/// Event handler installed in `FrameworkOptions::event_handler`.
pub async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, BotData, Error>,
    _data: &BotData,
) -> Result<()> {
    match event {
        serenity::FullEvent::Ready { data_about_bot } => {
            info!("{} has connected to Discord!", data_about_bot.user.name);
            ctx.set_activity(Some(serenity::ActivityData::watching("your commands")));
        }
        serenity::FullEvent::GuildCreate {
            guild,
            is_new: Some(true),
        } => send_welcome(ctx, guild).await,
        _ => {}
    }
    Ok(())
}

/// Greets a newly joined guild in its system channel.
///
/// Failures (missing channel, missing permissions, rate limits) are logged
/// and not retried.
async fn send_welcome(ctx: &serenity::Context, guild: &serenity::Guild) {
    info!(guild = %guild.id, "Joined guild {}", guild.name);

    let Some(channel_id) = guild.system_channel_id else {
        info!(guild = %guild.id, "No system channel, skipping welcome message");
        return;
    };

    if let Err(e) = channel_id.say(&ctx.http, welcome_message(&guild.name)).await {
        warn!(
            guild = %guild.id,
            channel = %channel_id,
            "Failed to send welcome message: {}",
            e
        );
    }
}

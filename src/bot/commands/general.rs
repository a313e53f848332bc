//! General Discord commands - help and about.
//! Neither command touches the database; `/help` is an interactive topic view.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, handlers::views, render},
        core::{
            about::{self, BotStats},
            help,
            view::InteractionView,
        },
        errors::Result,
    };
    use std::time::Instant;
    use tracing::{debug, info};

    /// Main help command
    ///
    /// Shows the main help menu with a topic select for each group of commands.
    /// The select stops responding once the interaction timeout passes.
    #[poise::command(slash_command)]
    pub async fn help(ctx: Context<'_>) -> Result<()> {
        let config = &ctx.data().config;
        let user_name = &ctx.author().name;
        info!("Help command received from user: {}", user_name);

        let select = help::help_select(user_name, config.embed_color);
        let content = select
            .current_content()
            .unwrap_or_else(|| help::main_help(user_name, config.embed_color));
        let mut view = InteractionView::new(ctx.author().id.get(), config.interaction_timeout())
            .with_widget(select);

        let value = views::run_view(ctx, &mut view, content).await?;
        debug!(%value, "Help view finished");
        Ok(())
    }

    /// Some info about Navi
    ///
    /// Measures API latency by timing the first reply, then edits that reply
    /// into the bot statistics.
    #[poise::command(slash_command)]
    pub async fn about(ctx: Context<'_>) -> Result<()> {
        let started = Instant::now();
        let handle = ctx.say("Testing API latency...").await?;
        let api_latency = started.elapsed();

        let data = ctx.data();
        let stats = BotStats {
            guild_count: ctx.cache().guild_count(),
            bot_latency: ctx.ping().await,
            api_latency,
            uptime: (chrono::Utc::now() - data.started_at)
                .to_std()
                .unwrap_or_default(),
            system: Some(about::sample_system_usage().await),
        };

        let embed = about::about_embed(&stats, data.config.embed_color);
        handle
            .edit(
                ctx,
                poise::CreateReply::default()
                    .content(String::new())
                    .embed(render::embed(&embed)),
            )
            .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;

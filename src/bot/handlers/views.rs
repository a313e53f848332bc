//! Component transport for interactive views.
//!
//! Sends a view attached to a reply, feeds the reply's component interactions
//! into [`drive`] and answers each one. When the view resolves its widgets are
//! removed from the message.

use crate::{
    bot::{Context, render},
    core::{
        embed::EmbedContent,
        view::{Incoming, InteractionView, TerminalValue, ViewEvent, ViewUpdate, drive},
    },
    errors::{Error, Result},
};
use futures::StreamExt;
use poise::serenity_prelude as serenity;
use std::{future::Future, sync::Arc};
use tracing::{debug, warn};

/// Shown privately to users pressing someone else's widgets.
pub const MSG_NOT_AUTHORIZED: &str = "You are not allowed to use this interaction.";

/// Converts a component interaction into a view event.
///
/// Interactions of other component kinds, or selects without a value, are dropped.
fn incoming(press: serenity::ComponentInteraction) -> Option<Incoming<serenity::ComponentInteraction>> {
    let custom_id = press.data.custom_id.clone();
    let event = match &press.data.kind {
        serenity::ComponentInteractionDataKind::StringSelect { values } => ViewEvent::Selected {
            custom_id,
            label: values.first()?.clone(),
        },
        serenity::ComponentInteractionDataKind::Button => ViewEvent::Activated { custom_id },
        _ => return None,
    };

    Some(Incoming {
        user: press.user.id.get(),
        event,
        handle: press,
    })
}

fn response_for(update: ViewUpdate) -> serenity::CreateInteractionResponse {
    match update {
        ViewUpdate::Rejected => serenity::CreateInteractionResponse::Message(
            serenity::CreateInteractionResponseMessage::new()
                .content(MSG_NOT_AUTHORIZED)
                .ephemeral(true),
        ),
        ViewUpdate::Refresh { content, layout } => serenity::CreateInteractionResponse::UpdateMessage(
            serenity::CreateInteractionResponseMessage::new()
                .embed(render::embed(&content))
                .components(render::components(&layout)),
        ),
        ViewUpdate::Resolved(_) | ViewUpdate::Ignored => {
            serenity::CreateInteractionResponse::Acknowledge
        }
    }
}

/// Sends `content` with the view's widgets and runs the view until it resolves.
pub async fn run_view(
    ctx: Context<'_>,
    view: &mut InteractionView,
    content: EmbedContent,
) -> Result<TerminalValue> {
    let reply = poise::CreateReply::default()
        .embed(render::embed(&content))
        .components(render::components(&view.layout()));
    let handle = ctx.send(reply).await?;
    let message_id = handle.message().await?.id;

    let events = Box::pin(
        serenity::ComponentInteractionCollector::new(ctx.serenity_context())
            .message_id(message_id)
            .stream()
            .filter_map(|press| std::future::ready(incoming(press))),
    );

    let http = Arc::clone(&ctx.serenity_context().http);
    let mut shown = content;
    let result = drive(view, events, |press, update| {
        if let ViewUpdate::Refresh { content, .. } = &update {
            shown = content.clone();
        }
        let http = Arc::clone(&http);
        async move {
            press.create_response(&http, response_for(update)).await?;
            Ok(())
        }
    })
    .await;

    let clear = async {
        handle
            .edit(
                ctx,
                poise::CreateReply::default()
                    .embed(render::embed(&shown))
                    .components(Vec::new()),
            )
            .await?;
        Ok::<(), Error>(())
    };
    let value = settle(result, clear).await?;
    debug!(%value, message = %message_id, "View resolved");
    Ok(value)
}

/// Runs `clear` whatever `result` is.
///
/// A failed view keeps its own error; the cleanup error is only logged then.
async fn settle<T, F>(result: Result<T>, clear: F) -> Result<T>
where
    F: Future<Output = Result<()>>,
{
    let cleared = clear.await;
    match (result, cleared) {
        (Ok(value), cleared) => cleared.map(|()| value),
        (Err(e), Err(clear_error)) => {
            warn!("Failed to remove view widgets: {}", clear_error);
            Err(e)
        }
        (Err(e), Ok(())) => Err(e),
    }
}

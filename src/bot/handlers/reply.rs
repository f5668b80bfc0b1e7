//! Publishing the result of a gated command.
//!
//! [`super::access_gate::require_access`] leaves the interaction with an ephemeral
//! acknowledgement, and a followup to that acknowledgement would stay ephemeral. The
//! result is posted as a regular channel message instead, after which the
//! acknowledgement is removed. Regular messages are edited with the bot token, so
//! they stay editable after the interaction token expires.

use crate::{
    bot::BotData,
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use tracing::warn;

/// Posts `message` to the channel the command was used in.
///
/// # Errors
/// Returns an error if the message cannot be sent.
pub async fn publish(
    ctx: poise::Context<'_, BotData, Error>,
    message: serenity::CreateMessage,
) -> Result<serenity::Message> {
    let posted = ctx
        .channel_id()
        .send_message(ctx.serenity_context(), message)
        .await?;

    if let poise::Context::Application(app) = ctx {
        if let Err(e) = app.interaction.delete_response(ctx.http()).await {
            warn!("Failed to remove the deferred acknowledgement: {e}");
        }
    }
    Ok(posted)
}

//! Feedback Discord command - relays a user's message to the admin by DM.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use tracing::{error, info};

    /// Sends feedback to the bot admin.
    ///
    /// The message is forwarded as a direct message together with the sender's name
    /// and ID. Only the sender sees the confirmation.
    #[poise::command(slash_command)]
    pub async fn feedback(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "What would you like to tell the admin?"]
        #[max_length = 1000]
        message: String,
    ) -> Result<()> {
        let message = message.trim();
        if message.is_empty() {
            ctx.send(
                poise::CreateReply::default()
                    .content("❌ Feedback cannot be empty.")
                    .ephemeral(true),
            )
            .await?;
            return Ok(());
        }

        let author = ctx.author();
        let admin = serenity::UserId::new(ctx.data().config.admin_user_id);
        let embed = serenity::CreateEmbed::default()
            .title("**New feedback**")
            .color(0x0058_65F2)
            .description(message)
            .field("From", format!("{} (`{}`)", author.name, author.id), false)
            .timestamp(serenity::Timestamp::now());

        let reply = match admin
            .direct_message(ctx.serenity_context(), serenity::CreateMessage::new().embed(embed))
            .await
        {
            Ok(_) => {
                info!("Relayed feedback from {}", author.id);
                "✅ Thanks! Your feedback has been sent."
            }
            Err(e) => {
                error!("Failed to relay feedback from {}: {e}", author.id);
                "❌ Could not deliver your feedback right now. Please try again later."
            }
        };

        ctx.send(poise::CreateReply::default().content(reply).ephemeral(true))
            .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;

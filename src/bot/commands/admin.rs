//! Admin Discord commands - inspect and remove stored access flags.
//!
//! Only bot owners (the configured admin) can run these.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        core::access_flags,
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;
    use tracing::info;

    /// Embed descriptions are capped by Discord; keep the list well below that.
    const MAX_LISTED: usize = 50;

    /// Parent command for managing cached access flags.
    #[poise::command(
        slash_command,
        owners_only,
        subcommands("access_list", "access_remove")
    )]
    pub async fn access(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Access management command. Available subcommands:\n\
            `/access list` - List users with a stored access flag\n\
            `/access remove <user>` - Remove a user's stored flag";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Lists every stored access flag, most recent first.
    #[poise::command(slash_command, owners_only, rename = "list")]
    pub async fn access_list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let flags = access_flags::list_access_flags(&ctx.data().database).await?;

        if flags.is_empty() {
            ctx.send(
                poise::CreateReply::default()
                    .content("No access flags are stored.")
                    .ephemeral(true),
            )
            .await?;
            return Ok(());
        }

        let mut lines: Vec<String> = flags
            .iter()
            .take(MAX_LISTED)
            .map(|flag| {
                let mark = if flag.has_access { "✅" } else { "❌" };
                format!(
                    "{mark} <@{}> (`{}`) - updated {}",
                    flag.user_id,
                    flag.user_id,
                    flag.updated_at.format("%Y-%m-%d %H:%M UTC")
                )
            })
            .collect();
        if flags.len() > MAX_LISTED {
            lines.push(format!("…and {} more", flags.len() - MAX_LISTED));
        }

        let embed = serenity::CreateEmbed::default()
            .title(format!("**Access Flags ({})**", flags.len()))
            .color(0x0058_65F2)
            .description(lines.join("\n"));

        ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
            .await?;
        Ok(())
    }

    /// Removes a user's stored access flag.
    ///
    /// The user is checked against their purchase history again on their next
    /// gated command.
    #[poise::command(slash_command, owners_only, rename = "remove")]
    pub async fn access_remove(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "User whose flag should be removed"] user: serenity::User,
    ) -> Result<()> {
        let user_id = user.id.to_string();
        let removed = access_flags::delete_access_flag(&ctx.data().database, &user_id).await?;

        let reply = if removed {
            info!("Admin {} removed access flag for {user_id}", ctx.author().id);
            format!("✅ Removed the access flag for <@{user_id}>.")
        } else {
            format!("⚠️ <@{user_id}> has no stored access flag.")
        };

        ctx.send(poise::CreateReply::default().content(reply).ephemeral(true))
            .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;

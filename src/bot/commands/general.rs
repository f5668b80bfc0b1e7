//! General Discord commands - ping, help, and other utility commands.
//! This module contains simple commands that don't call the company API
//! and provide basic bot functionality and user assistance.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**CompanyBuddy Help**\n\
        Here is a summary of all available commands.\n\n\
        **Company Commands** (require purchased access)\n\
        • `/company list` - Browse all companies. Use ◀ ▶ to page and the menu to sort.\n\
        • `/company info <id>` - Shows one company's assets and salary.\n\
        • `/company history <id> [days] [hours]` - Income, expenses and top contributors \
        for the last day, or the given window.\n\n\
        **Other Commands**\n\
        • `/feedback <message>` - Sends feedback to the bot admin.\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.\n\n\
        Company IDs are always 10 characters long.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;

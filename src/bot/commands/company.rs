//! Company Discord commands - `company list`, `company info` and `company history`.
//!
//! All three are gated: each runs the access guard before touching the company API.
//! Arguments are validated first so a malformed id or lookback never causes a
//! request. Results are published to the channel once everything has been fetched.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            handlers::{access_gate::require_access, listing_session, reply::publish},
        },
        core::{aggregate::aggregate, listing::Listing, report, window},
        errors::{Error, Result},
        models::CompanyId,
    };
    use chrono::Utc;
    use poise::serenity_prelude as serenity;
    use tracing::info;

    /// Parent command for company information.
    #[poise::command(
        slash_command,
        subcommands("company_list", "company_info", "company_history")
    )]
    pub async fn company(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Company command. Available subcommands:\n\
            `/company list` - Browse all companies\n\
            `/company info <id>` - Show one company\n\
            `/company history <id> [days] [hours]` - Summarize recent transactions";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Lists all companies in an interactive, sortable, paginated view.
    #[poise::command(slash_command, rename = "list")]
    pub async fn company_list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        if !require_access(ctx).await?.is_allowed() {
            return Ok(());
        }

        let data = ctx.data();
        let companies = data.api.list_companies().await?;
        info!("Opening company listing with {} companies", companies.len());

        let listing = Listing::new(
            companies,
            data.config.listing.page_size,
            ctx.author().id.to_string(),
        );
        listing_session::run(ctx, listing, data.config.listing.session_timeout()).await
    }

    /// Shows a single company's details.
    #[poise::command(slash_command, rename = "info")]
    pub async fn company_info(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "10-character company ID"] id: String,
    ) -> Result<()> {
        let id = CompanyId::parse(id.trim())?;

        if !require_access(ctx).await?.is_allowed() {
            return Ok(());
        }

        let company = ctx.data().api.company(id.as_str()).await?;

        let fields = report::company_detail_fields(&company)
            .into_iter()
            .map(|field| (field.name, field.value, true));
        let embed = serenity::CreateEmbed::default()
            .title(format!("**{}**", company.name))
            .color(0x0058_65F2)
            .fields(fields);

        publish(ctx, serenity::CreateMessage::new().embed(embed)).await?;
        Ok(())
    }

    /// Summarizes a company's transactions over a recent window.
    ///
    /// Looks back one day unless `days` and/or `hours` are given.
    #[poise::command(slash_command, rename = "history")]
    pub async fn company_history(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "10-character company ID"] id: String,
        #[description = "How many days to look back (default 1)"]
        #[min = 1]
        #[max = 36500]
        days: Option<u32>,
        #[description = "How many hours to look back"]
        #[min = 1]
        #[max = 876000]
        hours: Option<u32>,
    ) -> Result<()> {
        let id = CompanyId::parse(id.trim())?;
        let lookback = window::Lookback::from_parts(days, hours)?;
        let since = lookback.cutoff(Utc::now())?;

        if !require_access(ctx).await?.is_allowed() {
            return Ok(());
        }

        let log = ctx.data().api.company_history(id.as_str()).await?;
        let entries = window::filter_since(&log, since);
        info!(
            "History for {id}: {} of {} entries in window",
            entries.len(),
            log.len()
        );
        let summary = aggregate(entries);

        let fields = report::history_fields(&summary)
            .into_iter()
            .map(|field| (field.name, field.value, false));
        let embed = serenity::CreateEmbed::default()
            .title(format!("**History for {id}**"))
            .description(format!("Last {}", lookback.label()))
            .color(0x0058_65F2)
            .fields(fields)
            .timestamp(serenity::Timestamp::now());

        publish(ctx, serenity::CreateMessage::new().embed(embed)).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;

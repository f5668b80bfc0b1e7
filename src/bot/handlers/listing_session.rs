//! Interactive listing session behind `/company list`.
//!
//! The session owns its [`Listing`]. Every button press or sort selection on the
//! message is routed here; the owner's actions update the listing and re-render the
//! message, anyone else gets an ephemeral notice and the listing stays as it was.

use crate::{
    bot::{BotData, handlers::reply::publish},
    core::{
        listing::{Listing, SortMode},
        report,
    },
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// What a component on the listing message does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Previous page
    Back,
    /// Next page
    Forward,
    /// Sort select menu
    Sort,
}

/// Custom ids of the components of one listing message.
///
/// Ids are prefixed with the invocation id so concurrent sessions never see each
/// other's interactions.
#[derive(Debug, Clone)]
pub struct ListingControls {
    prefix: String,
    back: String,
    forward: String,
    sort: String,
}

impl ListingControls {
    /// Control ids for the invocation `ctx_id`.
    #[must_use]
    pub fn new(ctx_id: u64) -> Self {
        let prefix = format!("{ctx_id}:");
        Self {
            back: format!("{prefix}back"),
            forward: format!("{prefix}forward"),
            sort: format!("{prefix}sort"),
            prefix,
        }
    }

    /// Whether `custom_id` belongs to this session.
    #[must_use]
    pub fn owns(&self, custom_id: &str) -> bool {
        custom_id.starts_with(&self.prefix)
    }

    /// Maps a custom id back to its control.
    #[must_use]
    pub fn classify(&self, custom_id: &str) -> Option<Control> {
        if custom_id == self.back {
            Some(Control::Back)
        } else if custom_id == self.forward {
            Some(Control::Forward)
        } else if custom_id == self.sort {
            Some(Control::Sort)
        } else {
            None
        }
    }

    /// Button row and sort menu for the current sort mode.
    #[must_use]
    pub fn components(&self, active: SortMode) -> Vec<serenity::CreateActionRow> {
        let buttons = serenity::CreateActionRow::Buttons(vec![
            serenity::CreateButton::new(&self.back)
                .emoji('◀')
                .style(serenity::ButtonStyle::Secondary),
            serenity::CreateButton::new(&self.forward)
                .emoji('▶')
                .style(serenity::ButtonStyle::Secondary),
        ]);

        let options = SortMode::ALL
            .into_iter()
            .map(|mode| {
                serenity::CreateSelectMenuOption::new(mode.label(), mode.value())
                    .default_selection(mode == active)
            })
            .collect();
        let menu = serenity::CreateSelectMenu::new(
            &self.sort,
            serenity::CreateSelectMenuKind::String { options },
        )
        .placeholder("Sort by...");

        vec![buttons, serenity::CreateActionRow::SelectMenu(menu)]
    }
}

/// Applies one control to the listing on behalf of `actor_id`.
///
/// `selected` holds the select-menu values for [`Control::Sort`]; an empty or
/// unknown selection leaves the listing unchanged.
///
/// # Errors
/// Returns [`Error::NotSessionOwner`] if `actor_id` does not own the listing.
pub fn apply_control(
    listing: &mut Listing,
    control: Control,
    actor_id: &str,
    selected: &[String],
) -> Result<()> {
    match control {
        Control::Back => listing.page_back(actor_id),
        Control::Forward => listing.page_forward(actor_id),
        Control::Sort => match selected.first().and_then(|v| SortMode::from_value(v)) {
            Some(mode) => listing.resort(actor_id, mode),
            None => {
                debug!("Ignoring sort selection {selected:?}");
                Ok(())
            }
        },
    }
}

/// Embed for the listing's current page.
#[must_use]
pub fn listing_embed(listing: &Listing) -> serenity::CreateEmbed {
    let page = listing.render();
    let fields = report::listing_fields(&page)
        .into_iter()
        .map(|field| (field.name, field.value, false));

    let embed = serenity::CreateEmbed::default()
        .title("**Company List**")
        .color(0x0058_65F2)
        .fields(fields)
        .footer(serenity::CreateEmbedFooter::new(report::listing_footer(
            &page,
        )));

    if page.entries.is_empty() {
        embed.description("No companies have been registered yet.")
    } else {
        embed
    }
}

/// Message that opens a listing session.
#[must_use]
pub fn listing_message(listing: &Listing, controls: &ListingControls) -> serenity::CreateMessage {
    serenity::CreateMessage::new()
        .embed(listing_embed(listing))
        .components(controls.components(listing.sort_mode()))
}

/// Edit that closes a session: the last page stays, the controls go.
#[must_use]
pub fn closing_edit(listing: &Listing) -> serenity::EditMessage {
    serenity::EditMessage::new()
        .embed(listing_embed(listing))
        .components(Vec::new())
}

/// Publishes the listing and serves its controls until the session times out.
///
/// With no timeout the session lives until the process stops. On timeout the
/// controls are removed from the message.
#[instrument(skip(ctx, listing), fields(owner = %listing.owner_id()))]
pub async fn run(
    ctx: poise::Context<'_, BotData, Error>,
    mut listing: Listing,
    timeout: Option<Duration>,
) -> Result<()> {
    let controls = ListingControls::new(ctx.id());
    let mut message = publish(ctx, listing_message(&listing, &controls)).await?;

    loop {
        let filter_controls = controls.clone();
        let mut collector = serenity::ComponentInteractionCollector::new(ctx)
            .message_id(message.id)
            .filter(move |press| filter_controls.owns(&press.data.custom_id));
        if let Some(timeout) = timeout {
            collector = collector.timeout(timeout);
        }
        let Some(press) = collector.await else {
            break;
        };

        let Some(control) = controls.classify(&press.data.custom_id) else {
            continue;
        };
        let selected: &[String] = match &press.data.kind {
            serenity::ComponentInteractionDataKind::StringSelect { values } => values.as_slice(),
            _ => &[],
        };
        let actor_id = press.user.id.to_string();

        let response = match apply_control(&mut listing, control, &actor_id, selected) {
            Ok(()) => serenity::CreateInteractionResponse::UpdateMessage(
                serenity::CreateInteractionResponseMessage::new()
                    .embed(listing_embed(&listing))
                    .components(controls.components(listing.sort_mode())),
            ),
            Err(e @ Error::NotSessionOwner { .. }) => {
                warn!("{e}");
                serenity::CreateInteractionResponse::Message(
                    serenity::CreateInteractionResponseMessage::new()
                        .content(e.user_message())
                        .ephemeral(true),
                )
            }
            Err(e) => return Err(e),
        };
        // Each press carries its own interaction token
        if let Err(e) = press
            .create_response(ctx.serenity_context(), response)
            .await
        {
            warn!("Failed to answer listing control: {e}");
        }
    }

    debug!("Listing session timed out");
    message
        .edit(ctx.serenity_context(), closing_edit(&listing))
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::sample_companies;
    use serde_json::json;

    #[test]
    fn test_controls_are_scoped_to_invocation() {
        let controls = ListingControls::new(42);
        let other = ListingControls::new(4242);

        assert_eq!(controls.classify("42:back"), Some(Control::Back));
        assert_eq!(controls.classify("42:forward"), Some(Control::Forward));
        assert_eq!(controls.classify("42:sort"), Some(Control::Sort));
        assert!(controls.owns("42:back"));
        assert!(!controls.owns("4242:back"));
        assert_eq!(other.classify("42:back"), None);
    }

    #[test]
    fn test_apply_control_sort_selection() {
        let mut listing = Listing::new(sample_companies(6), 5, "owner");
        listing.page_forward("owner").unwrap();

        apply_control(&mut listing, Control::Sort, "owner", &["assets".to_string()]).unwrap();

        assert_eq!(listing.sort_mode(), SortMode::AssetsDesc);
        assert_eq!(listing.page_index(), 0);
    }

    #[test]
    fn test_apply_control_ignores_unknown_selection() {
        let mut listing = Listing::new(sample_companies(6), 5, "owner");
        apply_control(&mut listing, Control::Sort, "owner", &[]).unwrap();
        apply_control(&mut listing, Control::Sort, "owner", &["nope".to_string()]).unwrap();
        assert_eq!(listing.sort_mode(), SortMode::Created);
    }

    #[test]
    fn test_apply_control_by_non_owner_is_rejected() {
        let mut listing = Listing::new(sample_companies(12), 5, "owner");

        let result = apply_control(&mut listing, Control::Back, "someone", &[]);

        assert!(matches!(result, Err(Error::NotSessionOwner { .. })));
        assert_eq!(listing.page_index(), 0);
    }

    #[test]
    fn test_apply_control_paging_wraps() {
        let mut listing = Listing::new(sample_companies(12), 5, "owner");
        apply_control(&mut listing, Control::Back, "owner", &[]).unwrap();
        assert_eq!(listing.page_index(), 2);
        apply_control(&mut listing, Control::Forward, "owner", &[]).unwrap();
        assert_eq!(listing.page_index(), 0);
    }

    #[test]
    fn test_listing_message_is_public_with_controls() {
        let listing = Listing::new(sample_companies(12), 5, "owner");
        let controls = ListingControls::new(7);

        let message = serde_json::to_value(listing_message(&listing, &controls)).unwrap();

        assert!(message["flags"].is_null());
        assert_eq!(message["components"].as_array().map(Vec::len), Some(2));
        assert_eq!(
            message["embeds"][0]["footer"]["text"],
            json!(report::listing_footer(&listing.render()))
        );
    }

    #[test]
    fn test_closing_edit_removes_controls_and_keeps_page() {
        let mut listing = Listing::new(sample_companies(12), 5, "owner");
        listing.page_forward("owner").unwrap();

        let edit = serde_json::to_value(closing_edit(&listing)).unwrap();

        assert_eq!(edit["components"], json!([]));
        assert_eq!(
            edit["embeds"][0]["footer"]["text"],
            json!(report::listing_footer(&listing.render()))
        );
    }
}

//! Access guard for gated commands.
//!
//! Gated commands call [`require_access`] before doing anything else and return
//! early on [`AccessDecision::Denied`]. The guard acknowledges the command
//! ephemerally, so the denial and any error raised before the result is published
//! are seen by the author only. See [`super::reply::publish`] for the result.

use crate::{
    bot::BotData,
    core::access::{AccessDecision, check_access},
    errors::{Error, Result},
};
use tracing::info;

/// Notice shown when the gate denies a user.
pub const DENIED_MESSAGE: &str =
    "🔒 This command is only available after purchasing access. Buy it in the shop, then try again.";

/// Reply that fills the ephemeral acknowledgement on denial.
#[must_use]
pub fn denial_reply() -> poise::CreateReply {
    poise::CreateReply::default().content(DENIED_MESSAGE)
}

/// Acknowledges the command ephemerally and runs the access check for its author.
///
/// On denial the author is told once, and the caller must stop.
pub async fn require_access(ctx: poise::Context<'_, BotData, Error>) -> Result<AccessDecision> {
    ctx.defer_ephemeral().await?;

    let data = ctx.data();
    let user_id = ctx.author().id.to_string();
    let rule = data.config.access.rule();

    let decision = check_access(&data.database, &data.api, &rule, &user_id).await;

    if decision == AccessDecision::Denied {
        info!(
            "Denied `{}` for user {user_id}",
            ctx.command().qualified_name
        );
        ctx.send(denial_reply()).await?;
    }
    Ok(decision)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_denial_reply_inherits_deferred_visibility() {
        let reply = denial_reply();
        assert_eq!(reply.content.as_deref(), Some(DENIED_MESSAGE));
        // Visibility comes from the ephemeral defer, not from this reply
        assert_eq!(reply.ephemeral, None);
        assert!(reply.embeds.is_empty());
        assert!(reply.components.is_none());
    }
}

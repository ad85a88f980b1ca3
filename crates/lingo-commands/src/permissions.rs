//! Permission checks for dictionary moderation
//!
//! Removal of dictionary entries is restricted to the entry's author,
//! configured bot owners, and members holding a configured moderator role
//! in the guild the entry belongs to.

use poise::serenity_prelude::{self as serenity, GuildId, RoleId, UserId};
use std::collections::HashSet;

use lingo_config::Config;
use tracing::{debug, warn};

/// Permission manager for the elevated moderation capability
#[derive(Debug)]
pub struct Permissions {
    /// Bot owner user IDs
    owners: HashSet<UserId>,
    /// Moderator role IDs (guild-specific)
    moderator_roles: HashSet<RoleId>,
}

impl Permissions {
    /// Create a new permissions manager from configuration
    pub fn new(config: &Config) -> Self {
        let owners = config
            .discord
            .owner_ids
            .iter()
            .map(|&id| UserId::new(id))
            .collect();

        let moderator_roles = config
            .discord
            .moderator_role_ids
            .iter()
            .map(|&id| RoleId::new(id))
            .collect();

        Self {
            owners,
            moderator_roles,
        }
    }

    /// Check if a user is a bot owner
    pub fn is_owner(&self, user_id: UserId) -> bool {
        self.owners.contains(&user_id)
    }

    /// Check whether a user holds the elevated moderation capability for
    /// the given guild: bot owner, configured moderator role, or Discord's
    /// own Manage Messages permission.
    pub async fn is_elevated(
        &self,
        ctx: &serenity::Context,
        user_id: UserId,
        guild_id: Option<GuildId>,
    ) -> bool {
        if self.is_owner(user_id) {
            debug!("User {} is bot owner", user_id);
            return true;
        }

        let Some(guild_id) = guild_id else {
            // No guild, no moderation hierarchy
            return false;
        };

        match ctx.http.get_member(guild_id, user_id).await {
            Ok(member) => {
                if member
                    .roles
                    .iter()
                    .any(|role_id| self.moderator_roles.contains(role_id))
                {
                    debug!("User {} has a moderator role", user_id);
                    return true;
                }

                if let Ok(permissions) = member.permissions(&ctx.cache) {
                    if permissions.manage_messages() {
                        debug!("User {} can manage messages", user_id);
                        return true;
                    }
                }

                false
            }
            Err(e) => {
                warn!(
                    "Could not fetch member {} in guild {}: {}",
                    user_id, guild_id, e
                );
                false
            }
        }
    }
}

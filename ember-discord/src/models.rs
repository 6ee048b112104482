use chrono::{DateTime, Utc};
use serenity::all::{
    GuildId, Http, Member, Mentionable, PartialGuild, PremiumTier, Timestamp, User, UserId,
};
use tracing::warn;

use ember_script::{GuildModel, UserModel};

/// Build the `user` scope from a bare user (no guild context, no join date).
pub fn user_model(user: &User) -> UserModel {
    UserModel {
        mention: user.mention().to_string(),
        id: user.id.get(),
        name: user.name.clone(),
        discriminator: discriminator_string(user),
        created_at: to_chrono(user.id.created_at()),
        joined_at: None,
        avatar: user.face(),
        global_name: user
            .global_name
            .clone()
            .unwrap_or_else(|| user.name.clone()),
    }
}

/// Build the `user` scope from a guild member, including the join date and
/// the guild-specific display avatar.
pub fn member_user_model(member: &Member) -> UserModel {
    UserModel {
        joined_at: member.joined_at.map(to_chrono),
        avatar: member.face(),
        ..user_model(&member.user)
    }
}

/// Build the `guild` scope. The owner is passed in so this stays a pure
/// conversion; use [`fetch_guild_model`] when you only have an id.
pub fn guild_model(
    guild: &PartialGuild,
    owner: UserModel,
    shard: u32,
    member_count: u64,
) -> GuildModel {
    GuildModel {
        name: guild.name.clone(),
        id: guild.id.get(),
        icon: guild.icon_url(),
        banner: guild.banner_url(),
        created_at: to_chrono(guild.id.created_at()),
        owner,
        member_count,
        description: guild.description.clone(),
        boost_level: premium_tier_level(guild.premium_tier),
        boosts: guild.premium_subscription_count.unwrap_or_default(),
        vanity_code: guild.vanity_url_code.clone(),
        shard,
        preferred_locale: guild.preferred_locale.clone(),
    }
}

/// Fetch a guild and its owner and build the `guild` scope. A failed owner
/// lookup degrades to a placeholder user rather than failing the render.
pub async fn fetch_guild_model(
    http: &Http,
    guild_id: GuildId,
    shard: u32,
) -> Result<GuildModel, serenity::Error> {
    let guild = guild_id.to_partial_guild_with_counts(http).await?;

    let owner = match http.get_user(guild.owner_id).await {
        Ok(user) => user_model(&user),
        Err(err) => {
            warn!(?err, owner_id = guild.owner_id.get(), "failed to fetch guild owner");
            placeholder_user(guild.owner_id)
        }
    };

    let member_count = guild.approximate_member_count.unwrap_or_default();
    Ok(guild_model(&guild, owner, shard, member_count))
}

fn discriminator_string(user: &User) -> String {
    match user.discriminator {
        Some(discriminator) => format!("{:04}", discriminator.get()),
        None => "0".to_owned(),
    }
}

fn premium_tier_level(tier: PremiumTier) -> u8 {
    match tier {
        PremiumTier::Tier1 => 1,
        PremiumTier::Tier2 => 2,
        PremiumTier::Tier3 => 3,
        _ => 0,
    }
}

fn placeholder_user(user_id: UserId) -> UserModel {
    UserModel {
        mention: user_id.mention().to_string(),
        id: user_id.get(),
        name: format!("User {}", user_id.get()),
        discriminator: "0".to_owned(),
        created_at: to_chrono(user_id.created_at()),
        joined_at: None,
        avatar: String::new(),
        global_name: format!("User {}", user_id.get()),
    }
}

fn to_chrono(at: Timestamp) -> DateTime<Utc> {
    DateTime::from_timestamp(at.unix_timestamp(), 0).unwrap_or_default()
}

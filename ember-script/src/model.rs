use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ScriptError;

/// The actor a script is rendered for, exposed as the `user` scope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserModel {
    pub mention: String,
    pub id: u64,
    pub name: String,
    pub discriminator: String,
    pub created_at: DateTime<Utc>,
    /// Absent when the actor is not a guild member.
    pub joined_at: Option<DateTime<Utc>>,
    pub avatar: String,
    pub global_name: String,
}

impl UserModel {
    /// Display form: `name#discriminator` for legacy accounts, bare name
    /// for accounts migrated to the unique-username system.
    pub fn display(&self) -> String {
        if self.discriminator == "0" {
            self.name.clone()
        } else {
            format!("{}#{}", self.name, self.discriminator)
        }
    }

    fn field(&self, name: &str) -> Option<String> {
        let value = match name {
            "mention" => self.mention.clone(),
            "id" => self.id.to_string(),
            "name" => self.name.clone(),
            "discriminator" => self.discriminator.clone(),
            "created_at" => self.created_at.to_rfc3339(),
            "joined_at" => self
                .joined_at
                .map(|at| at.to_rfc3339())
                .unwrap_or_default(),
            "avatar" => self.avatar.clone(),
            "global_name" => self.global_name.clone(),
            _ => return None,
        };
        Some(value)
    }
}

/// The guild a script is rendered in, exposed as the `guild` scope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GuildModel {
    pub name: String,
    pub id: u64,
    pub icon: Option<String>,
    pub banner: Option<String>,
    pub created_at: DateTime<Utc>,
    pub owner: UserModel,
    pub member_count: u64,
    pub description: Option<String>,
    pub boost_level: u8,
    pub boosts: u64,
    pub vanity_code: Option<String>,
    pub shard: u32,
    pub preferred_locale: String,
}

impl GuildModel {
    fn field(&self, name: &str) -> Option<String> {
        let value = match name {
            "name" => self.name.clone(),
            "id" => self.id.to_string(),
            "icon" => self.icon.clone().unwrap_or_default(),
            "banner" => self.banner.clone().unwrap_or_default(),
            "created_at" => self.created_at.to_rfc3339(),
            "member_count" => self.member_count.to_string(),
            "description" => self.description.clone().unwrap_or_default(),
            "boost_level" => self.boost_level.to_string(),
            "boosts" => self.boosts.to_string(),
            "vanity_code" => self.vanity_code.clone().unwrap_or_default(),
            "shard" => self.shard.to_string(),
            "preferred_locale" => self.preferred_locale.clone(),
            _ => return None,
        };
        Some(value)
    }
}

/// A moderator acting on the actor: a user plus the invoked command name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModeratorModel {
    pub user: UserModel,
    pub command: String,
}

/// One named scope of values available to interpolation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Model {
    User(UserModel),
    Guild(GuildModel),
    Moderator(ModeratorModel),
    /// A single scalar, interpolated as `{scope}` (e.g. `level`).
    Value(String),
    /// A flat map of named strings, interpolated as `{scope.key}`.
    Values(BTreeMap<String, String>),
}

impl Model {
    fn resolve(&self, path: &[&str]) -> Option<String> {
        match self {
            Model::User(user) => resolve_user(user, path),
            Model::Guild(guild) => resolve_guild(guild, path),
            Model::Moderator(moderator) => match path {
                ["command"] => Some(moderator.command.clone()),
                other => resolve_user(&moderator.user, other),
            },
            Model::Value(value) => path.is_empty().then(|| value.clone()),
            Model::Values(map) => match path {
                [key] => map.get(*key).cloned(),
                _ => None,
            },
        }
    }
}

fn resolve_user(user: &UserModel, path: &[&str]) -> Option<String> {
    match path {
        [] => Some(user.display()),
        [field] => user.field(field),
        _ => None,
    }
}

fn resolve_guild(guild: &GuildModel, path: &[&str]) -> Option<String> {
    match path {
        [] => Some(guild.name.clone()),
        ["owner", rest @ ..] => resolve_user(&guild.owner, rest),
        [field] => guild.field(field),
        _ => None,
    }
}

/// The full variable mapping for one render.
///
/// The `guild` scope is only present when the actor belongs to a guild;
/// a guildless render referencing `{guild.*}` fails with
/// [`ScriptError::UnknownVariable`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Variables {
    models: BTreeMap<String, Model>,
}

impl Variables {
    pub fn new(user: UserModel, guild: Option<GuildModel>) -> Self {
        let mut models = BTreeMap::new();
        models.insert("user".to_owned(), Model::User(user));
        if let Some(guild) = guild {
            models.insert("guild".to_owned(), Model::Guild(guild));
        }
        Variables { models }
    }

    /// Merge a caller-supplied extra scope in. Key collisions overwrite;
    /// callers own key uniqueness.
    pub fn insert(&mut self, name: impl Into<String>, model: Model) {
        self.models.insert(name.into(), model);
    }

    /// Builder form of [`Variables::insert`].
    pub fn with(mut self, name: impl Into<String>, model: Model) -> Self {
        self.insert(name, model);
        self
    }

    /// The actor's model, when the conventional `user` scope is present.
    pub fn user(&self) -> Option<&UserModel> {
        match self.models.get("user") {
            Some(Model::User(user)) => Some(user),
            _ => None,
        }
    }

    /// Resolve a dotted reference like `guild.owner.mention`.
    pub fn resolve(&self, reference: &str) -> Result<String, ScriptError> {
        let mut parts = reference.split('.');
        let scope = parts.next().unwrap_or_default();
        let path: Vec<&str> = parts.collect();

        self.models
            .get(scope)
            .and_then(|model| model.resolve(&path))
            .ok_or_else(|| ScriptError::UnknownVariable {
                reference: reference.to_owned(),
            })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::BTreeMap;

    use chrono::{TimeZone, Utc};

    use super::{GuildModel, Model, ModeratorModel, UserModel, Variables};
    use crate::error::ScriptError;

    pub(crate) fn sample_user() -> UserModel {
        UserModel {
            mention: "<@1001>".to_owned(),
            id: 1001,
            name: "astra".to_owned(),
            discriminator: "0".to_owned(),
            created_at: Utc.with_ymd_and_hms(2020, 5, 17, 12, 0, 0).unwrap(),
            joined_at: Some(Utc.with_ymd_and_hms(2023, 1, 2, 8, 30, 0).unwrap()),
            avatar: "https://cdn.example.com/avatars/1001.png".to_owned(),
            global_name: "Astra".to_owned(),
        }
    }

    pub(crate) fn sample_guild() -> GuildModel {
        GuildModel {
            name: "The Observatory".to_owned(),
            id: 9000,
            icon: Some("https://cdn.example.com/icons/9000.png".to_owned()),
            banner: None,
            created_at: Utc.with_ymd_and_hms(2019, 3, 1, 0, 0, 0).unwrap(),
            owner: UserModel {
                mention: "<@42>".to_owned(),
                id: 42,
                name: "kepler".to_owned(),
                discriminator: "1337".to_owned(),
                created_at: Utc.with_ymd_and_hms(2016, 9, 9, 9, 9, 9).unwrap(),
                joined_at: Some(Utc.with_ymd_and_hms(2019, 3, 1, 0, 0, 0).unwrap()),
                avatar: "https://cdn.example.com/avatars/42.png".to_owned(),
                global_name: "Kepler".to_owned(),
            },
            member_count: 512,
            description: None,
            boost_level: 2,
            boosts: 14,
            vanity_code: Some("observatory".to_owned()),
            shard: 0,
            preferred_locale: "en-US".to_owned(),
        }
    }

    pub(crate) fn sample_vars() -> Variables {
        Variables::new(sample_user(), Some(sample_guild()))
    }

    #[test]
    fn resolves_user_fields() {
        let vars = sample_vars();
        assert_eq!(vars.resolve("user.mention").unwrap(), "<@1001>");
        assert_eq!(vars.resolve("user.id").unwrap(), "1001");
        assert_eq!(vars.resolve("user.global_name").unwrap(), "Astra");
    }

    #[test]
    fn bare_scope_uses_display_form() {
        let vars = sample_vars();
        assert_eq!(vars.resolve("user").unwrap(), "astra");
        assert_eq!(vars.resolve("guild").unwrap(), "The Observatory");
        assert_eq!(vars.resolve("guild.owner").unwrap(), "kepler#1337");
    }

    #[test]
    fn resolves_nested_owner_path() {
        let vars = sample_vars();
        assert_eq!(vars.resolve("guild.owner.mention").unwrap(), "<@42>");
    }

    #[test]
    fn absent_optionals_resolve_empty() {
        let vars = sample_vars();
        assert_eq!(vars.resolve("guild.banner").unwrap(), "");
        assert_eq!(vars.resolve("guild.description").unwrap(), "");
    }

    #[test]
    fn unknown_scope_and_field_are_errors() {
        let vars = Variables::new(sample_user(), None);
        assert_eq!(
            vars.resolve("guild.name"),
            Err(ScriptError::UnknownVariable {
                reference: "guild.name".to_owned()
            })
        );
        assert_eq!(
            vars.resolve("user.shoe_size"),
            Err(ScriptError::UnknownVariable {
                reference: "user.shoe_size".to_owned()
            })
        );
    }

    #[test]
    fn moderator_scope_exposes_command_and_user_fields() {
        let vars = sample_vars().with(
            "moderator",
            Model::Moderator(ModeratorModel {
                user: sample_user(),
                command: "ban".to_owned(),
            }),
        );
        assert_eq!(vars.resolve("moderator.command").unwrap(), "ban");
        assert_eq!(vars.resolve("moderator.name").unwrap(), "astra");
    }

    #[test]
    fn scalar_and_map_extras_resolve() {
        let vars = sample_vars()
            .with("level", Model::Value("5".to_owned()))
            .with(
                "case",
                Model::Values(BTreeMap::from([(
                    "reason".to_owned(),
                    "spam".to_owned(),
                )])),
            );
        assert_eq!(vars.resolve("level").unwrap(), "5");
        assert_eq!(vars.resolve("case.reason").unwrap(), "spam");
        assert!(vars.resolve("level.up").is_err());
    }
}

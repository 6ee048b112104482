use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serenity::all::{Http, Member, User};
use thiserror::Error;

use ember_script::{RenderedMessage, ScriptError, Variables};

use crate::models::{fetch_guild_model, member_user_model, user_model};

/// A raw admin-authored script, as taken from a command argument or a
/// database row. Parsing never fails; validity is only known at render
/// time, against a concrete actor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Script(String);

impl Script {
    pub fn new(raw: impl Into<String>) -> Self {
        Script(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Render against an already-built variable mapping.
    pub fn render(&self, vars: &Variables) -> Result<RenderedMessage, ScriptError> {
        ember_script::render(&self.0, vars)
    }

    /// Render for a bare user: only the `user` scope is available, so any
    /// `{guild.*}` reference fails.
    pub fn render_for_user(&self, user: &User) -> Result<RenderedMessage, ScriptError> {
        self.render(&Variables::new(user_model(user), None))
    }

    /// Render for a guild member, fetching the guild context over REST.
    pub async fn render_for_member(
        &self,
        http: &Http,
        member: &Member,
        shard: u32,
    ) -> Result<RenderedMessage, RenderError> {
        let guild = fetch_guild_model(http, member.guild_id, shard).await?;
        let vars = Variables::new(member_user_model(member), Some(guild));
        Ok(self.render(&vars)?)
    }
}

impl FromStr for Script {
    type Err = Infallible;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Ok(Script(raw.to_owned()))
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A member render can fail on the script itself or on the guild fetch.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Script(#[from] ScriptError),
    #[error(transparent)]
    Discord(#[from] serenity::Error),
}

#[cfg(test)]
mod tests {
    use super::Script;

    #[test]
    fn from_str_is_infallible_and_round_trips() {
        let script: Script = "{title: hi}".parse().unwrap();
        assert_eq!(script.as_str(), "{title: hi}");
        assert_eq!(script.to_string(), "{title: hi}");
    }
}

/// Rendered payloads to serenity builder types.
pub mod message;
/// Serenity gateway objects to script variable models.
pub mod models;
/// The `Script` command-argument wrapper.
pub mod script;

pub use message::{delete_after, to_action_rows, to_create_embed, to_create_message};
pub use models::{fetch_guild_model, guild_model, member_user_model, user_model};
pub use script::{RenderError, Script};

/// Emoji references for button directives.
pub mod emoji;
/// Typed render errors.
pub mod error;
/// Tag extraction from raw script text.
pub mod extract;
/// `{scope.field}` interpolation.
pub mod interp;
/// Variable scopes available to interpolation.
pub mod model;
/// Rendered message payload types.
pub mod payload;
/// Script rendering (tag interpretation).
pub mod render;

pub use emoji::EmojiRef;
pub use error::ScriptError;
pub use model::{GuildModel, Model, ModeratorModel, UserModel, Variables};
pub use payload::{Button, Embed, EmbedAuthor, EmbedField, EmbedFooter, RenderedMessage};
pub use render::{DEFAULT_EMBED_COLOR, MAX_SCRIPT_LEN, render, render_with_limit};

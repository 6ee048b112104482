use thiserror::Error;

/// Errors that abort a render.
///
/// Cosmetic problems (bad color, bad delete delay, short field directives,
/// unresolvable button tokens) never surface here; they degrade to defaults
/// inside the renderer. Only problems that make the script itself unusable
/// are returned to the caller.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ScriptError {
    /// A `{scope.field}` reference matched no model attribute.
    #[error("unknown variable `{{{reference}}}`")]
    UnknownVariable { reference: String },

    /// A `{` or `}` outside any reference or `{{`/`}}` escape.
    #[error("unmatched brace in script text")]
    UnmatchedBrace,

    /// The script exceeded the size cap.
    #[error("script is {len} bytes, limit is {max}")]
    TooLarge { len: usize, max: usize },
}

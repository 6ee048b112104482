use std::fmt;

use serde::{Deserialize, Serialize};

/// An emoji attached to a button: either a custom guild emoji (`id` set)
/// or a plain unicode literal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiRef {
    pub name: String,
    pub id: Option<u64>,
    pub animated: bool,
}

impl EmojiRef {
    /// Parse `<a:name:id>`, `a:name:id`, `name:id`, or a unicode literal.
    /// Anything that does not fit the custom-emoji shape is kept verbatim
    /// as a unicode emoji, which is how the message transport treats it.
    pub fn parse(raw: &str) -> EmojiRef {
        let inner = raw
            .strip_prefix('<')
            .and_then(|rest| rest.strip_suffix('>'))
            .unwrap_or(raw);

        let unicode = || EmojiRef {
            name: inner.to_owned(),
            id: None,
            animated: false,
        };

        let parts: Vec<&str> = inner.split(':').collect();
        let (animated, name, id) = match parts[..] {
            [name, id] => (false, name, id),
            [flag, name, id] if flag.is_empty() || flag == "a" => (flag == "a", name, id),
            _ => return unicode(),
        };

        match id.parse::<u64>() {
            Ok(id) if id > 0 && !name.is_empty() => EmojiRef {
                name: name.to_owned(),
                id: Some(id),
                animated,
            },
            _ => unicode(),
        }
    }
}

impl fmt::Display for EmojiRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) if self.animated => write!(f, "<a:{}:{}>", self.name, id),
            Some(id) => write!(f, "<:{}:{}>", self.name, id),
            None => f.write_str(&self.name),
        }
    }
}

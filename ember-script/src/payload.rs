use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::emoji::EmojiRef;

/// The output of one render: everything the caller needs to send a message.
///
/// All fields are plain data, built fresh per render; nothing here keeps a
/// handle on the engine or on any transport.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderedMessage {
    pub content: Option<String>,
    pub embed: Option<Embed>,
    pub buttons: Vec<Button>,
    /// Auto-delete delay in seconds. Callers strip this before using the
    /// payload as a persistent message.
    pub delete_after: Option<u64>,
}

impl RenderedMessage {
    /// True when the render produced nothing sendable.
    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.embed.is_none() && self.buttons.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Embed {
    pub title: Option<String>,
    pub description: Option<String>,
    pub color: Option<u32>,
    pub thumbnail: Option<String>,
    pub image: Option<String>,
    pub author: Option<EmbedAuthor>,
    pub footer: Option<EmbedFooter>,
    pub fields: Vec<EmbedField>,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedAuthor {
    pub name: String,
    pub icon_url: String,
    pub url: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedFooter {
    pub text: String,
    pub icon_url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// A link button. Buttons without a resolved URL render disabled; callback
/// buttons are not part of the script language.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub label: String,
    pub url: Option<String>,
    pub emoji: Option<EmojiRef>,
    pub disabled: bool,
}

use std::time::Duration;

use serenity::all::{
    ButtonStyle, CreateActionRow, CreateButton, CreateEmbed, CreateEmbedAuthor, CreateEmbedFooter,
    CreateMessage, EmojiId, ReactionType, Timestamp,
};

use ember_script::{Button, Embed, EmojiRef, RenderedMessage};

/// Discord allows at most 5 buttons per row and 5 rows per message.
pub const MAX_BUTTONS: usize = 25;
const BUTTONS_PER_ROW: usize = 5;

/// Convert a rendered embed into the serenity builder.
pub fn to_create_embed(embed: &Embed) -> CreateEmbed {
    let mut builder = CreateEmbed::new();

    if let Some(title) = &embed.title {
        builder = builder.title(title.clone());
    }
    if let Some(description) = &embed.description {
        builder = builder.description(description.clone());
    }
    if let Some(color) = embed.color {
        builder = builder.color(color);
    }
    if let Some(thumbnail) = &embed.thumbnail {
        builder = builder.thumbnail(thumbnail.clone());
    }
    if let Some(image) = &embed.image {
        builder = builder.image(image.clone());
    }
    if let Some(author) = &embed.author {
        let mut create = CreateEmbedAuthor::new(author.name.clone());
        if !author.icon_url.is_empty() {
            create = create.icon_url(author.icon_url.clone());
        }
        if !author.url.is_empty() {
            create = create.url(author.url.clone());
        }
        builder = builder.author(create);
    }
    if let Some(footer) = &embed.footer {
        let mut create = CreateEmbedFooter::new(footer.text.clone());
        if !footer.icon_url.is_empty() {
            create = create.icon_url(footer.icon_url.clone());
        }
        builder = builder.footer(create);
    }
    for field in &embed.fields {
        builder = builder.field(field.name.clone(), field.value.clone(), field.inline);
    }
    if let Some(at) = embed.timestamp
        && let Ok(at) = Timestamp::from_unix_timestamp(at.timestamp())
    {
        builder = builder.timestamp(at);
    }

    builder
}

/// Lay the rendered buttons out into action rows, in source order.
/// Anything beyond [`MAX_BUTTONS`] is dropped.
pub fn to_action_rows(buttons: &[Button]) -> Vec<CreateActionRow> {
    let buttons: Vec<CreateButton> = buttons
        .iter()
        .take(MAX_BUTTONS)
        .enumerate()
        .map(|(index, button)| to_create_button(index, button))
        .collect();

    buttons
        .chunks(BUTTONS_PER_ROW)
        .map(|row| CreateActionRow::Buttons(row.to_vec()))
        .collect()
}

/// Convert a whole rendered payload into a sendable message. `delete_after`
/// is not part of the wire payload; callers that want the auto-delete
/// behavior schedule it themselves via [`delete_after`].
pub fn to_create_message(message: &RenderedMessage) -> CreateMessage {
    let mut builder = CreateMessage::new();

    if let Some(content) = &message.content {
        builder = builder.content(content.clone());
    }
    if let Some(embed) = &message.embed {
        builder = builder.embed(to_create_embed(embed));
    }

    let rows = to_action_rows(&message.buttons);
    if !rows.is_empty() {
        builder = builder.components(rows);
    }

    builder
}

/// The payload's auto-delete delay, ready for a sleep-then-delete task.
pub fn delete_after(message: &RenderedMessage) -> Option<Duration> {
    message.delete_after.map(Duration::from_secs)
}

fn to_create_button(index: usize, button: &Button) -> CreateButton {
    // Url-less buttons have nothing to link to; they render as disabled
    // secondary buttons, so the custom id is never dispatched.
    let mut builder = match &button.url {
        Some(url) => CreateButton::new_link(url.clone()),
        None => CreateButton::new(format!("script-button-{index}")).style(ButtonStyle::Secondary),
    };

    if !button.label.is_empty() {
        builder = builder.label(button.label.clone());
    }
    if let Some(emoji) = &button.emoji {
        builder = builder.emoji(to_reaction_type(emoji));
    }

    builder.disabled(button.disabled)
}

fn to_reaction_type(emoji: &EmojiRef) -> ReactionType {
    match emoji.id {
        Some(id) => ReactionType::Custom {
            animated: emoji.animated,
            id: EmojiId::new(id),
            name: Some(emoji.name.clone()),
        },
        None => ReactionType::Unicode(emoji.name.clone()),
    }
}

use chrono::Utc;
use tracing::debug;
use url::Url;

use crate::emoji::EmojiRef;
use crate::error::ScriptError;
use crate::extract::{Extraction, extract};
use crate::interp::interpolate;
use crate::model::Variables;
use crate::payload::{Button, Embed, EmbedAuthor, EmbedField, EmbedFooter, RenderedMessage};

/// Neutral gray used when a `color` argument fails to parse.
pub const DEFAULT_EMBED_COLOR: u32 = 0x2f3136;

/// Default cap on script size. Admin-authored scripts are adversarial
/// input; anything near this size is garbage, not a message.
pub const MAX_SCRIPT_LEN: usize = 16 * 1024;

/// The separator between parts of a multi-part tag argument.
const PART_SEPARATOR: &str = " && ";

/// Render a script against the given variables, with the default size cap.
pub fn render(script: &str, vars: &Variables) -> Result<RenderedMessage, ScriptError> {
    render_with_limit(script, vars, MAX_SCRIPT_LEN)
}

/// Render a script against the given variables.
///
/// A script with no tag spans renders as plain content (interpolated).
/// Otherwise each tag folds into the payload in source order per the
/// directive table; unrecognized tags are skipped. Unknown variable
/// references abort the render, everything else degrades to a default.
pub fn render_with_limit(
    script: &str,
    vars: &Variables,
    max_len: usize,
) -> Result<RenderedMessage, ScriptError> {
    if script.len() > max_len {
        return Err(ScriptError::TooLarge {
            len: script.len(),
            max: max_len,
        });
    }

    let tags = match extract(script) {
        Extraction::Content(text) => {
            return Ok(RenderedMessage {
                content: Some(interpolate(text, vars)?),
                ..Default::default()
            });
        }
        Extraction::Tags(tags) => tags,
    };

    let mut message = RenderedMessage::default();
    let mut embed = Embed::default();
    let mut has_embed = false;

    for tag in tags {
        match tag.name {
            "title" => {
                embed.title = Some(interpolate(tag.value, vars)?);
                has_embed = true;
            }
            "description" => {
                embed.description = Some(interpolate(tag.value, vars)?);
                has_embed = true;
            }
            "thumbnail" => {
                embed.thumbnail = Some(interpolate(tag.value, vars)?);
                has_embed = true;
            }
            "image" => {
                embed.image = Some(interpolate(tag.value, vars)?);
                has_embed = true;
            }
            "timestamp" => {
                let resolved = match tag.value {
                    "now" => Some(Utc::now()),
                    "joined_at" => vars.user().and_then(|user| user.joined_at),
                    "created_at" => vars.user().map(|user| user.created_at),
                    other => {
                        debug!(value = other, "unknown timestamp literal, ignoring");
                        None
                    }
                };
                if let Some(at) = resolved {
                    embed.timestamp = Some(at);
                    has_embed = true;
                }
            }
            "color" => {
                embed.color = Some(parse_color(tag.value));
                has_embed = true;
            }
            "content" => {
                message.content = Some(interpolate(tag.value, vars)?);
            }
            "author" => {
                let parts: Vec<&str> = tag.value.split(PART_SEPARATOR).collect();
                embed.author = Some(EmbedAuthor {
                    name: interpolate(parts[0], vars)?,
                    icon_url: interpolate(part(&parts, 1), vars)?,
                    url: interpolate(part(&parts, 2), vars)?,
                });
                has_embed = true;
            }
            "footer" => {
                let parts: Vec<&str> = tag.value.split(PART_SEPARATOR).collect();
                embed.footer = Some(EmbedFooter {
                    text: interpolate(parts[0], vars)?,
                    icon_url: interpolate(part(&parts, 1), vars)?,
                });
                has_embed = true;
            }
            "field" => {
                let parts: Vec<&str> = tag.value.split(PART_SEPARATOR).collect();
                if parts.len() < 2 {
                    debug!(value = tag.value, "field needs a name and a value, skipping");
                    continue;
                }
                embed.fields.push(EmbedField {
                    name: interpolate(parts[0], vars)?,
                    value: interpolate(parts[1], vars)?,
                    inline: part(&parts, 2).eq_ignore_ascii_case("true"),
                });
                has_embed = true;
            }
            "delete" => match tag.value.trim().parse::<u64>() {
                Ok(seconds) => message.delete_after = Some(seconds),
                Err(_) => debug!(value = tag.value, "invalid delete delay, ignoring"),
            },
            "button" => {
                let parts: Vec<&str> = tag.value.split(PART_SEPARATOR).collect();
                let label = interpolate(parts[0], vars)?;

                let mut url = None;
                let mut emoji = None;
                for raw in parts.iter().skip(1).take(2) {
                    let token = interpolate(raw, vars)?;
                    if token.is_empty() {
                        continue;
                    }
                    if is_link(&token) {
                        url = Some(token);
                    } else {
                        emoji = Some(EmojiRef::parse(&token));
                    }
                }

                message.buttons.push(Button {
                    label,
                    disabled: url.is_none(),
                    url,
                    emoji,
                });
            }
            other => {
                debug!(tag = other, "unrecognized tag, ignoring");
            }
        }
    }

    if has_embed {
        message.embed = Some(embed);
    }

    Ok(message)
}

fn part<'a>(parts: &[&'a str], index: usize) -> &'a str {
    parts.get(index).copied().unwrap_or("")
}

/// Parse `#RRGGBB` or bare hex. Color is cosmetic; failures fall back to
/// [`DEFAULT_EMBED_COLOR`] instead of erroring.
fn parse_color(raw: &str) -> u32 {
    let trimmed = raw.trim();
    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
    match u32::from_str_radix(hex, 16) {
        Ok(value) if value <= 0xFF_FF_FF => value,
        _ => {
            debug!(value = raw, "invalid color, using default");
            DEFAULT_EMBED_COLOR
        }
    }
}

fn is_link(token: &str) -> bool {
    Url::parse(token)
        .map(|parsed| matches!(parsed.scheme(), "http" | "https" | "ftp"))
        .unwrap_or(false)
}

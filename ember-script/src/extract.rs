/// One extracted directive span.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawTag<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

/// Result of scanning a script: directives in source order, or plain content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Extraction<'a> {
    Tags(Vec<RawTag<'a>>),
    Content(&'a str),
}

/// Scan `script` for `{name: value}` spans.
///
/// The span grammar: `name` is a non-empty run of characters without braces,
/// terminated by the first `:`; `value` is non-empty and may contain at most
/// one level of nested `{...}` groups, and a nested group may not itself
/// contain braces. Nested groups exist so arguments can carry
/// `{scope.field}` interpolations; a nested `{tag: ...}` is never a
/// directive. A malformed span is not a tag, and scanning resumes one
/// character past its opening brace so an inner well-formed span can still
/// match. Text between spans is discarded; a script with zero spans is
/// plain content.
pub fn extract(script: &str) -> Extraction<'_> {
    let bytes = script.as_bytes();
    let mut tags = Vec::new();
    let mut cursor = 0;

    while cursor < bytes.len() {
        if bytes[cursor] != b'{' {
            cursor += 1;
            continue;
        }

        match match_span(script, cursor) {
            Some((tag, end)) => {
                tags.push(tag);
                cursor = end;
            }
            None => cursor += 1,
        }
    }

    if tags.is_empty() {
        Extraction::Content(script)
    } else {
        Extraction::Tags(tags)
    }
}

/// Try to match one tag span starting at the `{` at `start`. On success
/// returns the tag and the index just past its closing brace.
fn match_span(script: &str, start: usize) -> Option<(RawTag<'_>, usize)> {
    let bytes = script.as_bytes();

    let mut cursor = start + 1;
    while cursor < bytes.len() && !matches!(bytes[cursor], b':' | b'{' | b'}') {
        cursor += 1;
    }
    if cursor == start + 1 || cursor >= bytes.len() || bytes[cursor] != b':' {
        return None;
    }
    let name = &script[start + 1..cursor];
    cursor += 1;

    // Whitespace right after the colon is separator, not value. If the value
    // would otherwise be empty, the last whitespace character is kept as the
    // value instead, which is what the legacy extraction accepted.
    let after_colon = cursor;
    while cursor < bytes.len() && bytes[cursor].is_ascii_whitespace() {
        cursor += 1;
    }
    let mut value_start = cursor;
    if cursor < bytes.len() && bytes[cursor] == b'}' && cursor > after_colon {
        value_start = cursor - 1;
    }

    cursor = value_start;
    while cursor < bytes.len() && bytes[cursor] != b'}' {
        if bytes[cursor] == b'{' {
            cursor += 1;
            while cursor < bytes.len() && !matches!(bytes[cursor], b'{' | b'}') {
                cursor += 1;
            }
            if cursor >= bytes.len() || bytes[cursor] != b'}' {
                return None;
            }
        }
        cursor += 1;
    }
    if cursor >= bytes.len() || cursor == value_start {
        return None;
    }

    let value = &script[value_start..cursor];
    Some((RawTag { name, value }, cursor + 1))
}

#[cfg(test)]
mod tests {
    use super::{Extraction, RawTag, extract};

    fn tags(script: &str) -> Vec<(String, String)> {
        match extract(script) {
            Extraction::Tags(tags) => tags
                .into_iter()
                .map(|tag| (tag.name.to_owned(), tag.value.to_owned()))
                .collect(),
            Extraction::Content(_) => panic!("expected tags in {script:?}"),
        }
    }

    #[test]
    fn plain_text_is_content() {
        assert_eq!(extract("welcome aboard"), Extraction::Content("welcome aboard"));
        assert_eq!(extract(""), Extraction::Content(""));
        assert_eq!(
            extract("hello {user.mention}"),
            Extraction::Content("hello {user.mention}")
        );
    }

    #[test]
    fn single_tag() {
        assert_eq!(
            tags("{title: hello}"),
            vec![("title".to_owned(), "hello".to_owned())]
        );
    }

    #[test]
    fn preserves_source_order() {
        assert_eq!(
            tags("{field: A && 1}{field: B && 2}"),
            vec![
                ("field".to_owned(), "A && 1".to_owned()),
                ("field".to_owned(), "B && 2".to_owned()),
            ]
        );
    }

    #[test]
    fn tolerates_one_level_of_nesting() {
        assert_eq!(
            tags("{description: welcome {user.mention} to {guild.name}!}"),
            vec![(
                "description".to_owned(),
                "welcome {user.mention} to {guild.name}!".to_owned()
            )]
        );
    }

    #[test]
    fn deeper_nesting_invalidates_outer_span_but_inner_can_match() {
        // The outer span is malformed (two brace levels); the inner
        // `{title: x}` is still found.
        assert_eq!(
            tags("{description: {title: {user.name}}}"),
            vec![("title".to_owned(), "{user.name}".to_owned())]
        );
    }

    #[test]
    fn literal_text_between_tags_is_discarded() {
        assert_eq!(
            tags("before {title: a} middle {footer: b} after"),
            vec![
                ("title".to_owned(), "a".to_owned()),
                ("footer".to_owned(), "b".to_owned()),
            ]
        );
    }

    #[test]
    fn leading_whitespace_is_stripped_trailing_kept() {
        assert_eq!(
            tags("{title:   spaced out  }"),
            vec![("title".to_owned(), "spaced out  ".to_owned())]
        );
    }

    #[test]
    fn whitespace_only_value_keeps_one_space() {
        assert_eq!(tags("{title:   }"), vec![("title".to_owned(), " ".to_owned())]);
    }

    #[test]
    fn malformed_spans_are_not_tags() {
        assert_eq!(extract("{title}"), Extraction::Content("{title}"));
        assert_eq!(extract("{: value}"), Extraction::Content("{: value}"));
        assert_eq!(extract("{title:}"), Extraction::Content("{title:}"));
        assert_eq!(
            extract("{title: unterminated"),
            Extraction::Content("{title: unterminated")
        );
    }

    #[test]
    fn names_are_not_trimmed() {
        assert_eq!(
            extract("{ title: x}"),
            Extraction::Tags(vec![RawTag {
                name: " title",
                value: "x"
            }])
        );
    }
}

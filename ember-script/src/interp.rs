use crate::error::ScriptError;
use crate::model::Variables;

/// Substitute `{scope.field}` references in `text` against `vars`.
///
/// `{{` and `}}` escape to literal braces, the same syntax stored scripts
/// already rely on. References are attribute lookups only; there is no
/// expression evaluation. An unknown reference or a stray brace aborts the
/// render.
pub fn interpolate(text: &str, vars: &Variables) -> Result<String, ScriptError> {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    while cursor < bytes.len() {
        match bytes[cursor] {
            b'{' if bytes.get(cursor + 1) == Some(&b'{') => {
                out.push('{');
                cursor += 2;
            }
            b'}' if bytes.get(cursor + 1) == Some(&b'}') => {
                out.push('}');
                cursor += 2;
            }
            b'{' => {
                let rest = &text[cursor + 1..];
                let end = rest.find(['{', '}']).ok_or(ScriptError::UnmatchedBrace)?;
                if rest.as_bytes()[end] != b'}' {
                    return Err(ScriptError::UnmatchedBrace);
                }
                out.push_str(&vars.resolve(&rest[..end])?);
                cursor += end + 2;
            }
            b'}' => return Err(ScriptError::UnmatchedBrace),
            _ => {
                let start = cursor;
                while cursor < bytes.len() && !matches!(bytes[cursor], b'{' | b'}') {
                    cursor += 1;
                }
                out.push_str(&text[start..cursor]);
            }
        }
    }

    Ok(out)
}

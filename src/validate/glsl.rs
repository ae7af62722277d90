//! Narrow parser for GLSL std140 uniform block declarations
//!
//! This is not a shading-language parser. It recognizes exactly one
//! construct, a named uniform block containing `<type> <identifier>;`
//! entries (with optional `[N]` array suffixes), which is all the
//! cross-validator needs. Whitespace and comments are ignored.

use crate::core::error::Error;
use crate::core::types::Result;

use super::Slot;

/// Byte size of a primitive type keyword, or None if unrecognized
fn keyword_size(keyword: &str) -> Option<usize> {
    match keyword {
        "float" | "int" | "uint" | "bool" => Some(4),
        "vec2" => Some(8),
        // a vec3 slot occupies a full vec4 under std140
        "vec3" => Some(16),
        "vec4" => Some(16),
        "mat4" => Some(64),
        _ => None,
    }
}

/// Parse a uniform block in `text` into ordered slots.
///
/// Uses the first block found, or the one named `block_name` when given.
/// An optional `layout(...)` prefix and an optional instance name after
/// the closing brace are tolerated.
pub fn parse_block(text: &str, block_name: Option<&str>) -> Result<Vec<Slot>> {
    let stripped = strip_comments(text);
    let tokens = tokenize(&stripped);
    let entries = block_entries(&tokens, block_name)?;
    parse_entries(entries)
}

fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '/' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('/') => {
                for n in chars.by_ref() {
                    if n == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            Some('*') => {
                chars.next();
                let mut prev = ' ';
                for n in chars.by_ref() {
                    if prev == '*' && n == '/' {
                        break;
                    }
                    prev = n;
                }
                out.push(' ');
            }
            _ => out.push(c),
        }
    }
    out
}

fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut iter = text.char_indices().peekable();
    while let Some((start, c)) = iter.next() {
        if c.is_whitespace() {
            continue;
        }
        if c.is_alphanumeric() || c == '_' {
            let mut end = start + c.len_utf8();
            while let Some(&(i, n)) = iter.peek() {
                if n.is_alphanumeric() || n == '_' {
                    iter.next();
                    end = i + n.len_utf8();
                } else {
                    break;
                }
            }
            tokens.push(&text[start..end]);
        } else {
            tokens.push(&text[start..start + c.len_utf8()]);
        }
    }
    tokens
}

fn is_identifier(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Locate the `uniform <Name> {` header and return the tokens inside the braces
fn block_entries<'a>(tokens: &'a [&'a str], block_name: Option<&str>) -> Result<&'a [&'a str]> {
    for i in 0..tokens.len().saturating_sub(2) {
        if tokens[i] != "uniform" || !is_identifier(tokens[i + 1]) || tokens[i + 2] != "{" {
            continue;
        }
        let name = tokens[i + 1];
        if block_name.is_some_and(|wanted| wanted != name) {
            continue;
        }
        let body_start = i + 3;
        let len = tokens[body_start..]
            .iter()
            .position(|t| *t == "}")
            .ok_or_else(|| Error::Parse(format!("unterminated uniform block '{name}'")))?;
        return Ok(&tokens[body_start..body_start + len]);
    }
    Err(Error::Parse(match block_name {
        Some(name) => format!("no uniform block named '{name}' in declaration text"),
        None => "no uniform block found in declaration text".to_string(),
    }))
}

fn parse_entries(tokens: &[&str]) -> Result<Vec<Slot>> {
    let mut slots = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        let keyword = tokens[i];
        let base = keyword_size(keyword)
            .ok_or_else(|| Error::Parse(format!("unknown type keyword '{keyword}'")))?;

        let name = *tokens
            .get(i + 1)
            .ok_or_else(|| Error::Parse(format!("missing identifier after '{keyword}'")))?;
        if !is_identifier(name) {
            return Err(Error::Parse(format!(
                "expected identifier after '{keyword}', found '{name}'"
            )));
        }
        i += 2;

        let mut count = 1usize;
        let mut kind = keyword.to_string();
        if tokens.get(i) == Some(&"[") {
            let count_token = *tokens
                .get(i + 1)
                .ok_or_else(|| Error::Parse(format!("unterminated array on '{name}'")))?;
            count = count_token
                .parse()
                .map_err(|_| Error::Parse(format!("bad array count '{count_token}' on '{name}'")))?;
            if count == 0 {
                return Err(Error::Parse(format!("zero-length array on '{name}'")));
            }
            if tokens.get(i + 2) != Some(&"]") {
                return Err(Error::Parse(format!("unterminated array on '{name}'")));
            }
            kind = format!("{keyword}[{count}]");
            i += 3;
        }

        if tokens.get(i) != Some(&";") {
            return Err(Error::Parse(format!("missing ';' after '{name}'")));
        }
        i += 1;

        slots.push(Slot::new(name, kind, base * count));
    }
    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_simple_block() {
        let slots = parse_block(
            "uniform FrameData { vec4 FrameTime; };",
            None,
        )
        .unwrap();
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0], Slot::new("FrameTime", "vec4", 16));
    }

    #[test]
    fn test_keyword_sizes() {
        let slots = parse_block(
            "uniform Mixed {
                float a;
                int b;
                vec2 c;
                vec3 d;
                vec4 e;
                mat4 f;
            };",
            None,
        )
        .unwrap();
        let sizes: Vec<usize> = slots.iter().map(|s| s.size_bytes).collect();
        assert_eq!(sizes, [4, 4, 8, 16, 16, 64]);
    }

    #[test]
    fn test_ignores_comments() {
        let slots = parse_block(
            "// header comment
            layout(std140) uniform CameraData {
                vec4 Position; // world position
                /* the combined
                   view-projection */
                mat4 ViewProj;
            };",
            None,
        )
        .unwrap();
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[1], Slot::new("ViewProj", "mat4", 64));
    }

    #[test]
    fn test_array_suffix_multiplies() {
        let slots = parse_block(
            "uniform LightData { vec4 Header; vec4 Lights[12]; };",
            None,
        )
        .unwrap();
        assert_eq!(slots[1], Slot::new("Lights", "vec4[12]", 192));
    }

    #[test]
    fn test_tolerates_instance_name() {
        let slots = parse_block(
            "uniform ObjectData { vec4 Identity; vec4 Tint; } object;",
            None,
        )
        .unwrap();
        assert_eq!(slots.len(), 2);
    }

    #[test]
    fn test_selects_block_by_name() {
        let text = "
            uniform First { vec4 A; };
            uniform Second { mat4 B; };
        ";
        let slots = parse_block(text, Some("Second")).unwrap();
        assert_eq!(slots, vec![Slot::new("B", "mat4", 64)]);

        let err = parse_block(text, Some("Third")).unwrap_err();
        assert!(err.to_string().contains("Third"));
    }

    #[test]
    fn test_skips_non_block_uniforms() {
        let slots = parse_block(
            "uniform sampler2D tex;
             uniform FrameData { vec4 FrameTime; };",
            None,
        )
        .unwrap();
        assert_eq!(slots.len(), 1);
    }

    #[test]
    fn test_unknown_keyword_is_parse_error() {
        let err = parse_block("uniform Bad { dvec4 x; };", None).unwrap_err();
        assert!(err.to_string().contains("dvec4"));
    }

    #[test]
    fn test_missing_semicolon_is_parse_error() {
        let err = parse_block("uniform Bad { vec4 x };", None).unwrap_err();
        assert!(err.to_string().contains("missing ';'"));
    }

    #[test]
    fn test_missing_block_is_parse_error() {
        let err = parse_block("void main() {}", None).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_bad_array_count_is_parse_error() {
        let err = parse_block("uniform Bad { vec4 x[abc]; };", None).unwrap_err();
        assert!(err.to_string().contains("abc"));
    }
}

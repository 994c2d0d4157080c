//! Simplified HTML tokenizer for markup fragments.
//!
//! Supported tag-name and attribute-name characters (ASCII only): `[A-Za-z0-9:_-]`.
//! Names are lowercased. Text and quoted attribute values are entity-decoded.
//!
//! Known limitations (intentional):
//! - Not an HTML5 state machine; there is no parse-error recovery beyond skipping.
//! - Rawtext close-tag scanning (`script`, `style`) accepts only ASCII whitespace
//!   before `>`.
use crate::entities::decode_entities;
use crate::types::Token;
use memchr::memchr;

const HTML_COMMENT_START: &str = "<!--";
const HTML_COMMENT_END: &str = "-->";

// Matches only ever start at ASCII `<`, which never appears inside a UTF-8
// continuation byte.
const SCRIPT_CLOSE_TAG: &[u8] = b"</script";
const STYLE_CLOSE_TAG: &[u8] = b"</style";

fn starts_with_ignore_ascii_case_at(haystack: &[u8], start: usize, needle: &[u8]) -> bool {
    haystack.len() >= start + needle.len()
        && haystack[start..start + needle.len()].eq_ignore_ascii_case(needle)
}

fn is_name_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'-' || c == b'_' || c == b':'
}

fn find_rawtext_close_tag(haystack: &str, close_tag: &[u8]) -> Option<(usize, usize)> {
    let hay = haystack.as_bytes();
    let len = hay.len();
    let n = close_tag.len();
    let mut i = 0;
    while i + n <= len {
        i += memchr(b'<', &hay[i..])?;
        if i + n > len {
            return None;
        }
        if starts_with_ignore_ascii_case_at(hay, i, close_tag) {
            let mut k = i + n;
            while k < len && hay[k].is_ascii_whitespace() {
                k += 1;
            }
            if k < len && hay[k] == b'>' {
                return Some((i, k + 1));
            }
        }
        i += 1;
    }
    None
}

pub(crate) fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

pub(crate) fn is_rawtext_element(name: &str) -> bool {
    name == "script" || name == "style"
}

pub fn tokenize(input: &str) -> Vec<Token> {
    let mut out = Vec::new();
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut i = 0;
    // Slices are only cut at ASCII structural bytes, so every endpoint is a
    // UTF-8 char boundary.
    while i < len {
        if bytes[i] != b'<' {
            let start = i;
            i = memchr(b'<', &bytes[i..]).map_or(len, |rel| i + rel);
            let decoded = decode_entities(&input[start..i]);
            if !decoded.is_empty() {
                out.push(Token::Text(decoded));
            }
            continue;
        }

        if input[i..].starts_with(HTML_COMMENT_START) {
            let body_start = i + HTML_COMMENT_START.len();
            match input[body_start..].find(HTML_COMMENT_END) {
                Some(end) => {
                    out.push(Token::Comment(input[body_start..body_start + end].to_string()));
                    i = body_start + end + HTML_COMMENT_END.len();
                    continue;
                }
                None => {
                    out.push(Token::Comment(input[body_start..].to_string()));
                    break;
                }
            }
        }

        if starts_with_ignore_ascii_case_at(bytes, i, b"<!doctype") {
            let rest = &input[i + 2..];
            let Some(end) = rest.find('>') else {
                break;
            };
            out.push(Token::Doctype(rest[..end].trim().to_string()));
            i += 2 + end + 1;
            continue;
        }

        if i + 1 < len && bytes[i + 1] == b'/' {
            let start = i + 2;
            let mut j = start;
            while j < len && is_name_char(bytes[j]) {
                j += 1;
            }
            let name = input[start..j].to_ascii_lowercase();
            j = memchr(b'>', &bytes[j..]).map_or(len, |rel| j + rel + 1);
            if !name.is_empty() {
                out.push(Token::EndTag(name));
            }
            i = j;
            continue;
        }

        let start = i + 1;
        let mut j = start;
        while j < len && is_name_char(bytes[j]) {
            j += 1;
        }
        if j == start {
            // A lone `<` is text.
            out.push(Token::Text("<".to_string()));
            i += 1;
            continue;
        }
        let name = input[start..j].to_ascii_lowercase();
        let (attributes, self_closing, content_start) = scan_attributes(input, j);
        let self_closing = self_closing || is_void_element(&name);

        if is_rawtext_element(&name) && !self_closing {
            let close_tag = if name == "script" {
                SCRIPT_CLOSE_TAG
            } else {
                STYLE_CLOSE_TAG
            };
            out.push(Token::StartTag {
                name: name.clone(),
                attributes,
                self_closing,
            });
            let body = &input[content_start..];
            match find_rawtext_close_tag(body, close_tag) {
                Some((rel_start, rel_end)) => {
                    if rel_start > 0 {
                        out.push(Token::Text(body[..rel_start].to_string()));
                    }
                    out.push(Token::EndTag(name));
                    i = content_start + rel_end;
                    continue;
                }
                None => {
                    if !body.is_empty() {
                        out.push(Token::Text(body.to_string()));
                    }
                    out.push(Token::EndTag(name));
                    break;
                }
            }
        }

        out.push(Token::StartTag {
            name,
            attributes,
            self_closing,
        });
        i = content_start;
    }
    out
}

type ScannedAttributes = (Vec<(String, Option<String>)>, bool, usize);

fn scan_attributes(input: &str, mut k: usize) -> ScannedAttributes {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut attributes: Vec<(String, Option<String>)> = Vec::new();
    let mut self_closing = false;

    let skip_whitespace = |k: &mut usize| {
        while *k < len && bytes[*k].is_ascii_whitespace() {
            *k += 1;
        }
    };

    loop {
        skip_whitespace(&mut k);
        if k >= len {
            break;
        }
        if bytes[k] == b'>' {
            k += 1;
            break;
        }
        if bytes[k] == b'/' {
            if k + 1 < len && bytes[k + 1] == b'>' {
                self_closing = true;
                k += 2;
                break;
            }
            k += 1;
            continue;
        }
        let name_start = k;
        while k < len && is_name_char(bytes[k]) {
            k += 1;
        }
        if name_start == k {
            k += 1;
            continue;
        }
        let attribute_name = input[name_start..k].to_ascii_lowercase();

        skip_whitespace(&mut k);
        let value = if k < len && bytes[k] == b'=' {
            k += 1;
            skip_whitespace(&mut k);
            if k < len && (bytes[k] == b'"' || bytes[k] == b'\'') {
                let quote = bytes[k];
                k += 1;
                let vstart = k;
                k = memchr(quote, &bytes[k..]).map_or(len, |rel| k + rel);
                let raw = &input[vstart..k];
                if k < len {
                    k += 1;
                }
                Some(decode_entities(raw))
            } else {
                let vstart = k;
                while k < len && !bytes[k].is_ascii_whitespace() && bytes[k] != b'>' {
                    if bytes[k] == b'/' && k + 1 < len && bytes[k + 1] == b'>' {
                        break;
                    }
                    k += 1;
                }
                Some(decode_entities(&input[vstart..k]))
            }
        } else {
            None
        };
        // First occurrence wins, as in the HTML spec.
        if !attributes.iter().any(|(n, _)| *n == attribute_name) {
            attributes.push((attribute_name, value));
        }
    }
    (attributes, self_closing, k)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start(name: &str, attributes: &[(&str, Option<&str>)], self_closing: bool) -> Token {
        Token::StartTag {
            name: name.to_string(),
            attributes: attributes
                .iter()
                .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
                .collect(),
            self_closing,
        }
    }

    #[test]
    fn tokenize_element_with_attributes() {
        let tokens = tokenize(r#"<span class="thing" data-hook='hello other'>hi</span>"#);
        assert_eq!(
            tokens,
            vec![
                start(
                    "span",
                    &[("class", Some("thing")), ("data-hook", Some("hello other"))],
                    false
                ),
                Token::Text("hi".to_string()),
                Token::EndTag("span".to_string()),
            ]
        );
    }

    #[test]
    fn tokenize_lowercases_names_and_keeps_valueless_attributes() {
        let tokens = tokenize("<INPUT Type=checkbox Checked>");
        assert_eq!(
            tokens,
            vec![start("input", &[("type", Some("checkbox")), ("checked", None)], true)]
        );
    }

    #[test]
    fn tokenize_void_and_self_closing_elements() {
        let tokens = tokenize("<br><div/>");
        assert_eq!(tokens, vec![start("br", &[], true), start("div", &[], true)]);
    }

    #[test]
    fn tokenize_comments_and_doctype() {
        let tokens = tokenize("<!DOCTYPE html><!-- note --><p></p>");
        assert_eq!(
            tokens,
            vec![
                Token::Doctype("DOCTYPE html".to_string()),
                Token::Comment(" note ".to_string()),
                start("p", &[], false),
                Token::EndTag("p".to_string()),
            ]
        );
    }

    #[test]
    fn tokenize_rawtext_is_not_parsed() {
        let tokens = tokenize("<script>if (a < b) {}</SCRIPT >after");
        assert_eq!(
            tokens,
            vec![
                start("script", &[], false),
                Token::Text("if (a < b) {}".to_string()),
                Token::EndTag("script".to_string()),
                Token::Text("after".to_string()),
            ]
        );
    }

    #[test]
    fn tokenize_decodes_entities_in_text_and_values() {
        let tokens = tokenize(r#"<a title="a &amp; b">x &lt; y</a>"#);
        assert_eq!(tokens[0], start("a", &[("title", Some("a & b"))], false));
        assert_eq!(tokens[1], Token::Text("x < y".to_string()));
    }

    #[test]
    fn tokenize_handles_utf8_around_tags() {
        let tokens = tokenize("é<b>ü</b>ß");
        assert_eq!(tokens[0], Token::Text("é".to_string()));
        assert_eq!(tokens[2], Token::Text("ü".to_string()));
        assert_eq!(tokens[4], Token::Text("ß".to_string()));
    }

    #[test]
    fn tokenize_lone_angle_bracket_is_text() {
        let tokens = tokenize("1 < 2");
        let text: String = tokens
            .iter()
            .map(|t| match t {
                Token::Text(s) => s.as_str(),
                _ => "",
            })
            .collect();
        assert_eq!(text, "1 < 2");
    }
}

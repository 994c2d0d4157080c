/// Decode the small set of entities markup fragments use in practice.
///
/// Named entities: `&amp;`, `&lt;`, `&gt;`, `&quot;`, `&apos;`, `&nbsp;`.
/// Numeric entities decode only when semicolon-terminated and a valid scalar
/// (`&#123;`, `&#x1F4A9;`). Anything else passes through unchanged.
pub(crate) fn decode_entities(s: &str) -> String {
    if memchr::memchr(b'&', s.as_bytes()).is_none() {
        return s.to_string();
    }

    const NAMED: [(&str, char); 6] = [
        ("&amp;", '&'),
        ("&lt;", '<'),
        ("&gt;", '>'),
        ("&quot;", '"'),
        ("&apos;", '\''),
        ("&nbsp;", '\u{00A0}'),
    ];
    const MAX_DIGITS: usize = 7; // 1114111

    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    let mut copy_start = 0;

    'scan: while i < bytes.len() {
        if bytes[i] != b'&' {
            i += 1;
            continue;
        }
        out.push_str(&s[copy_start..i]);

        for (name, ch) in NAMED {
            if bytes[i..].starts_with(name.as_bytes()) {
                out.push(ch);
                i += name.len();
                copy_start = i;
                continue 'scan;
            }
        }

        if let Some((ch, len)) = decode_numeric(&s[i..], MAX_DIGITS) {
            out.push(ch);
            i += len;
            copy_start = i;
            continue;
        }

        out.push('&');
        i += 1;
        copy_start = i;
    }
    out.push_str(&s[copy_start..]);
    out
}

// Returns the decoded char and the byte length of the entity.
fn decode_numeric(s: &str, max_digits: usize) -> Option<(char, usize)> {
    let rest = s.strip_prefix("&#")?;
    let (digits_start, radix) = match rest.as_bytes().first()? {
        b'x' | b'X' => (3, 16),
        _ => (2, 10),
    };
    let body = &s[digits_start..];
    let end = body.find(';')?;
    if end == 0 || end > max_digits {
        return None;
    }
    let digits = &body[..end];
    let ok = digits.bytes().all(|b| {
        if radix == 16 {
            b.is_ascii_hexdigit()
        } else {
            b.is_ascii_digit()
        }
    });
    if !ok {
        return None;
    }
    let ch = u32::from_str_radix(digits, radix).ok().and_then(char::from_u32)?;
    Some((ch, digits_start + end + 1))
}

pub(crate) fn escape_text(s: &str, out: &mut String) {
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{00A0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
}

pub(crate) fn escape_attribute(s: &str, out: &mut String) {
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{00A0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
}

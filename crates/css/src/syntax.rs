// A single CSS property: "color: red"
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub value: String,
}

// input: "color: red; font-size: 12px;"
// output: vec![Declaration { name: "color", value: "red" }, Declaration { name: "font-size", value: "12px" }]
pub fn parse_declarations(input: &str) -> Vec<Declaration> {
    input
        .split(';')
        .filter_map(|pair| {
            let (n, v) = pair.split_once(':')?;
            let name = n.trim().to_ascii_lowercase();
            if name.is_empty() {
                return None;
            }
            let value = v.trim().to_string();
            Some(Declaration { name, value })
        })
        .collect()
}

// input: [display: none, color: red]
// output: "display: none; color: red;"
pub fn serialize_declarations(declarations: &[Declaration]) -> String {
    declarations
        .iter()
        .map(|d| format!("{}: {};", d.name, d.value))
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributeOp {
    Equals,     // [a=v]
    Includes,   // [a~=v]
    DashMatch,  // [a|=v]
    Prefix,     // [a^=v]
    Suffix,     // [a$=v]
    Substring,  // [a*=v]
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    Universal,
    Type(String),  // element/tag selector
    Id(String),    // #id selector
    Class(String), // .class selector
    Attribute {
        name: String,
        matcher: Option<(AttributeOp, String)>,
    },
}

/// Simple selectors that must all match the same element: `div.a#b[x]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Compound(pub Vec<Selector>);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combinator {
    Descendant, // "a b"
    Child,      // "a > b"
}

/// `compounds[i]` and `compounds[i + 1]` are joined by `combinators[i]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComplexSelector {
    pub compounds: Vec<Compound>,
    pub combinators: Vec<Combinator>,
}

/// Comma-separated selector group; an element matches if any member matches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorList(pub Vec<ComplexSelector>);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectorError {
    Empty,
    Unexpected { position: usize, found: char },
    UnexpectedEnd,
}

impl std::fmt::Display for SelectorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectorError::Empty => write!(f, "empty selector"),
            SelectorError::Unexpected { position, found } => {
                write!(f, "unexpected {found:?} at offset {position}")
            }
            SelectorError::UnexpectedEnd => write!(f, "unexpected end of selector"),
        }
    }
}

impl std::error::Error for SelectorError {}

// input: "div, .a > #b, [data-hook~=\"x\"]"
// output: SelectorList with three complex selectors
pub fn parse_selector_list(input: &str) -> Result<SelectorList, SelectorError> {
    let mut parser = Parser { input, pos: 0 };
    let mut out = Vec::new();
    loop {
        parser.skip_whitespace();
        if parser.at_end() {
            return Err(if out.is_empty() {
                SelectorError::Empty
            } else {
                SelectorError::UnexpectedEnd
            });
        }
        out.push(parser.complex()?);
        parser.skip_whitespace();
        match parser.peek() {
            None => break,
            Some(',') => parser.pos += 1,
            Some(found) => {
                return Err(SelectorError::Unexpected {
                    position: parser.pos,
                    found,
                });
            }
        }
    }
    Ok(SelectorList(out))
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn unexpected(&self) -> SelectorError {
        match self.peek() {
            Some(found) => SelectorError::Unexpected {
                position: self.pos,
                found,
            },
            None => SelectorError::UnexpectedEnd,
        }
    }

    fn expect(&mut self, want: char) -> Result<(), SelectorError> {
        if self.peek() == Some(want) {
            self.pos += want.len_utf8();
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn ident(&mut self) -> Result<String, SelectorError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii() {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
        if self.pos == start {
            return Err(self.unexpected());
        }
        Ok(self.input[start..self.pos].to_string())
    }

    fn complex(&mut self) -> Result<ComplexSelector, SelectorError> {
        let mut compounds = vec![self.compound()?];
        let mut combinators = Vec::new();
        loop {
            let had_whitespace = self.skip_whitespace();
            let combinator = match self.peek() {
                None | Some(',') => break,
                Some('>') => {
                    self.pos += 1;
                    self.skip_whitespace();
                    Combinator::Child
                }
                Some(_) if had_whitespace => Combinator::Descendant,
                Some(_) => return Err(self.unexpected()),
            };
            combinators.push(combinator);
            compounds.push(self.compound()?);
        }
        Ok(ComplexSelector {
            compounds,
            combinators,
        })
    }

    fn compound(&mut self) -> Result<Compound, SelectorError> {
        let mut parts = Vec::new();
        loop {
            match self.peek() {
                Some('*') if parts.is_empty() => {
                    self.pos += 1;
                    parts.push(Selector::Universal);
                }
                Some('#') => {
                    self.pos += 1;
                    parts.push(Selector::Id(self.ident()?));
                }
                Some('.') => {
                    self.pos += 1;
                    parts.push(Selector::Class(self.ident()?));
                }
                Some('[') => {
                    self.pos += 1;
                    parts.push(self.attribute()?);
                }
                Some(c) if parts.is_empty() && (c.is_ascii_alphabetic() || !c.is_ascii()) => {
                    parts.push(Selector::Type(self.ident()?.to_ascii_lowercase()));
                }
                _ => break,
            }
        }
        if parts.is_empty() {
            return Err(self.unexpected());
        }
        Ok(Compound(parts))
    }

    // Called after the opening `[`.
    fn attribute(&mut self) -> Result<Selector, SelectorError> {
        self.skip_whitespace();
        let name = self.ident()?.to_ascii_lowercase();
        self.skip_whitespace();
        if self.peek() == Some(']') {
            self.pos += 1;
            return Ok(Selector::Attribute {
                name,
                matcher: None,
            });
        }
        let op = match self.peek() {
            Some('=') => AttributeOp::Equals,
            Some('~') => AttributeOp::Includes,
            Some('|') => AttributeOp::DashMatch,
            Some('^') => AttributeOp::Prefix,
            Some('$') => AttributeOp::Suffix,
            Some('*') => AttributeOp::Substring,
            _ => return Err(self.unexpected()),
        };
        self.pos += 1;
        if op != AttributeOp::Equals {
            self.expect('=')?;
        }
        self.skip_whitespace();
        let value = match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                let rest = &self.input[self.pos..];
                let end = rest.find(quote).ok_or(SelectorError::UnexpectedEnd)?;
                let value = rest[..end].to_string();
                self.pos += end + 1;
                value
            }
            _ => self.ident()?,
        };
        self.skip_whitespace();
        self.expect(']')?;
        Ok(Selector::Attribute {
            name,
            matcher: Some((op, value)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compound(parts: Vec<Selector>) -> ComplexSelector {
        ComplexSelector {
            compounds: vec![Compound(parts)],
            combinators: Vec::new(),
        }
    }

    #[test]
    fn parses_declarations() {
        let decls = parse_declarations("Display: none; ; color:red");
        assert_eq!(
            decls,
            vec![
                Declaration {
                    name: "display".into(),
                    value: "none".into()
                },
                Declaration {
                    name: "color".into(),
                    value: "red".into()
                },
            ]
        );
        assert_eq!(serialize_declarations(&decls), "display: none; color: red;");
    }

    #[test]
    fn parses_comma_groups() {
        let list = parse_selector_list(".thing, .another-thing").expect("valid selector");
        assert_eq!(
            list,
            SelectorList(vec![
                compound(vec![Selector::Class("thing".into())]),
                compound(vec![Selector::Class("another-thing".into())]),
            ])
        );
    }

    #[test]
    fn parses_compound_selector() {
        let list = parse_selector_list("DIV#main.a.b[hidden]").expect("valid selector");
        assert_eq!(
            list.0[0],
            compound(vec![
                Selector::Type("div".into()),
                Selector::Id("main".into()),
                Selector::Class("a".into()),
                Selector::Class("b".into()),
                Selector::Attribute {
                    name: "hidden".into(),
                    matcher: None
                },
            ])
        );
    }

    #[test]
    fn parses_attribute_operators() {
        let list = parse_selector_list(r#"[data-hook~="hello"], [a^=x], [b $= 'y z']"#)
            .expect("valid selector");
        let matchers: Vec<_> = list
            .0
            .iter()
            .map(|c| match &c.compounds[0].0[0] {
                Selector::Attribute { matcher, .. } => matcher.clone(),
                other => panic!("expected attribute selector, got {other:?}"),
            })
            .collect();
        assert_eq!(
            matchers,
            vec![
                Some((AttributeOp::Includes, "hello".into())),
                Some((AttributeOp::Prefix, "x".into())),
                Some((AttributeOp::Suffix, "y z".into())),
            ]
        );
    }

    #[test]
    fn parses_combinators() {
        let list = parse_selector_list("ul > li .x").expect("valid selector");
        let complex = &list.0[0];
        assert_eq!(complex.compounds.len(), 3);
        assert_eq!(
            complex.combinators,
            vec![Combinator::Child, Combinator::Descendant]
        );
    }

    #[test]
    fn rejects_malformed_selectors() {
        assert_eq!(parse_selector_list(""), Err(SelectorError::Empty));
        assert_eq!(parse_selector_list("  "), Err(SelectorError::Empty));
        assert_eq!(parse_selector_list(".a,"), Err(SelectorError::UnexpectedEnd));
        assert!(matches!(
            parse_selector_list("a!b"),
            Err(SelectorError::Unexpected { found: '!', .. })
        ));
        assert!(parse_selector_list("[x=\"open").is_err());
        assert!(parse_selector_list(".").is_err());
    }
}

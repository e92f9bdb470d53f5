//! Quote-aware tokenizing of structured header values.
//!
//! Accept-family headers, `Forwarded` and most parameterized headers share one
//! grammar: a list of elements separated by `,`, each element a `;`-separated
//! list of parameters, each parameter a `name=value` pair whose value may be a
//! quoted string. Inside a quoted string, separators lose their meaning and
//! `\` escapes the next character.
//!
//! The helpers here are deliberately grammar-agnostic: they split on whatever
//! separators the caller names and know nothing about `q` values or IP
//! addresses.
//!
//! # Example
//!
//! ```
//! use headwise_core::header_utils::{combine, split};
//!
//! let parts = split(r#"text/html; level=1; note="a;b""#, ";=");
//! assert_eq!(parts[0], vec!["text/html"]);
//!
//! let params = combine(&parts[1..]);
//! assert_eq!(params[0], ("level".to_string(), "1".to_string()));
//! assert_eq!(params[1], ("note".to_string(), "a;b".to_string()));
//! ```

/// A token produced by [`tokenize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Text between separators, with surrounding unquoted whitespace trimmed and
    /// quoted sections unescaped.
    Text(String),
    /// One of the separator characters requested by the caller.
    Separator(char),
}

/// Splits `input` into text and separator tokens, honouring quoted strings.
///
/// Empty runs between two separators produce no `Text` token. An unterminated
/// quoted string extends to the end of the input.
///
/// # Example
///
/// ```
/// use headwise_core::header_utils::{tokenize, Token};
///
/// let tokens = tokenize(r#"a = "x,y" , b"#, ",=");
/// assert_eq!(
///     tokens,
///     vec![
///         Token::Text("a".into()),
///         Token::Separator('='),
///         Token::Text("x,y".into()),
///         Token::Separator(','),
///         Token::Text("b".into()),
///     ]
/// );
/// ```
pub fn tokenize(input: &str, separators: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut text = TextBuffer::default();
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        if c == '"' {
            text.open_quote();
            while let Some(quoted) = chars.next() {
                match quoted {
                    '\\' => {
                        if let Some(escaped) = chars.next() {
                            text.push_quoted(escaped);
                        }
                    }
                    '"' => break,
                    other => text.push_quoted(other),
                }
            }
        } else if separators.contains(c) {
            text.flush_into(&mut tokens);
            tokens.push(Token::Separator(c));
        } else if c.is_whitespace() {
            text.push_space(c);
        } else {
            text.push(c);
        }
    }

    text.flush_into(&mut tokens);
    tokens
}

/// Accumulates one text token, holding back unquoted whitespace until more
/// content follows so trailing blanks are trimmed.
#[derive(Default)]
struct TextBuffer {
    text: String,
    pending_space: String,
    started: bool,
}

impl TextBuffer {
    fn push(&mut self, c: char) {
        self.commit_space();
        self.text.push(c);
        self.started = true;
    }

    fn push_space(&mut self, c: char) {
        if self.started {
            self.pending_space.push(c);
        }
    }

    fn open_quote(&mut self) {
        self.commit_space();
        self.started = true;
    }

    fn push_quoted(&mut self, c: char) {
        self.text.push(c);
    }

    fn commit_space(&mut self) {
        self.text.push_str(&self.pending_space);
        self.pending_space.clear();
    }

    fn flush_into(&mut self, tokens: &mut Vec<Token>) {
        if self.started {
            tokens.push(Token::Text(std::mem::take(&mut self.text)));
        }
        self.pending_space.clear();
        self.started = false;
    }
}

/// Splits `input` into groups of strings.
///
/// The first separator delimits groups, the remaining separators delimit
/// strings within a group. Groups keep their position: `n` occurrences of the
/// first separator always yield `n + 1` groups, some possibly empty. A group
/// whose inner separators are not followed by text is padded with empty
/// strings, so `"level="` becomes `["level", ""]`.
///
/// # Example
///
/// ```
/// use headwise_core::header_utils::split;
///
/// let parts = split("text/html;q=0.8;level=1", ";=");
/// assert_eq!(
///     parts,
///     vec![vec!["text/html"], vec!["q", "0.8"], vec!["level", "1"]]
/// );
/// ```
pub fn split(input: &str, separators: &str) -> Vec<Vec<String>> {
    let Some(outer) = separators.chars().next() else {
        let text: Vec<String> = tokenize(input, "")
            .into_iter()
            .filter_map(|token| match token {
                Token::Text(text) => Some(text),
                Token::Separator(_) => None,
            })
            .collect();
        return vec![text];
    };

    let mut groups = Vec::new();
    let mut group = Vec::new();
    let mut inner_separators = 0;

    for token in tokenize(input, separators) {
        match token {
            Token::Separator(c) if c == outer => {
                close_group(&mut groups, &mut group, &mut inner_separators);
            }
            Token::Separator(_) => {
                if group.is_empty() {
                    group.push(String::new());
                }
                inner_separators += 1;
            }
            Token::Text(text) => group.push(text),
        }
    }

    close_group(&mut groups, &mut group, &mut inner_separators);
    groups
}

fn close_group(groups: &mut Vec<Vec<String>>, group: &mut Vec<String>, inner_separators: &mut usize) {
    if !group.is_empty() {
        while group.len() <= *inner_separators {
            group.push(String::new());
        }
    }
    groups.push(std::mem::take(group));
    *inner_separators = 0;
}

/// Splits `input` on `separator` outside quoted strings, returning the raw
/// slices untouched (quotes and whitespace preserved).
///
/// Always returns one more slice than there are top-level separators.
///
/// # Example
///
/// ```
/// use headwise_core::header_utils::split_unquoted;
///
/// let segments = split_unquoted(r#"a;x="1,2", b"#, ',');
/// assert_eq!(segments, vec![r#"a;x="1,2""#, " b"]);
/// ```
pub fn split_unquoted(input: &str, separator: char) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut escaped = false;

    for (pos, c) in input.char_indices() {
        if in_quotes {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_quotes = false;
            }
        } else if c == '"' {
            in_quotes = true;
        } else if c == separator {
            segments.push(&input[start..pos]);
            start = pos + c.len_utf8();
        }
    }

    segments.push(&input[start..]);
    segments
}

/// Combines `[name, value]` groups into ordered pairs.
///
/// Names are lowercased. A group without a value (a bare token such as
/// `secure`) gets an empty value. Groups whose name is not an HTTP token
/// (empty, or quoted text with separators) are dropped. A repeated name keeps
/// its first position and takes the last value.
pub fn combine(parts: &[Vec<String>]) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = Vec::new();

    for part in parts {
        let Some(name) = part.first() else {
            continue;
        };
        if !is_token(name) {
            continue;
        }

        let name = name.to_lowercase();
        let value = part.get(1).cloned().unwrap_or_default();

        match pairs.iter_mut().find(|(existing, _)| *existing == name) {
            Some(pair) => pair.1 = value,
            None => pairs.push((name, value)),
        }
    }

    pairs
}

/// Returns true if every character of `value` is an RFC 7230 `tchar`.
pub fn is_token(value: &str) -> bool {
    !value.is_empty()
        && value.chars().all(|c| {
            c.is_ascii_alphanumeric()
                || matches!(
                    c,
                    '!' | '#' | '$' | '%' | '&' | '\'' | '*' | '+' | '-' | '.' | '^' | '_' | '`'
                        | '|' | '~'
                )
        })
}

/// Renders `value` as a token when possible, otherwise as a quoted string with
/// `"` and `\` escaped.
///
/// # Example
///
/// ```
/// use headwise_core::header_utils::quote;
///
/// assert_eq!(quote("utf-8"), "utf-8");
/// assert_eq!(quote("a b"), "\"a b\"");
/// assert_eq!(quote(r#"say "hi""#), r#""say \"hi\"""#);
/// ```
pub fn quote(value: &str) -> String {
    if is_token(value) {
        return value.to_string();
    }

    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Renders pairs as `name=value` joined by `separator`; an empty value renders
/// as the bare name.
pub fn to_header_string(pairs: &[(String, String)], separator: &str) -> String {
    pairs
        .iter()
        .map(|(name, value)| {
            if value.is_empty() {
                name.clone()
            } else {
                format!("{name}={}", quote(value))
            }
        })
        .collect::<Vec<_>>()
        .join(separator)
}

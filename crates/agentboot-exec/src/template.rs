//! Connection templates and shell-style word splitting

use std::fmt;

use crate::error::TemplateError;

/// Externally supplied prefix command used to reach a remote shell
///
/// For example `ssh -T -i key.pem admin@10.0.0.5`. An empty template runs
/// the shell locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionTemplate {
    raw: String,
    words: Vec<String>,
}

impl ConnectionTemplate {
    /// Parse a template
    ///
    /// # Errors
    /// Returns `TemplateError` on unbalanced quotes or a trailing backslash
    pub fn parse(raw: impl Into<String>) -> Result<Self, TemplateError> {
        let raw = raw.into();
        let words = split_words(&raw)?;
        Ok(Self { raw, words })
    }

    /// The template exactly as supplied
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The template split into argv words
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Full argv: template words followed by `tail` words
    #[must_use]
    pub fn argv_with(&self, tail: &[String]) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.words.len() + tail.len());
        argv.extend(self.words.iter().cloned());
        argv.extend(tail.iter().cloned());
        argv
    }
}

impl fmt::Display for ConnectionTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Quote {
    None,
    Single,
    Double,
}

/// Split a command line into words using POSIX shell quoting rules
///
/// Whitespace separates words unless quoted. Single quotes inhibit all
/// escaping. Outside quotes a backslash escapes the next character; inside
/// double quotes it only escapes `"`, `\`, `$`, `` ` `` and newline.
///
/// # Errors
/// Returns `TemplateError` on unbalanced quotes or a trailing backslash
pub fn split_words(input: &str) -> Result<Vec<String>, TemplateError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote = Quote::None;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match quote {
            Quote::Single => {
                if c == '\'' {
                    quote = Quote::None;
                } else {
                    current.push(c);
                }
            }
            Quote::Double => match c {
                '"' => quote = Quote::None,
                '\\' => match chars.next() {
                    Some(next @ ('"' | '\\' | '$' | '`')) => current.push(next),
                    Some('\n') => {}
                    Some(next) => {
                        current.push('\\');
                        current.push(next);
                    }
                    None => return Err(TemplateError::TrailingEscape(input.to_string())),
                },
                _ => current.push(c),
            },
            Quote::None => match c {
                '\'' => {
                    quote = Quote::Single;
                    in_word = true;
                }
                '"' => {
                    quote = Quote::Double;
                    in_word = true;
                }
                '\\' => match chars.next() {
                    Some('\n') => {}
                    Some(next) => {
                        current.push(next);
                        in_word = true;
                    }
                    None => return Err(TemplateError::TrailingEscape(input.to_string())),
                },
                c if c.is_whitespace() => {
                    if in_word {
                        words.push(std::mem::take(&mut current));
                        in_word = false;
                    }
                }
                _ => {
                    current.push(c);
                    in_word = true;
                }
            },
        }
    }

    match quote {
        Quote::Single => Err(TemplateError::UnterminatedQuote {
            quote: '\'',
            template: input.to_string(),
        }),
        Quote::Double => Err(TemplateError::UnterminatedQuote {
            quote: '"',
            template: input.to_string(),
        }),
        Quote::None => {
            if in_word {
                words.push(current);
            }
            Ok(words)
        }
    }
}

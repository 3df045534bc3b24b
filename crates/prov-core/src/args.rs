//! Structured view of a `key=value` module argument string
//!
//! Only `src` and `dest` are interpreted here. Every other token is kept as
//! an opaque pass-through fragment, and the original string is what gets
//! forwarded to the delegated operation.

use crate::transport::shell_quote;
use crate::{Error, Result};
use prov_fs::NormalizedPath;

/// Parsed module arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleArgs {
    /// Source path expression, before templating
    pub src: Option<String>,
    /// Destination path on the managed host
    pub dest: Option<String>,
    passthrough: Vec<String>,
    raw: String,
}

impl ModuleArgs {
    /// Parse a whitespace-separated `key=value` string.
    ///
    /// Values may be wrapped in single or double quotes to contain
    /// whitespace. A key given twice keeps its last value, and an empty
    /// value counts as absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArgumentSyntax`] for an unterminated quote or a
    /// dangling escape.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut args = Self {
            raw: raw.to_string(),
            ..Self::default()
        };

        for token in split_tokens(raw)? {
            match token.split_once('=') {
                Some(("src", value)) => args.src = non_empty(value),
                Some(("dest", value)) => args.dest = non_empty(value),
                _ => args.passthrough.push(token),
            }
        }

        Ok(args)
    }

    /// The argument string exactly as it was given.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Tokens other than `src` and `dest`, in their original order.
    pub fn passthrough(&self) -> &[String] {
        &self.passthrough
    }

    /// Compose the argument string for a delegated operation.
    ///
    /// The staged path is appended as a second `src`, which overrides the
    /// original one for the receiving parser. It is quoted whenever it
    /// contains characters the tokenizer would split on.
    pub fn with_src(&self, staged: &NormalizedPath) -> String {
        format!("{} src={}", self.raw, shell_quote(staged.as_str()))
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn split_tokens(raw: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        match quote {
            Some(q) if c == q => quote = None,
            Some('"') if c == '\\' => match chars.next() {
                Some(escaped) => current.push(escaped),
                None => return Err(dangling_escape()),
            },
            Some(_) => current.push(c),
            None if c == '\'' || c == '"' => {
                quote = Some(c);
                in_token = true;
            }
            None if c == '\\' => {
                match chars.next() {
                    Some(escaped) => current.push(escaped),
                    None => return Err(dangling_escape()),
                }
                in_token = true;
            }
            None if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(Error::ArgumentSyntax {
            message: format!("unterminated {q} quote"),
        });
    }
    if in_token {
        tokens.push(current);
    }

    Ok(tokens)
}

fn dangling_escape() -> Error {
    Error::ArgumentSyntax {
        message: "trailing backslash".to_string(),
    }
}

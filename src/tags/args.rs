//! Tag-body argument grammar.
//!
//! Parses the text between `{%` and `%}` for both placeholder tags:
//!
//! | Tag body | Parsed as |
//! |---|---|
//! | `appcms_placeholder "<name>" [<width>]` | [`PlaceholderTag`] |
//! | `get_placeholder <name-or-var> [extra...] [<width>] as <varname>` | [`GetPlaceholderTag`] |
//!
//! Quoted tokens may contain spaces. A `{% endplaceholder %}` closing tag, if
//! the host template engine delivers one, encloses a block this crate does
//! not process.

use thiserror::Error;

use crate::context::RenderContext;

/// Errors raised while parsing a tag body.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TagSyntaxError {
    #[error("empty tag body")]
    Empty,

    #[error("expected tag `{expected}`, found `{found}`")]
    WrongTag {
        expected: &'static str,
        found: String,
    },

    #[error("missing placeholder name argument")]
    MissingName,

    #[error("missing `as <varname>` clause")]
    MissingVarname,

    #[error("invalid width `{0}` — expected an integer")]
    InvalidWidth(String),

    #[error("unexpected argument `{0}`")]
    UnexpectedArgument(String),

    #[error("unterminated quoted string")]
    UnterminatedQuote,
}

/// A tag argument naming the placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameArg {
    /// A quoted literal in the tag source; surrounding quotes are stripped.
    Literal(String),
    /// A reference to a template variable, resolved against the render
    /// context's bindings when the tag runs.
    Variable(String),
}

impl NameArg {
    /// Classifies a raw token: quoted → literal, bare → variable reference.
    pub fn from_token(token: &str) -> Self {
        for quote in ['"', '\''] {
            if token.len() >= 2 && token.starts_with(quote) && token.ends_with(quote) {
                return Self::Literal(token[1..token.len() - 1].to_owned());
            }
        }
        Self::Variable(token.to_owned())
    }

    /// Resolves the placeholder name against the render context.
    ///
    /// Literals resolve to themselves; variables resolve to the current value
    /// of the named binding, `None` when unbound.
    pub fn resolve(&self, ctx: &RenderContext) -> Option<String> {
        match self {
            Self::Literal(value) => Some(value.clone()),
            Self::Variable(var) => ctx.bindings().get(var).map(|v| v.as_str().to_owned()),
        }
    }

    /// The token as written in the tag source, without quote classification.
    pub fn raw(&self) -> &str {
        match self {
            Self::Literal(value) | Self::Variable(value) => value,
        }
    }
}

/// Parsed body of `{% appcms_placeholder "<name>" [<width>] %}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderTag {
    pub name: NameArg,
    pub width: Option<u32>,
}

/// Parsed body of
/// `{% get_placeholder <name-or-var> [extra...] [<width>] as <varname> %}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetPlaceholderTag {
    pub name: NameArg,
    /// Extra positional bits the grammar accepts; carried but not interpreted.
    pub extra: Vec<String>,
    /// Width hint accepted for grammar compatibility; the render path ignores
    /// it.
    pub width: Option<u32>,
    /// Template variable that receives the rendered fragment.
    pub varname: String,
}

/// Parses the body of the inline render tag.
///
/// # Errors
///
/// [`TagSyntaxError`] when the body is empty, names a different tag, lacks a
/// name argument, or carries a malformed width or trailing arguments.
pub fn parse_placeholder(body: &str) -> Result<PlaceholderTag, TagSyntaxError> {
    let tokens = split_args(body)?;
    let mut tokens = tokens.into_iter();

    expect_tag(tokens.next(), "appcms_placeholder")?;
    let name = NameArg::from_token(&tokens.next().ok_or(TagSyntaxError::MissingName)?);
    let width = tokens.next().map(|t| parse_width(&t)).transpose()?;

    if let Some(extra) = tokens.next() {
        return Err(TagSyntaxError::UnexpectedArgument(extra));
    }
    Ok(PlaceholderTag { name, width })
}

/// Parses the body of the render-to-variable tag.
///
/// Tokens between the name and the `as` keyword are extra positional bits;
/// when the last of them is an integer it is taken as the width hint.
///
/// # Errors
///
/// [`TagSyntaxError`] when the body is empty, names a different tag, lacks a
/// name, or has no well-formed `as <varname>` clause.
pub fn parse_get_placeholder(body: &str) -> Result<GetPlaceholderTag, TagSyntaxError> {
    let tokens = split_args(body)?;
    let mut tokens = tokens.into_iter();

    expect_tag(tokens.next(), "get_placeholder")?;

    let mut positional = Vec::new();
    loop {
        match tokens.next() {
            Some(token) if token == "as" => break,
            Some(token) => positional.push(token),
            None => return Err(TagSyntaxError::MissingVarname),
        }
    }
    let varname = tokens.next().ok_or(TagSyntaxError::MissingVarname)?;
    if let Some(extra) = tokens.next() {
        return Err(TagSyntaxError::UnexpectedArgument(extra));
    }

    let mut positional = positional.into_iter();
    let name = NameArg::from_token(&positional.next().ok_or(TagSyntaxError::MissingName)?);
    let mut extra: Vec<String> = positional.collect();
    let width = extra.last().and_then(|last| last.parse::<u32>().ok());
    if width.is_some() {
        extra.pop();
    }

    Ok(GetPlaceholderTag {
        name,
        extra,
        width,
        varname,
    })
}

fn expect_tag(token: Option<String>, expected: &'static str) -> Result<(), TagSyntaxError> {
    match token {
        Some(found) if found == expected => Ok(()),
        Some(found) => Err(TagSyntaxError::WrongTag { expected, found }),
        None => Err(TagSyntaxError::Empty),
    }
}

fn parse_width(token: &str) -> Result<u32, TagSyntaxError> {
    token
        .parse()
        .map_err(|_| TagSyntaxError::InvalidWidth(token.to_owned()))
}

// Whitespace-separated tokens, except that a token opened by a quote runs to
// the matching close quote and keeps its quotes for later classification.
fn split_args(body: &str) -> Result<Vec<String>, TagSyntaxError> {
    let mut tokens = Vec::new();
    let mut chars = body.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        if c == '"' || c == '\'' {
            chars.next();
            let mut token = String::new();
            token.push(c);
            let mut closed = false;
            for ch in chars.by_ref() {
                if ch == c {
                    closed = true;
                    break;
                }
                token.push(ch);
            }
            if !closed {
                return Err(TagSyntaxError::UnterminatedQuote);
            }
            token.push(c);
            tokens.push(token);
        } else {
            let mut token = String::new();
            while let Some(&ch) = chars.peek() {
                if ch.is_whitespace() {
                    break;
                }
                token.push(ch);
                chars.next();
            }
            tokens.push(token);
        }
    }

    Ok(tokens)
}

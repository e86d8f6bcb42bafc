//! Definition scanner.
//!
//! A template file is a sequence of blocks separated by a blank line. Each
//! block holds exactly one definition:
//!
//! ```text
//! # comments are allowed before the body
//! GREETING:
//!     "hello {name:%s}"
//! ```
//!
//! Each block is scanned by a small state machine over an immutable slice.
//! Every state is a pure function of `(block, position)` returning the next
//! state, the new position, and optionally a token. A block without a name,
//! or a name without a body, fails the whole file.

use std::path::Path;

use crate::definition::Definition;
use crate::error::{GctplError, Result};

const BLOCK_DELIMITER: &str = "\n\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Whitespace,
    Comment,
    Name,
    Body,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Name(&'a str),
    Body(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Step<'a> {
    state: State,
    pos: usize,
    token: Option<Token<'a>>,
}

impl<'a> Step<'a> {
    fn to(state: State, pos: usize) -> Self {
        Self {
            state,
            pos,
            token: None,
        }
    }

    fn emit(state: State, pos: usize, token: Token<'a>) -> Self {
        Self {
            state,
            pos,
            token: Some(token),
        }
    }
}

fn is_blank(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Advance the state machine by one step.
///
/// `named` tells the whitespace state whether non-blank content starts the
/// name or the body.
fn step(state: State, block: &str, pos: usize, named: bool) -> std::result::Result<Step<'_>, &'static str> {
    let bytes = block.as_bytes();
    match state {
        State::Whitespace => match bytes.get(pos) {
            None => Ok(Step::to(State::Done, pos)),
            Some(&b) if is_blank(b) => Ok(Step::to(State::Whitespace, pos + 1)),
            Some(b'#') => Ok(Step::to(State::Comment, pos)),
            Some(_) if named => Ok(Step::to(State::Body, pos)),
            Some(_) => Ok(Step::to(State::Name, pos)),
        },
        State::Comment => match block[pos..].find('\n') {
            Some(offset) => Ok(Step::to(State::Whitespace, pos + offset + 1)),
            None => Ok(Step::to(State::Done, block.len())),
        },
        State::Name => match match_definition_name(&block[pos..]) {
            Some((name, len)) => Ok(Step::emit(State::Whitespace, pos + len, Token::Name(name))),
            None => Err("expected a definition name (`identifier:` followed by whitespace)"),
        },
        State::Body => Ok(Step::emit(State::Done, block.len(), Token::Body(&block[pos..]))),
        State::Done => Ok(Step::to(State::Done, pos)),
    }
}

/// Match `identifier:` followed by at least one blank character.
///
/// The identifier is `[A-Za-z_][A-Za-z0-9_]+`. Returns the name and the
/// length consumed, including the colon and the first blank.
pub fn match_definition_name(input: &str) -> Option<(&str, usize)> {
    let bytes = input.as_bytes();
    if !bytes
        .first()
        .is_some_and(|b| b.is_ascii_alphabetic() || *b == b'_')
    {
        return None;
    }

    let mut pos = 1;
    while bytes
        .get(pos)
        .is_some_and(|b| b.is_ascii_alphanumeric() || *b == b'_')
    {
        pos += 1;
    }
    if pos < 2 {
        return None;
    }

    if bytes.get(pos) != Some(&b':') || !bytes.get(pos + 1).is_some_and(|b| is_blank(*b)) {
        return None;
    }

    Some((&input[..pos], pos + 2))
}

/// Collapse runs of two or more whitespace characters, and every single
/// newline, into one space. Trailing whitespace is dropped.
pub fn collapse_whitespace(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if !c.is_ascii_whitespace() {
            out.push(c);
            continue;
        }

        let mut run = 1;
        while chars.peek().is_some_and(|n| n.is_ascii_whitespace()) {
            chars.next();
            run += 1;
        }

        if run >= 2 || c == '\n' {
            out.push(' ');
        } else {
            out.push(c);
        }
    }

    out.truncate(out.trim_end().len());
    out
}

/// Scan one block into its `(name, raw body)` pair.
///
/// On failure returns the reason and the byte offset where scanning stopped.
fn scan_block(block: &str) -> std::result::Result<(&str, &str), (String, usize)> {
    let mut state = State::Whitespace;
    let mut pos = 0;
    let mut name = None;
    let mut body = None;

    while state != State::Done {
        let next = step(state, block, pos, name.is_some()).map_err(|reason| (reason.to_string(), pos))?;
        match next.token {
            Some(Token::Name(n)) => name = Some(n),
            Some(Token::Body(b)) => body = Some(b),
            None => {}
        }
        state = next.state;
        pos = next.pos;
    }

    match (name, body) {
        (Some(name), Some(body)) => Ok((name, body)),
        (Some(name), None) => Err((format!("definition '{name}' has no body"), pos)),
        (None, _) => Err(("block contains no definition".to_string(), 0)),
    }
}

/// Split raw template text into blocks, paired with their 1-based first line.
///
/// Line endings are expected to be normalised to `\n`. Trailing whitespace at
/// the end of the text does not form a block.
fn blocks(text: &str) -> Vec<(usize, &str)> {
    let text = text.trim_end();
    if text.is_empty() {
        return Vec::new();
    }

    let mut line = 1;
    text.split(BLOCK_DELIMITER)
        .map(|block| {
            let start = line;
            line += block.matches('\n').count() + 2;
            (start, block)
        })
        .collect()
}

/// Parse every definition in one template file, in file order.
///
/// `path` is only used for error reporting.
pub fn scan(path: &Path, text: &str) -> Result<Vec<Definition>> {
    let normalized;
    let text = if text.contains("\r\n") {
        normalized = text.replace("\r\n", "\n");
        normalized.as_str()
    } else {
        text
    };

    let mut definitions = Vec::new();
    for (line, block) in blocks(text) {
        let (name, raw_body) = scan_block(block).map_err(|(reason, offset)| GctplError::TemplateParse {
            path: path.to_path_buf(),
            line: line + block[..offset].matches('\n').count(),
            reason,
        })?;

        let body = collapse_whitespace(raw_body);
        let definition = Definition::new(name, &body)?;
        tracing::debug!(
            "parsed {} '{}' with {} argument(s) from {}",
            definition.kind(),
            definition.name(),
            definition.ordered_arguments().len(),
            path.display()
        );
        definitions.push(definition);
    }

    Ok(definitions)
}

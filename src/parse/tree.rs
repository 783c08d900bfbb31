//! The state machine that turns a token sequence into a [`Tree`].
//!
//! Nested blocks are parsed by recursion. All levels share the token slice and one cursor that
//! only moves forward, except for the one-token rollback after a missing operator. Lookahead (for
//! color literals and for deciding whether a block is a tree or a group) works on the slice
//! without moving the cursor.

use std::mem::take;

use crate::parse::color::{colorspace, match_color};
use crate::parse::primitive::make_primitive;
use crate::parse::ParseError;
use crate::report::{err, tips, warn, ErrorKey, ReportSink};
use crate::token::{Token, TokenKind};
use crate::tree::{Entry, Operator, Primitive, Tree, Value};

/// Some files from older games start with this token, which is not part of the content.
const HEADER_TOKEN: &str = "EU4txt";

/// Blocks nested deeper than this fail the file. Each level is a recursion, and this keeps the
/// stack use well inside what a rayon worker thread has.
pub const MAX_DEPTH: usize = 256;

#[derive(Clone, Copy, Debug)]
enum State<'t> {
    ProcessKey,
    ProcessOperator { key: &'t Token },
    ProcessValue { key: &'t Token, operator: Operator },
    ProcessGroup { key: &'t Token, operator: Operator, brace: &'t Token },
    Done,
}

/// The `key = {` that opened a nested level.
#[derive(Clone, Copy, Debug)]
struct Opener<'t> {
    key: &'t Token,
    brace: &'t Token,
}

/// The tree under construction at one level of nesting.
struct ParseLevel<'t> {
    tree: Tree,
    pending_comments: Vec<String>,
    state: State<'t>,
}

impl ParseLevel<'_> {
    fn new() -> Self {
        ParseLevel { tree: Tree::new(), pending_comments: Vec::new(), state: State::ProcessKey }
    }

    fn append(&mut self, key: &Token, operator: Operator, value: Value, in_group: bool) {
        let mut entry = Entry::new(make_key(key), operator, value);
        entry.in_group = in_group;
        entry.pre_comments = take(&mut self.pending_comments);
        entry.loc = Some(key.loc.clone());
        self.tree.push(entry);
    }

    /// Sets the last entry's line comment, or adds to its post comments if it already has one.
    /// With no entry yet, the comment waits for the first one.
    fn append_line_comment(&mut self, comment: String) {
        match self.tree.last_entry_mut() {
            Some(entry) if entry.line_comment.is_none() => entry.line_comment = Some(comment),
            Some(entry) => entry.post_comments.push(comment),
            None => self.pending_comments.push(comment),
        }
    }

    /// Comments still pending at the end of the level go to the last entry, if there is one.
    fn flush_post_comments(&mut self) {
        let pending = take(&mut self.pending_comments);
        if let Some(entry) = self.tree.last_entry_mut() {
            entry.post_comments.extend(pending);
        }
    }
}

fn make_key(token: &Token) -> Primitive {
    make_primitive(token.as_str(), token.kind())
}

struct Parser<'t, 's> {
    tokens: &'t [Token],
    pos: usize,
    /// How many blocks the cursor is inside.
    depth: usize,
    sink: &'s mut dyn ReportSink,
}

/// Parse a whole file's tokens into a tree.
///
/// Recoverable problems are reported to `sink` and parsing goes on. Problems that leave no
/// sensible way to continue return an error.
pub fn parse_tokens(tokens: &[Token], sink: &mut dyn ReportSink) -> Result<Tree, ParseError> {
    let mut parser = Parser { tokens, pos: 0, depth: 0, sink };
    if let Some(token) = tokens.first().filter(|t| t.is(HEADER_TOKEN)) {
        let msg = format!("skipping header token \"{token}\"");
        tips(ErrorKey::Header).msg(msg).loc(token).push(parser.sink);
        parser.pos = 1;
    }
    parser.parse_level(None)
}

impl<'t> Parser<'t, '_> {
    fn next_token(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    /// The line of the token before the one just consumed.
    fn previous_line(&self) -> Option<u32> {
        if self.pos > 1 {
            Some(self.tokens[self.pos - 2].loc.line)
        } else {
            None
        }
    }

    fn parse_level(&mut self, opener: Option<Opener<'t>>) -> Result<Tree, ParseError> {
        let mut level = ParseLevel::new();
        loop {
            if let State::Done = level.state {
                level.flush_post_comments();
                return Ok(level.tree);
            }
            let Some(token) = self.next_token() else {
                break;
            };
            let state = level.state;
            level.state = match state {
                State::ProcessKey => self.process_key(&mut level, token, opener.is_none()),
                State::ProcessOperator { key } => self.process_operator(&mut level, token, key),
                State::ProcessValue { key, operator } => {
                    self.process_value(&mut level, token, key, operator)?
                }
                State::ProcessGroup { key, operator, brace } => {
                    self.process_group(&mut level, token, key, operator, brace)?
                }
                State::Done => State::Done,
            };
        }

        // Out of tokens.
        if let State::ProcessGroup { key, brace, .. } = level.state {
            return Err(ParseError::UnclosedBlock { loc: brace.loc.clone(), key: key.to_string() });
        }
        if let Some(Opener { key, brace }) = opener {
            return Err(ParseError::UnclosedBlock { loc: brace.loc.clone(), key: key.to_string() });
        }
        let state = level.state;
        match state {
            State::ProcessOperator { key } => self.dangling_key(&mut level, key, Operator::Equals),
            State::ProcessValue { key, operator } => self.dangling_key(&mut level, key, operator),
            _ => (),
        }
        level.flush_post_comments();
        Ok(level.tree)
    }

    fn dangling_key(&mut self, level: &mut ParseLevel<'t>, key: &'t Token, operator: Operator) {
        let msg = format!("key \"{key}\" without value at end of file");
        warn(ErrorKey::MissingValue).msg(msg).loc(key).push(self.sink);
        level.append(key, operator, Value::Nothing, false);
    }

    /// A comment on the same line as the token before it belongs to the entry that was just
    /// completed. Other comments wait for the next entry.
    fn attach_comment(&self, level: &mut ParseLevel<'t>, token: &Token) {
        let text = token.comment_text().to_string();
        if self.previous_line() == Some(token.loc.line) {
            level.append_line_comment(text);
        } else {
            level.pending_comments.push(text);
        }
    }

    fn process_key(
        &mut self,
        level: &mut ParseLevel<'t>,
        token: &'t Token,
        top_level: bool,
    ) -> State<'t> {
        match token.kind() {
            kind if kind.is_primitive() => State::ProcessOperator { key: token },
            TokenKind::Comment => {
                self.attach_comment(level, token);
                State::ProcessKey
            }
            TokenKind::End if !top_level => State::Done,
            TokenKind::End => {
                err(ErrorKey::BraceMismatch)
                    .msg("unmatched closing bracket")
                    .info("skipping token")
                    .loc(token)
                    .push(self.sink);
                State::ProcessKey
            }
            _ => {
                err(ErrorKey::InvalidKey)
                    .msg(format!("token \"{token}\" is not a valid key"))
                    .info("skipping token")
                    .loc(token)
                    .push(self.sink);
                State::ProcessKey
            }
        }
    }

    fn process_operator(
        &mut self,
        level: &mut ParseLevel<'t>,
        token: &'t Token,
        key: &'t Token,
    ) -> State<'t> {
        match token.kind() {
            TokenKind::Operator => match token.as_str().parse() {
                Ok(operator) => State::ProcessValue { key, operator },
                Err(_) => self.missing_operator(token, key),
            },
            TokenKind::Comment => {
                level.pending_comments.push(token.comment_text().to_string());
                State::ProcessOperator { key }
            }
            _ => self.missing_operator(token, key),
        }
    }

    /// Read the unexpected token again, as the value.
    fn missing_operator(&mut self, token: &'t Token, key: &'t Token) -> State<'t> {
        warn(ErrorKey::MissingOperator)
            .msg(format!("expected operator after key \"{key}\""))
            .info(format!("treating operator as \"=\" and token \"{token}\" as value"))
            .loc(token)
            .loc_msg(key, "key")
            .push(self.sink);
        self.pos -= 1;
        State::ProcessValue { key, operator: Operator::Equals }
    }

    fn process_value(
        &mut self,
        level: &mut ParseLevel<'t>,
        token: &'t Token,
        key: &'t Token,
        operator: Operator,
    ) -> Result<State<'t>, ParseError> {
        match token.kind() {
            kind if kind.is_primitive() => {
                let value = self.scalar_or_color(level, token);
                level.append(key, operator, value, false);
                Ok(State::ProcessKey)
            }
            TokenKind::Begin => {
                if is_tree_block(self.tokens, self.pos) {
                    if self.depth >= MAX_DEPTH {
                        let loc = token.loc.clone();
                        return Err(ParseError::TooDeep { loc, limit: MAX_DEPTH });
                    }
                    self.depth += 1;
                    let tree = self.parse_level(Some(Opener { key, brace: token }))?;
                    self.depth -= 1;
                    level.append(key, operator, Value::Tree(tree), false);
                    Ok(State::ProcessKey)
                } else {
                    Ok(State::ProcessGroup { key, operator, brace: token })
                }
            }
            TokenKind::Comment => {
                level.pending_comments.push(token.comment_text().to_string());
                Ok(State::ProcessValue { key, operator })
            }
            kind => Err(ParseError::ExpectedValue {
                loc: token.loc.clone(),
                kind,
                text: token.to_string(),
                key: key.to_string(),
            }),
        }
    }

    /// A colorspace name followed by a color literal becomes a color. Anything else is a plain
    /// value.
    fn scalar_or_color(&mut self, level: &mut ParseLevel<'t>, token: &'t Token) -> Value {
        if let Some(colorspace) = colorspace(token) {
            if let Some(found) = match_color(self.tokens, self.pos, colorspace) {
                level.pending_comments.extend(found.comments);
                self.pos = found.end;
                return Value::Color(found.color);
            }
            warn(ErrorKey::Color)
                .msg(format!("found colorspace token {colorspace} without following color"))
                .loc(token)
                .push(self.sink);
        }
        Value::Primitive(make_primitive(token.as_str(), token.kind()))
    }

    fn process_group(
        &mut self,
        level: &mut ParseLevel<'t>,
        token: &'t Token,
        key: &'t Token,
        operator: Operator,
        brace: &'t Token,
    ) -> Result<State<'t>, ParseError> {
        match token.kind() {
            kind if kind.is_primitive() => {
                let value = Value::Primitive(make_primitive(token.as_str(), kind));
                let mut entry = Entry::new(make_key(key), operator, value);
                entry.in_group = true;
                entry.pre_comments = take(&mut level.pending_comments);
                entry.loc = Some(token.loc.clone());
                level.tree.push(entry);
            }
            TokenKind::Comment => self.attach_comment(level, token),
            TokenKind::End => {
                level.flush_post_comments();
                return Ok(State::ProcessKey);
            }
            TokenKind::Begin => return Err(ParseError::NestedGroup { loc: token.loc.clone() }),
            kind => {
                return Err(ParseError::InvalidGroupValue {
                    loc: token.loc.clone(),
                    kind,
                    text: token.to_string(),
                });
            }
        }
        Ok(State::ProcessGroup { key, operator, brace })
    }
}

/// Decide whether the block starting at `start` (just after its `{`) holds key/value pairs or is
/// a bare list of values.
///
/// An empty block is a tree. Any nested `{`, or an operator before the block closes, makes it a
/// tree. Otherwise any value makes it a group. Comments don't count.
fn is_tree_block(tokens: &[Token], start: usize) -> bool {
    let mut is_tree = true;
    let mut level = 0;
    for token in &tokens[start.min(tokens.len())..] {
        match token.kind() {
            TokenKind::End => {
                level -= 1;
                if level < 0 {
                    break;
                }
            }
            TokenKind::Comment => (),
            TokenKind::Begin => return true,
            TokenKind::Operator if level == 0 => return true,
            _ => is_tree = false,
        }
    }
    is_tree
}

use crate::parse::primitive::make_primitive;
use crate::token::{Token, TokenKind};
use crate::tree::{Channel, Color, Colorspace, Primitive};

/// A color literal found by [`match_color`].
#[derive(Debug)]
pub struct ColorMatch {
    pub color: Color,
    /// Position of the first token after the literal.
    pub end: usize,
    /// Comments found between the tokens of the literal.
    pub comments: Vec<String>,
}

/// Check if this value token names a colorspace, meaning it might start a color literal.
pub fn colorspace(token: &Token) -> Option<Colorspace> {
    if token.kind() == TokenKind::Identifier {
        token.as_str().parse().ok()
    } else {
        None
    }
}

/// Try to read `{ number number number }` starting at `start`, skipping over comments.
/// This does not consume anything; the caller decides what to do with the match.
pub fn match_color(tokens: &[Token], start: usize, colorspace: Colorspace) -> Option<ColorMatch> {
    let mut comments = Vec::new();
    let mut channels = Vec::with_capacity(3);
    let mut opened = false;
    for (pos, token) in tokens.iter().enumerate().skip(start) {
        match token.kind() {
            TokenKind::Comment => comments.push(token.comment_text().to_string()),
            TokenKind::Begin if !opened => opened = true,
            kind if opened && kind.is_number() && channels.len() < 3 => {
                match make_primitive(token.as_str(), kind) {
                    Primitive::Int(i) => channels.push(Channel::Int(i)),
                    Primitive::Real(r) => channels.push(Channel::Real(r)),
                    _ => return None,
                }
            }
            TokenKind::End if channels.len() == 3 => {
                let channels = [channels[0], channels[1], channels[2]];
                let color = Color::new(colorspace, channels);
                return Some(ColorMatch { color, end: pos + 1, comments });
            }
            _ => return None,
        }
    }
    None
}

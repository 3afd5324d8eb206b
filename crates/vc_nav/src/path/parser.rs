use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::path::{FunctionCall, Literal, PathSyntaxError, Segment, Selector, SyntaxErrorKind};

/// Parses `src` into segments.
///
/// ```text
/// path     := segment ('.' segment)*
/// segment  := name selector? (':' function)?
/// selector := '[' integer ']' | '[' quoted ']'
/// function := name '(' (literal (',' literal)*)? ')'
/// ```
pub(super) fn parse(src: &str) -> Result<Vec<Segment>, PathSyntaxError> {
    Parser { src, pos: 0 }.path()
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    #[inline]
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    #[inline]
    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    #[inline]
    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn skip_spaces(&mut self) {
        while self.peek() == Some(' ') {
            self.pos += 1;
        }
    }

    fn error(&self, offset: usize, kind: SyntaxErrorKind) -> PathSyntaxError {
        PathSyntaxError {
            offset,
            path: self.src.to_string(),
            kind,
        }
    }

    fn unexpected(&self) -> PathSyntaxError {
        match self.peek() {
            Some(']') => self.error(self.pos, SyntaxErrorKind::UnbalancedBracket),
            Some(c) => self.error(self.pos, SyntaxErrorKind::UnexpectedChar(c)),
            None => self.error(self.pos, SyntaxErrorKind::EmptySegment),
        }
    }

    fn path(mut self) -> Result<Vec<Segment>, PathSyntaxError> {
        let mut segments = Vec::new();
        loop {
            segments.push(self.segment()?);
            match self.peek() {
                None => return Ok(segments),
                Some('.') => {
                    let dot = self.pos;
                    self.pos += 1;
                    if self.peek().is_none() {
                        return Err(self.error(dot, SyntaxErrorKind::TrailingSeparator));
                    }
                }
                Some(_) => return Err(self.unexpected()),
            }
        }
    }

    fn name(&mut self) -> Option<&'a str> {
        let src: &'a str = self.src;
        let rest = &src[self.pos..];
        let len = rest
            .char_indices()
            .take_while(|&(i, c)| {
                c == '_' || if i == 0 { c.is_ascii_alphabetic() } else { c.is_ascii_alphanumeric() }
            })
            .count();
        // Names are ASCII, so the char count is the byte length.
        if len == 0 {
            return None;
        }
        self.pos += len;
        Some(&rest[..len])
    }

    fn segment(&mut self) -> Result<Segment, PathSyntaxError> {
        let offset = self.pos;
        let Some(name) = self.name() else {
            return Err(match self.peek() {
                None | Some('.' | '[' | ':') => self.error(offset, SyntaxErrorKind::EmptySegment),
                Some(_) => self.unexpected(),
            });
        };
        let selector = match self.peek() {
            Some('[') => Some(self.selector()?),
            _ => None,
        };
        let function = match self.peek() {
            Some(':') => Some(self.function()?),
            _ => None,
        };
        Ok(Segment {
            name: name.into(),
            selector,
            function,
            offset,
        })
    }

    fn selector(&mut self) -> Result<Selector, PathSyntaxError> {
        let open = self.pos;
        self.pos += 1;
        let selector = match self.peek() {
            None => return Err(self.error(open, SyntaxErrorKind::UnterminatedBracket)),
            Some(']') => return Err(self.error(self.pos, SyntaxErrorKind::EmptySelector)),
            Some(quote @ ('\'' | '"')) => Selector::Key(self.quoted(quote)?.into()),
            Some(c) if c.is_ascii_digit() => {
                let start = self.pos;
                self.digits();
                let index = self.src[start..self.pos]
                    .parse()
                    .map_err(|_| self.error(start, SyntaxErrorKind::IndexOverflow))?;
                Selector::Index(index)
            }
            Some(_) => return Err(self.error(self.pos, SyntaxErrorKind::InvalidSelector)),
        };
        match self.peek() {
            Some(']') => {
                self.pos += 1;
                Ok(selector)
            }
            None => Err(self.error(open, SyntaxErrorKind::UnterminatedBracket)),
            Some(_) => Err(self.error(self.pos, SyntaxErrorKind::InvalidSelector)),
        }
    }

    /// Consumes ASCII digits, returning how many.
    fn digits(&mut self) -> usize {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.pos += 1;
        }
        self.pos - start
    }

    fn quoted(&mut self, quote: char) -> Result<String, PathSyntaxError> {
        let start = self.pos;
        self.pos += quote.len_utf8();
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(self.error(start, SyntaxErrorKind::UnterminatedString)),
                Some(c) if c == quote => return Ok(out),
                Some('\\') => {
                    let escape = self.pos - 1;
                    match self.bump() {
                        Some(c) if c == quote => out.push(c),
                        Some(c) => return Err(self.error(escape, SyntaxErrorKind::UnknownEscape(c))),
                        None => return Err(self.error(start, SyntaxErrorKind::UnterminatedString)),
                    }
                }
                Some(c) => out.push(c),
            }
        }
    }

    fn function(&mut self) -> Result<FunctionCall, PathSyntaxError> {
        self.pos += 1;
        let name_at = self.pos;
        let Some(name) = self.name() else {
            return Err(self.error(name_at, SyntaxErrorKind::ExpectedFunctionName));
        };
        let open = self.pos;
        if !self.eat('(') {
            return Err(self.error(self.pos, SyntaxErrorKind::ExpectedArguments));
        }

        let mut args = Vec::new();
        self.skip_spaces();
        if self.eat(')') {
            return Ok(FunctionCall {
                name: name.into(),
                args: args.into_boxed_slice(),
            });
        }
        loop {
            self.skip_spaces();
            if self.peek().is_none() {
                return Err(self.error(open, SyntaxErrorKind::UnterminatedCall));
            }
            args.push(self.literal()?);
            self.skip_spaces();
            match self.bump() {
                Some(',') => {}
                Some(')') => break,
                None => return Err(self.error(open, SyntaxErrorKind::UnterminatedCall)),
                Some(c) => {
                    return Err(self.error(self.pos - c.len_utf8(), SyntaxErrorKind::UnexpectedChar(c)));
                }
            }
        }
        Ok(FunctionCall {
            name: name.into(),
            args: args.into_boxed_slice(),
        })
    }

    fn literal(&mut self) -> Result<Literal, PathSyntaxError> {
        let start = self.pos;
        match self.peek() {
            Some(quote @ ('\'' | '"')) => Ok(Literal::Str(self.quoted(quote)?)),
            Some(c) if c == '-' || c.is_ascii_digit() => self.number(),
            Some(c) if c.is_ascii_alphabetic() => match self.name() {
                Some("true") => Ok(Literal::Bool(true)),
                Some("false") => Ok(Literal::Bool(false)),
                Some("null") => Ok(Literal::Null),
                _ => Err(self.error(start, SyntaxErrorKind::InvalidLiteral)),
            },
            _ => Err(self.error(start, SyntaxErrorKind::InvalidLiteral)),
        }
    }

    fn number(&mut self) -> Result<Literal, PathSyntaxError> {
        let start = self.pos;
        let invalid = |this: &Self| this.error(start, SyntaxErrorKind::InvalidLiteral);

        self.eat('-');
        if self.digits() == 0 {
            return Err(invalid(self));
        }
        let mut float = false;
        if self.peek() == Some('.') {
            self.pos += 1;
            if self.digits() == 0 {
                return Err(invalid(self));
            }
            float = true;
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            self.pos += 1;
            if !self.eat('-') {
                self.eat('+');
            }
            if self.digits() == 0 {
                return Err(invalid(self));
            }
            float = true;
        }

        let text = &self.src[start..self.pos];
        if float {
            text.parse().map(Literal::Float).map_err(|_| invalid(self))
        } else {
            text.parse().map(Literal::Int).map_err(|_| invalid(self))
        }
    }
}

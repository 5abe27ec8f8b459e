use crate::ast::Attribute;
use crate::error::ParseError;
use crate::escape;
use memchr::{memchr2, memmem};
use miette::NamedSource;

/// How a tag participates in nesting.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TagKind {
    /// `<name ...>`
    Open,
    /// `</name>`
    Close,
    /// `<name .../>`
    SelfClosing,
}

/// One `<...>` span of the input with its position.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub name: String,
    pub kind: TagKind,
    pub attributes: Vec<Attribute>,
    /// Byte offset of the `<`.
    pub pos_start: usize,
    /// Byte offset one past the `>`.
    pub pos_end: usize,
}

impl Tag {
    pub fn new(
        name: String,
        kind: TagKind,
        attributes: Vec<Attribute>,
        pos_start: usize,
        pos_end: usize,
    ) -> Tag {
        Tag {
            name,
            kind,
            attributes,
            pos_start,
            pos_end,
        }
    }

    pub fn is_close(&self) -> bool {
        self.kind == TagKind::Close
    }
}

/// Builds the tag table for a document.
///
/// Processing instructions, comments, CDATA sections and `<!...>`
/// declarations are skipped whole, so delimiters inside them never count as
/// tag boundaries.
pub struct Lexer<'a> {
    input: &'a str,
    source: &'a NamedSource<String>,
    position: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str, source: &'a NamedSource<String>) -> Self {
        Self {
            input,
            source,
            position: 0,
        }
    }

    /// Scans the whole input, returning the tags in document order once
    /// delimiter balance and element nesting have both been verified.
    pub fn lex(&mut self) -> Result<Vec<Tag>, ParseError> {
        let bytes = self.input.as_bytes();
        let mut tags = Vec::new();

        while let Some(offset) = memchr2(b'<', b'>', &bytes[self.position..]) {
            let at = self.position + offset;
            if bytes[at] == b'>' {
                return Err(self.error(at, 1, "'>' outside of any tag"));
            }
            if let Some(end) = self.skip_excluded(at)? {
                self.position = end;
                continue;
            }
            let close = self.find_tag_end(at)?;
            tags.push(self.read_tag(at, close)?);
            self.position = close + 1;
        }

        self.check_nesting(&tags)?;
        log::debug!("indexed {} tags from {} bytes", tags.len(), self.input.len());
        Ok(tags)
    }

    /// If a `<` at `at` opens an excluded section, returns the offset just
    /// past its terminator.
    fn skip_excluded(&self, at: usize) -> Result<Option<usize>, ParseError> {
        match excluded_section(self.input, at) {
            None => Ok(None),
            Some((_, Some(end))) => Ok(Some(end)),
            Some((kind, None)) => {
                Err(self.error(at, 2, format!("unterminated {}", kind.describe())))
            }
        }
    }

    /// Offset of the `>` closing the tag opened at `at`.
    fn find_tag_end(&self, at: usize) -> Result<usize, ParseError> {
        let bytes = self.input.as_bytes();
        match memchr2(b'<', b'>', &bytes[at + 1..]) {
            Some(i) if bytes[at + 1 + i] == b'>' => Ok(at + 1 + i),
            Some(i) => Err(self.error(at + 1 + i, 1, "'<' inside a tag that was never closed")),
            None => Err(self.error(at, 1, "tag is missing its closing '>'")),
        }
    }

    fn read_tag(&self, start: usize, close: usize) -> Result<Tag, ParseError> {
        let inner = &self.input[start + 1..close];
        let span_len = close + 1 - start;

        let (is_close, body) = match inner.strip_prefix('/') {
            Some(rest) => (true, rest),
            None => (false, inner),
        };
        let (is_self_closing, body) = match body.strip_suffix('/') {
            Some(rest) => (true, rest),
            None => (false, body),
        };
        if is_close && is_self_closing {
            return Err(self.error(
                start,
                span_len,
                "a tag cannot be both closing and self-closing",
            ));
        }

        let name_end = body.find(char::is_whitespace).unwrap_or(body.len());
        let name = &body[..name_end];
        if name.is_empty() {
            return Err(self.error(start, span_len, "missing tag name"));
        }

        let kind = if is_close {
            TagKind::Close
        } else if is_self_closing {
            TagKind::SelfClosing
        } else {
            TagKind::Open
        };
        let attributes = read_attributes(name, &body[name_end..]);
        log::trace!("tag {kind:?} <{name}> at {start}..{}", close + 1);

        Ok(Tag::new(name.to_string(), kind, attributes, start, close + 1))
    }

    fn check_nesting(&self, tags: &[Tag]) -> Result<(), ParseError> {
        let mut open: Vec<&Tag> = Vec::new();
        for tag in tags {
            match tag.kind {
                TagKind::Open => open.push(tag),
                TagKind::SelfClosing => {}
                TagKind::Close => match open.pop() {
                    Some(opener) if opener.name == tag.name => {}
                    Some(opener) => {
                        return Err(self.error(
                            tag.pos_start,
                            tag.pos_end - tag.pos_start,
                            format!("expected </{}>, found </{}>", opener.name, tag.name),
                        ))
                    }
                    None => {
                        return Err(self.error(
                            tag.pos_start,
                            tag.pos_end - tag.pos_start,
                            format!("</{}> has no matching opening tag", tag.name),
                        ))
                    }
                },
            }
        }

        match open.pop() {
            Some(opener) => Err(self.error(
                opener.pos_start,
                opener.pos_end - opener.pos_start,
                format!("<{}> is never closed", opener.name),
            )),
            None => Ok(()),
        }
    }

    fn error(&self, start: usize, len: usize, reason: impl Into<String>) -> ParseError {
        ParseError::malformed(self.source, (start, len), reason)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SectionKind {
    ProcessingInstruction,
    Comment,
    CData,
    Declaration,
}

impl SectionKind {
    fn describe(self) -> &'static str {
        match self {
            SectionKind::ProcessingInstruction => "processing instruction",
            SectionKind::Comment => "comment",
            SectionKind::CData => "CDATA section",
            SectionKind::Declaration => "declaration",
        }
    }

    /// Length of the opening marker.
    pub fn opener_len(self) -> usize {
        match self {
            SectionKind::ProcessingInstruction | SectionKind::Declaration => 2,
            SectionKind::Comment => 4,
            SectionKind::CData => 9,
        }
    }
}

/// Classifies a section that is never read as a tag, starting at the `<` at
/// `at`. Returns its kind and the offset just past its terminator, or `None`
/// for the offset when the section runs off the end of the input.
pub(crate) fn excluded_section(text: &str, at: usize) -> Option<(SectionKind, Option<usize>)> {
    let rest = &text[at..];
    let (kind, terminator) = if rest.starts_with("<?") {
        (SectionKind::ProcessingInstruction, "?>")
    } else if rest.starts_with("<!--") {
        (SectionKind::Comment, "-->")
    } else if rest.starts_with("<![CDATA[") {
        (SectionKind::CData, "]]>")
    } else if rest.starts_with("<!") {
        return Some((SectionKind::Declaration, declaration_end(text, at)));
    } else {
        return None;
    };

    let search_from = at + kind.opener_len();
    let end = memmem::find(&text.as_bytes()[search_from..], terminator.as_bytes())
        .map(|i| search_from + i + terminator.len());
    Some((kind, end))
}

/// `<!DOCTYPE ...>` and friends; an internal subset in brackets may hold `>`.
fn declaration_end(text: &str, at: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, b) in text.as_bytes()[at + 2..].iter().enumerate() {
        match b {
            b'[' => depth += 1,
            b']' => depth = depth.saturating_sub(1),
            b'>' if depth == 0 => return Some(at + 2 + i + 1),
            _ => {}
        }
    }
    None
}

/// Collects `name="value"` pairs in order. Text that does not fit the
/// pattern is skipped up to the next whitespace.
fn read_attributes(tag_name: &str, text: &str) -> Vec<Attribute> {
    let mut attributes = Vec::new();
    let mut rest = text.trim_start();
    while !rest.is_empty() {
        match split_attribute(rest) {
            Some((attribute, remaining)) => {
                attributes.push(attribute);
                rest = remaining.trim_start();
            }
            None => {
                let skip = rest.find(char::is_whitespace).unwrap_or(rest.len());
                log::warn!("ignoring attribute text `{}` in <{tag_name}>", &rest[..skip]);
                rest = rest[skip..].trim_start();
            }
        }
    }
    attributes
}

fn split_attribute(text: &str) -> Option<(Attribute, &str)> {
    let eq = text.find('=')?;
    let name = text[..eq].trim_end();
    if name.is_empty() || name.contains(char::is_whitespace) || name.contains('"') {
        return None;
    }
    let value_start = text[eq + 1..].trim_start().strip_prefix('"')?;
    let quote = value_start.find('"')?;
    let value = escape::decode(&value_start[..quote]);
    Some((Attribute::new(name, value), &value_start[quote + 1..]))
}

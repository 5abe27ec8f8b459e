use crate::ast::{Children, Content, Document, Node};
use crate::config::ParseOptions;
use crate::error::ParseError;
use crate::escape;
use crate::lexer::{excluded_section, Lexer, SectionKind, Tag, TagKind};
use crate::utils::{get_line_and_column, is_xml_whitespace};
use memchr::memchr;
use miette::NamedSource;

/// A recursive descent extractor over the tag table of one document.
///
/// Construction indexes the input (and rejects unbalanced markup); the
/// extraction methods then only read the table.
#[derive(Debug)]
pub struct Parser<'a> {
    source: NamedSource<String>,
    tags: Vec<Tag>,
    source_text: &'a str,
    options: ParseOptions,
}

impl<'a> Parser<'a> {
    pub fn new(source_text: &'a str) -> Result<Self, ParseError> {
        Self::new_with_name(source_text, "source.xml".to_string(), ParseOptions::default())
    }

    pub fn new_with_name(
        source_text: &'a str,
        name: String,
        options: ParseOptions,
    ) -> Result<Self, ParseError> {
        let source_text = source_text.strip_prefix('\u{feff}').unwrap_or(source_text);
        let source = NamedSource::new(name, source_text.to_string());
        let tags = Lexer::new(source_text, &source).lex()?;

        Ok(Self {
            source,
            tags,
            source_text,
            options,
        })
    }

    /// The tag table built for this document.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Document ::= Element, with nothing but excluded sections and
    /// whitespace around it.
    pub fn parse_document(&self) -> Result<Document, ParseError> {
        if self.tags.is_empty() {
            return Err(ParseError::malformed(
                &self.source,
                (0, self.source_text.len()),
                "no root element",
            ));
        }

        let (next, name, root) = self.extract(0, 0)?;
        if let Some(extra) = self.tags.get(next) {
            return Err(self.error_at(extra, "multiple root elements"));
        }

        log::debug!("parsed document with root <{name}>");
        Ok(Document { name, root })
    }

    /// Extracts the element whose tag sits at `index`, returning the index of
    /// the first tag after it together with the element's name and node.
    ///
    /// Close tags at `index` are skipped first; running off the table while
    /// skipping fails unless `ParseOptions::lenient` is set.
    pub fn extract_at(&self, index: usize) -> Result<(usize, String, Node), ParseError> {
        self.extract(index, 0)
    }

    fn extract(&self, index: usize, depth: usize) -> Result<(usize, String, Node), ParseError> {
        let mut index = index;
        while self.tags.get(index).is_some_and(Tag::is_close) {
            index += 1;
        }
        let Some(tag) = self.tags.get(index) else {
            return self.exhausted();
        };

        if depth >= self.options.max_depth {
            return Err(ParseError::NestingTooDeep {
                src: self.source.clone(),
                span: (tag.pos_start, tag.pos_end - tag.pos_start).into(),
                limit: self.options.max_depth,
            });
        }

        // Empty element: <a/>
        if tag.kind == TagKind::SelfClosing {
            log::trace!("<{}/> is empty", tag.name);
            return Ok((index + 1, tag.name.clone(), self.node(tag, Content::Absent)));
        }

        // Simple element: <a>...</a> with no tag in between
        if let Some(close) = self
            .tags
            .get(index + 1)
            .filter(|next| next.is_close() && next.name == tag.name)
        {
            let text = self.element_text(tag.pos_end, close.pos_start);
            log::trace!("<{}> is simple ({} bytes of text)", tag.name, text.len());
            return Ok((index + 2, tag.name.clone(), self.node(tag, Content::Text(text))));
        }

        // Complex element: children until our own close tag
        let mut children = Children::new();
        let mut cursor = index + 1;
        loop {
            let Some(child) = self.tags.get(cursor) else {
                return Err(self.error_at(tag, format!("<{}> is never closed", tag.name)));
            };
            if child.is_close() {
                if child.name != tag.name {
                    return Err(self.error_at(
                        child,
                        format!("expected </{}>, found </{}>", tag.name, child.name),
                    ));
                }
                log::trace!("<{}> is complex ({} fields)", tag.name, children.len());
                return Ok((
                    cursor + 1,
                    tag.name.clone(),
                    self.node(tag, Content::Children(children)),
                ));
            }

            let (next, key, node) = self.extract(cursor, depth + 1)?;
            children.insert(key, node);
            cursor = next;
        }
    }

    fn exhausted(&self) -> Result<(usize, String, Node), ParseError> {
        let Some(last) = self.tags.last() else {
            return Err(ParseError::malformed(&self.source, (0, 0), "no tags to extract"));
        };
        if !self.options.lenient {
            return Err(self.error_at(last, "expected an element, found only closing tags"));
        }

        let (line, column) = get_line_and_column(self.source_text, last.pos_start);
        log::warn!(
            "no element left after {line}:{column}, substituting empty text for <{}>",
            last.name
        );
        Ok((self.tags.len(), last.name.clone(), self.node(last, Content::Text(String::new()))))
    }

    /// Character data between `start` and `end`. Comments and processing
    /// instructions are dropped and CDATA contributes its raw contents.
    /// Whitespace-only text collapses to the empty string.
    fn element_text(&self, start: usize, end: usize) -> String {
        let raw = &self.source_text[start..end];
        let mut pieces = Vec::new();

        let mut position = 0;
        while let Some(offset) = memchr(b'<', &raw.as_bytes()[position..]) {
            let at = position + offset;
            pieces.push(TextPiece::Escaped(&raw[position..at]));
            match excluded_section(raw, at) {
                Some((kind, Some(section_end))) => {
                    if kind == SectionKind::CData {
                        let inner = &raw[at + kind.opener_len()..section_end - "]]>".len()];
                        pieces.push(TextPiece::Verbatim(inner));
                    }
                    position = section_end;
                }
                // The indexer never leaves anything else between a tag and its close.
                _ => {
                    position = at;
                    break;
                }
            }
        }
        pieces.push(TextPiece::Escaped(&raw[position..]));

        let blank = pieces.iter().all(|piece| match piece {
            TextPiece::Escaped(text) => text.chars().all(is_xml_whitespace),
            TextPiece::Verbatim(_) => false,
        });
        if blank {
            return String::new();
        }

        pieces
            .into_iter()
            .map(|piece| match piece {
                TextPiece::Escaped(text) => escape::decode(text),
                TextPiece::Verbatim(text) => text.into(),
            })
            .collect()
    }

    fn node(&self, tag: &Tag, content: Content) -> Node {
        Node {
            content,
            attributes: tag.attributes.clone(),
        }
    }

    fn error_at(&self, tag: &Tag, reason: impl Into<String>) -> ParseError {
        ParseError::malformed(&self.source, (tag.pos_start, tag.pos_end - tag.pos_start), reason)
    }
}

enum TextPiece<'t> {
    Escaped(&'t str),
    Verbatim(&'t str),
}

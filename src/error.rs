use miette::{Diagnostic, NamedSource, SourceSpan};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum CodecError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Serialize(#[from] SerializeError),

    #[error("I/O error on {}", path.display())]
    #[diagnostic(
        code(io::failed),
        help("Check that the path exists and that the process may read or write it.")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug, Diagnostic, Clone)]
pub enum ParseError {
    #[error("Malformed markup: {reason}")]
    #[diagnostic(
        code(parser::malformed_markup),
        help("Every '<' needs a matching '>', and every opening tag needs a closing tag at the same nesting level.")
    )]
    MalformedMarkup {
        #[source_code]
        src: NamedSource<String>,
        #[label("{reason}")]
        span: SourceSpan,
        reason: String,
    },

    #[error("Elements are nested more than {limit} levels deep")]
    #[diagnostic(
        code(parser::nesting_too_deep),
        help("Raise `ParseOptions::max_depth` if this document is trusted.")
    )]
    NestingTooDeep {
        #[source_code]
        src: NamedSource<String>,
        #[label("Nesting limit exceeded here")]
        span: SourceSpan,
        limit: usize,
    },

    #[error("Unsupported input: {reason}")]
    #[diagnostic(code(parser::unsupported_input))]
    UnsupportedInput { reason: String },
}

impl ParseError {
    pub(crate) fn malformed(
        src: &NamedSource<String>,
        span: impl Into<SourceSpan>,
        reason: impl Into<String>,
    ) -> Self {
        ParseError::MalformedMarkup {
            src: src.clone(),
            span: span.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum SerializeError {
    #[error("Unsupported input: {reason}")]
    #[diagnostic(
        code(writer::unsupported_input),
        help("Element and attribute names must be non-empty and may not contain whitespace or markup characters.")
    )]
    UnsupportedInput { reason: String },
}

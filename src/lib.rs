pub mod api;
pub mod ast;
pub mod config;
pub mod error;
pub mod escape;
pub mod io;
pub mod lexer;
pub mod parser;
pub mod utils;
pub mod writer;
mod serialization;

pub use api::{parse, parse_with_options, serialize};
pub use ast::{Attribute, ChildValue, Children, Content, Document, Field, Node};
pub use config::{ParseOptions, SerializeOptions};
pub use error::{CodecError, ParseError, SerializeError};
pub use serialization::{Value, ATTRIBUTES_KEY, TEXT_KEY};

mod document;
mod entities;
mod serialize;
mod tokenizer;
mod types;

pub use crate::document::{Document, DomError, NodeKind};
pub use crate::tokenizer::tokenize;
pub use crate::types::{NodeId, NodeIndex, Token};

//! RDN ("Rich Data Notation") tokenizer and structural validator.
//!
//! RDN is a superset of JSON that adds first-class literals for sets,
//! maps with arbitrary-typed keys, tuples, regular expressions,
//! base64/hex binary blobs, arbitrary-precision integers, and a family
//! of `@`-prefixed temporal literals. This crate implements the core
//! tokenizer: a forward-only, zero-copy, push-style reader that turns a
//! UTF-8 byte buffer into a sequence of typed tokens while enforcing
//! the RDN grammar and tracking container depth and line/column
//! position.
//!
//! The in-memory document tree, the serializer, schema-driven
//! (de)serialization, and async stream draining are external
//! collaborators and are not part of this crate; see [`Reader`] and
//! [`MultiSegmentReader`] for the contract they are built on.

mod bitstack;
mod container;
mod error;
mod multi;
mod options;
mod position;
mod reader;
mod state;
mod tables;
mod token;

pub use container::ContainerKind;
pub use error::{ReasonCode, RdnError};
pub use multi::MultiSegmentReader;
pub use options::{CommentHandling, ReaderOptions};
pub use position::Position;
pub use reader::Reader;
pub use state::ReaderState;
pub use token::{TokenKind, ValueSequence};

//! Extended-literal scanners beyond plain JSON: the brace
//! disambiguator (§4.6), explicit `Set{`/`Map{` prefixes (§4.7),
//! `@`-prefixed temporal literals (§4.9), regex literals (§4.10), and
//! `b"…"`/`x"…"` binary literals (§4.11).
//!
//! Laid out as a directory the same way the teacher splits its
//! `syntax/lexer` module into one file per literal family.

mod binary;
mod brace;
mod prefixes;
mod regex;
mod temporal;

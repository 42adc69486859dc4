//! digicalc_scanner: Character cursor over a single expression.
//!
//! There is no token stream: the parser reads characters straight from the
//! cursor, with one character of lookahead.

pub mod char_codes;
mod cursor;

pub use cursor::Cursor;

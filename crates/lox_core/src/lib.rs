//! lox_core: Core utilities shared by the Lox scanner crates.
//!
//! Provides byte spans and line maps used to locate tokens and
//! diagnostics in source text.

pub mod text;

pub use text::{text_pos, LineAndColumn, LineMap, TextPos, TextSpan};

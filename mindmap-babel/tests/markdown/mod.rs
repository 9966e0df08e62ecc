//! Markdown format tests
//!
//! Import (Markdown → tree), export (tree → Markdown) and round trips.

mod export;
mod import;
mod roundtrip;

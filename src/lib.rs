//! # lean-grid
//!
//! Grid layout shortcodes for Contact Form 7 markup.
//!
//! Form authors lay out fields with `[row]` and `[col]` shortcodes:
//!
//! ```text
//! [row gap:24]
//! [col col:12 md:6]<label>Name [text* your-name]</label>[/col]
//! [col col:12 md:6]<label>Email [email* your-email]</label>[/col]
//! [/row]
//! ```
//!
//! and [`transform`] rewrites them into the `<div>` structure the companion
//! stylesheet lays out, leaving all other markup untouched.
//!
//! ## Testing
//!
//! Parser tests assert on whole trees with the fluent API in the
//! [testing module](grid::testing).

pub mod grid;

pub use grid::transform::{transform, Transformer};

//! Main module for lean-grid library functionality
//!
//! Markup flows through [`lexer`] into [`parser`], which builds the tree in
//! [`ast`]; [`render`] turns that tree into HTML. [`transform`] ties the
//! stages together behind a single call, and [`features`] decides which
//! filters a form's markup passes through.

pub mod ast;
pub mod cleanup;
pub mod config;
pub mod features;
pub mod formats;
pub mod generator;
pub mod lexer;
pub mod parser;
pub mod processor;
pub mod render;
pub mod testing;
pub mod transform;

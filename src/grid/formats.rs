//! Serialization formats for parsed grid documents

pub mod tag;

pub use tag::serialize_document as serialize_ast_tag;

// src/corpus/mod.rs
pub mod document;
pub mod walker;

pub use document::Article;

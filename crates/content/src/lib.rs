#![forbid(unsafe_code)]

pub mod catalog;
pub mod loader;
pub mod source;

pub use catalog::Catalog;
pub use source::{ContentError, ContentKind, ContentSource};

//! Core types for the folio site: the post registry, post documents, and
//! post resolution.
//!
//! This crate provides:
//! - [`Registry`]: ordered, immutable post records with unique identifiers
//! - [`ContentLibrary`]: identifier-keyed Markdown documents rendered to HTML
//! - [`Blog`]: both combined, deciding between local content and an external link
//!
//! The shipped registry and documents are compiled in from `content/` by the
//! build script, which fails the build when a local post has no document.

mod blog;
mod content;
mod error;
mod registry;

mod builtin {
    use crate::registry::PostSeed;

    include!(concat!(env!("OUT_DIR"), "/builtin_posts.rs"));
}

pub use blog::{Blog, PostView};
pub use content::{CODE_THEME, ContentLibrary, MarkdownRenderer, RenderedContent};
pub use error::{Error, Result};
pub use registry::{BLOG_PATH, ListItem, Listing, NavTarget, PostRecord, Registry, post_path};

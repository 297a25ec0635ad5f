//! HTML rendering for site pages.
//!
//! All rendering uses [maud](https://maud.lambda.xyz/) for compile-time HTML
//! generation with automatic escaping. The only pre-escaped input is post
//! content produced by the Markdown renderer.

pub mod components;
pub mod home;
pub mod listing;
pub mod post;

pub use components::SiteMeta;

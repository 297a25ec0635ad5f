//! The post registry: an immutable, ordered list of post records.
//!
//! Registry order is listing order. Identifiers are unique and URL-safe;
//! both properties are checked when the registry is built.

use std::iter::FusedIterator;

use crate::error::{Error, Result};

/// Path prefix under which local posts are served.
pub const BLOG_PATH: &str = "/blog";

/// Metadata for one blog post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRecord {
    /// Unique key, used in the request path and as the document key.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Display date. Never parsed.
    pub date: String,
    /// When set, the post lives on another site.
    pub external_link: Option<String>,
}

impl PostRecord {
    /// A post whose content is authored locally.
    pub fn local(id: impl Into<String>, title: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            date: date.into(),
            external_link: None,
        }
    }

    /// A post hosted elsewhere.
    pub fn external(
        id: impl Into<String>,
        title: impl Into<String>,
        date: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            external_link: Some(link.into()),
            ..Self::local(id, title, date)
        }
    }

    /// Internal path of this post's page.
    pub fn path(&self) -> String {
        post_path(&self.id)
    }

    /// Where a reader should be sent from the listing.
    pub fn target(&self) -> NavTarget<'_> {
        match &self.external_link {
            Some(link) => NavTarget::External(link),
            None => NavTarget::Internal(self.path()),
        }
    }
}

/// Internal path for a post identifier.
pub fn post_path(id: &str) -> String {
    format!("{BLOG_PATH}/{id}")
}

/// Compiled-in registry entry, generated by the build script.
pub(crate) struct PostSeed {
    pub(crate) id: &'static str,
    pub(crate) title: &'static str,
    pub(crate) date: &'static str,
    pub(crate) external_link: Option<&'static str>,
}

impl From<&PostSeed> for PostRecord {
    fn from(seed: &PostSeed) -> Self {
        Self {
            id: seed.id.to_string(),
            title: seed.title.to_string(),
            date: seed.date.to_string(),
            external_link: seed.external_link.map(str::to_string),
        }
    }
}

/// Ordered, immutable set of post records.
#[derive(Debug, Clone)]
pub struct Registry {
    records: Vec<PostRecord>,
}

impl Registry {
    /// Build a registry, rejecting invalid or duplicate identifiers.
    pub fn new(records: Vec<PostRecord>) -> Result<Self> {
        for (index, record) in records.iter().enumerate() {
            validate_identifier(&record.id)?;
            if records[..index].iter().any(|r| r.id == record.id) {
                return Err(Error::DuplicateIdentifier(record.id.clone()));
            }
        }
        Ok(Self { records })
    }

    /// The registry compiled in from `content/posts.toml`.
    pub fn builtin() -> Result<Self> {
        Self::new(crate::builtin::POSTS.iter().map(PostRecord::from).collect())
    }

    /// Find the record for `id`.
    pub fn resolve(&self, id: &str) -> Result<&PostRecord> {
        self.records
            .iter()
            .find(|record| record.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// All records in listing order.
    pub fn records(&self) -> &[PostRecord] {
        &self.records
    }

    /// Lazy listing of every record, in registry order.
    ///
    /// The returned iterator is `Clone`, so a listing can be walked again
    /// from the start.
    pub fn listing(&self) -> Listing<'_> {
        Listing {
            inner: self.records.iter(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn validate_identifier(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(Error::InvalidIdentifier {
            id: id.to_string(),
            reason: "identifier is empty",
        });
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(Error::InvalidIdentifier {
            id: id.to_string(),
            reason: "only ASCII letters, digits, '-' and '_' are allowed",
        });
    }
    Ok(())
}

/// Navigation target of a listing entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavTarget<'a> {
    /// Path of a locally rendered post.
    Internal(String),
    /// URL of an externally hosted post.
    External(&'a str),
}

impl NavTarget<'_> {
    /// The `href` value for this target.
    pub fn href(&self) -> &str {
        match self {
            Self::Internal(path) => path,
            Self::External(url) => url,
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, Self::External(_))
    }
}

/// One entry of the blog listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem<'a> {
    pub date: &'a str,
    pub title: &'a str,
    pub target: NavTarget<'a>,
}

/// Iterator over the registry in stored order.
#[derive(Debug, Clone)]
pub struct Listing<'a> {
    inner: std::slice::Iter<'a, PostRecord>,
}

impl<'a> Iterator for Listing<'a> {
    type Item = ListItem<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|record| ListItem {
            date: &record.date,
            title: &record.title,
            target: record.target(),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Listing<'_> {}

impl FusedIterator for Listing<'_> {}

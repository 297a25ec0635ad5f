//! Registry and documents combined: what a post page should show.

use crate::content::{ContentLibrary, RenderedContent};
use crate::error::{Error, Result};
use crate::registry::{PostRecord, Registry};

/// Outcome of opening a post by identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostView<'a> {
    /// A locally authored post with its rendered document.
    Local {
        record: &'a PostRecord,
        content: RenderedContent,
    },
    /// A post hosted elsewhere. `link` is the record's external link.
    External {
        record: &'a PostRecord,
        link: &'a str,
    },
}

impl<'a> PostView<'a> {
    pub fn record(&self) -> &'a PostRecord {
        match self {
            Self::Local { record, .. } | Self::External { record, .. } => *record,
        }
    }
}

/// A post registry paired with a document for every local post.
#[derive(Debug)]
pub struct Blog {
    registry: Registry,
    library: ContentLibrary,
}

impl Blog {
    /// Pair a registry with a library.
    ///
    /// Fails with [`Error::ContentMissing`] if a local post has no document.
    pub fn new(registry: Registry, library: ContentLibrary) -> Result<Self> {
        if let Some(missing) = registry
            .records()
            .iter()
            .find(|r| r.external_link.is_none() && !library.contains(&r.id))
        {
            return Err(Error::ContentMissing(missing.id.clone()));
        }

        for id in library.identifiers() {
            let registered = registry
                .records()
                .iter()
                .any(|r| r.id == id && r.external_link.is_none());
            if !registered {
                tracing::warn!(identifier = %id, "document has no local post and will not be served");
            }
        }

        tracing::debug!(posts = registry.len(), "blog assembled");

        Ok(Self { registry, library })
    }

    /// The registry and documents shipped with the binary.
    pub fn builtin() -> Result<Self> {
        Self::new(Registry::builtin()?, ContentLibrary::builtin())
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Resolve `id` and, for local posts only, load its document.
    pub fn open(&self, id: &str) -> Result<PostView<'_>> {
        let record = self.registry.resolve(id)?;

        if let Some(link) = record.external_link.as_deref() {
            return Ok(PostView::External { record, link });
        }

        let content = self.library.load(&record.id)?;
        Ok(PostView::Local { record, content })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Blog {
        let registry = Registry::new(vec![
            PostRecord::local("a", "Post A", "Jan 1, 2024"),
            PostRecord::external("b", "Post B", "Jan 2, 2024", "https://x.example/b"),
        ])
        .unwrap();
        // No document for "b": opening it must not touch the library.
        let library = ContentLibrary::from_documents([("a", "Body of *a*")]);
        Blog::new(registry, library).unwrap()
    }

    #[test]
    fn open_local_post_loads_content() {
        let blog = sample();
        match blog.open("a").unwrap() {
            PostView::Local { record, content } => {
                assert_eq!(record.id, "a");
                assert!(content.html.contains("<em>a</em>"));
            }
            other => panic!("expected local post, got {other:?}"),
        }
    }

    #[test]
    fn open_external_post_skips_loader() {
        let blog = sample();
        match blog.open("b").unwrap() {
            PostView::External { record, link } => {
                assert_eq!(record.id, "b");
                assert_eq!(link, "https://x.example/b");
            }
            other => panic!("expected external post, got {other:?}"),
        }
    }

    #[test]
    fn open_missing_post() {
        let blog = sample();
        assert_eq!(
            blog.open("c").unwrap_err(),
            Error::NotFound("c".to_string())
        );
    }

    #[test]
    fn open_is_idempotent() {
        let blog = sample();
        assert_eq!(blog.open("a").unwrap(), blog.open("a").unwrap());
        assert_eq!(blog.open("b").unwrap(), blog.open("b").unwrap());
    }

    #[test]
    fn missing_document_rejected_at_construction() {
        let registry = Registry::new(vec![PostRecord::local("a", "Post A", "Jan 1, 2024")]).unwrap();
        let library = ContentLibrary::from_documents(Vec::<(String, String)>::new());
        assert_eq!(
            Blog::new(registry, library).unwrap_err(),
            Error::ContentMissing("a".to_string())
        );
    }

    #[test]
    fn unregistered_document_is_not_served() {
        let registry = Registry::new(vec![PostRecord::local("a", "Post A", "Jan 1, 2024")]).unwrap();
        let library = ContentLibrary::from_documents([("a", "A"), ("draft", "Draft")]);
        let blog = Blog::new(registry, library).unwrap();
        assert_eq!(blog.open("draft").unwrap_err(), Error::NotFound("draft".to_string()));
    }

    #[test]
    fn builtin_blog_opens_every_post() {
        let blog = Blog::builtin().unwrap();
        for record in blog.registry().records() {
            let view = blog.open(&record.id).unwrap();
            assert_eq!(view.record().id, record.id);
            match (&view, &record.external_link) {
                (PostView::External { link, .. }, Some(expected)) => assert_eq!(link, expected),
                (PostView::Local { content, .. }, None) => assert!(!content.html.is_empty()),
                _ => panic!("view kind mismatch for {}", record.id),
            }
        }
    }
}

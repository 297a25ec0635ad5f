//! Build script for folio-core.
//!
//! Reads `content/posts.toml`, checks it against `content/posts/*.md`, and
//! generates the compiled-in registry and document table. A local post
//! without a document, or a duplicate identifier, fails the build.

use std::collections::HashSet;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Deserialize)]
struct RegistryFile {
    #[serde(default)]
    post: Vec<PostEntry>,
}

#[derive(Deserialize)]
struct PostEntry {
    id: String,
    title: String,
    date: String,
    external_link: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let manifest_dir = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR")?);
    let content_dir = manifest_dir.join("content");
    let registry_path = content_dir.join("posts.toml");
    let documents_dir = content_dir.join("posts");

    println!("cargo:rerun-if-changed={}", registry_path.display());
    println!("cargo:rerun-if-changed={}", documents_dir.display());

    let raw = std::fs::read_to_string(&registry_path)?;
    let registry: RegistryFile = toml::from_str(&raw)?;

    let mut seen = HashSet::new();
    for entry in &registry.post {
        if !seen.insert(entry.id.as_str()) {
            return Err(format!("duplicate post identifier '{}' in posts.toml", entry.id).into());
        }
    }

    let mut out = String::new();
    out.push_str("pub(crate) static POSTS: &[PostSeed] = &[\n");
    for entry in &registry.post {
        writeln!(
            out,
            "    PostSeed {{ id: {:?}, title: {:?}, date: {:?}, external_link: {:?} }},",
            entry.id, entry.title, entry.date, entry.external_link
        )?;
    }
    out.push_str("];\n\n");

    out.push_str("pub(crate) static DOCUMENTS: &[(&str, &str)] = &[\n");
    for entry in registry.post.iter().filter(|e| e.external_link.is_none()) {
        let document = document_path(&documents_dir, &entry.id);
        if !document.is_file() {
            return Err(format!(
                "post '{}' has no external_link and no document at {}",
                entry.id,
                document.display()
            )
            .into());
        }
        println!("cargo:rerun-if-changed={}", document.display());
        writeln!(
            out,
            "    ({:?}, include_str!({:?})),",
            entry.id,
            document.display().to_string()
        )?;
    }
    out.push_str("];\n");

    for stray in unregistered_documents(&documents_dir, &registry.post)? {
        println!(
            "cargo:warning=content/posts/{stray} has no entry in posts.toml and will not be served"
        );
    }

    let out_path = PathBuf::from(std::env::var("OUT_DIR")?).join("builtin_posts.rs");
    std::fs::write(out_path, out)?;

    Ok(())
}

fn document_path(dir: &Path, id: &str) -> PathBuf {
    dir.join(format!("{id}.md"))
}

/// Markdown files in `dir` whose stem is not a local post identifier.
fn unregistered_documents(dir: &Path, posts: &[PostEntry]) -> std::io::Result<Vec<String>> {
    let local: HashSet<&str> = posts
        .iter()
        .filter(|e| e.external_link.is_none())
        .map(|e| e.id.as_str())
        .collect();

    let mut stray = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("md") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if !local.contains(stem) {
            stray.extend(path.file_name().and_then(|n| n.to_str()).map(str::to_string));
        }
    }
    stray.sort();
    Ok(stray)
}

//! Application configuration loaded from environment variables.

use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:3000").
    pub bind_addr: String,

    /// Public base URL of the site, without a trailing slash.
    /// Used for canonical URLs and absolute OG image links.
    pub base_url: String,

    /// Site name shown in page titles, OG tags and preview cards.
    pub site_name: String,

    /// Author name shown on the home page and preview cards.
    pub author: String,

    /// Directory of static assets served as-is (images, favicon).
    pub public_dir: PathBuf,

    /// Optional image composited as a round avatar on preview cards.
    pub avatar_path: Option<PathBuf>,

    /// Optional directory of extra fonts for preview cards.
    pub font_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            base_url: "http://localhost:3000".to_string(),
            site_name: "divpundir.com".to_string(),
            author: "divyanshu pundir".to_string(),
            public_dir: PathBuf::from("public"),
            avatar_path: None,
            font_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// All variables are optional:
    /// - `FOLIO_BIND_ADDR`: Server bind address (default: "0.0.0.0:3000")
    /// - `FOLIO_BASE_URL`: Base URL for links/OG tags (default: "http://localhost:3000")
    /// - `FOLIO_SITE_NAME`: Site name (default: "divpundir.com")
    /// - `FOLIO_AUTHOR`: Author name (default: "divyanshu pundir")
    /// - `FOLIO_PUBLIC_DIR`: Static asset directory (default: "public")
    /// - `FOLIO_AVATAR_PATH`: Avatar image for preview cards
    /// - `FOLIO_FONT_DIR`: Extra fonts for preview cards
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let bind_addr = std::env::var("FOLIO_BIND_ADDR").unwrap_or(defaults.bind_addr);

        let base_url = std::env::var("FOLIO_BASE_URL")
            .unwrap_or(defaults.base_url)
            .trim_end_matches('/')
            .to_string();

        let site_name = std::env::var("FOLIO_SITE_NAME").unwrap_or(defaults.site_name);

        let author = std::env::var("FOLIO_AUTHOR").unwrap_or(defaults.author);

        let public_dir = std::env::var("FOLIO_PUBLIC_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.public_dir);

        let avatar_path = non_empty_var("FOLIO_AVATAR_PATH").map(PathBuf::from);
        let font_dir = non_empty_var("FOLIO_FONT_DIR").map(PathBuf::from);

        tracing::info!(
            bind_addr = %bind_addr,
            base_url = %base_url,
            site_name = %site_name,
            public_dir = %public_dir.display(),
            avatar = avatar_path.is_some(),
            "site configuration loaded"
        );

        Ok(Self {
            bind_addr,
            base_url,
            site_name,
            author,
            public_dir,
            avatar_path,
            font_dir,
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

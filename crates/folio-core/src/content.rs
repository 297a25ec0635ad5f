//! Post documents and their rendering to HTML.
//!
//! Documents are Markdown, keyed by post identifier. The shipped documents
//! are compiled in by the build script, which also guarantees every local
//! post in `content/posts.toml` has one.

use std::borrow::Cow;
use std::collections::HashMap;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd, html as md_html};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{IncludeBackground, styled_line_to_highlighted_html};
use syntect::parsing::{SyntaxDefinition, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::error::{Error, Result};

/// Theme used for fenced code blocks.
pub const CODE_THEME: &str = "base16-ocean.dark";

/// Grammars shipped alongside syntect's defaults.
const EXTRA_SYNTAXES: &[(&str, &str)] = &[(
    "Kotlin",
    include_str!("../syntaxes/Kotlin.sublime-syntax"),
)];

/// A post document rendered to HTML, ready to embed in a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedContent {
    pub html: String,
}

/// Markdown to HTML renderer with GitHub-flavored extensions and
/// syntax-highlighted code blocks.
#[derive(Debug)]
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme: Theme,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new(CODE_THEME)
    }
}

impl MarkdownRenderer {
    /// Create a renderer using one of syntect's bundled themes.
    ///
    /// Unknown theme names fall back to syntect's default theme.
    pub fn new(theme: &str) -> Self {
        let mut themes = ThemeSet::load_defaults();
        let theme = themes.themes.remove(theme).unwrap_or_else(|| {
            tracing::warn!(theme, "unknown code theme, using default");
            Theme::default()
        });

        Self {
            syntax_set: load_syntax_set(),
            theme,
        }
    }

    /// Render Markdown to HTML.
    pub fn render(&self, markdown: &str) -> String {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_HEADING_ATTRIBUTES);

        let mut events = Vec::new();
        // (language, accumulated source) of the code block being read
        let mut code_block: Option<(Option<String>, String)> = None;

        for event in Parser::new_ext(markdown, options) {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split_whitespace()
                            .next()
                            .map(str::to_string),
                        CodeBlockKind::Indented => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::Text(text) if code_block.is_some() => {
                    if let Some((_, source)) = code_block.as_mut() {
                        source.push_str(&text);
                    }
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, source)) = code_block.take() {
                        events.push(Event::Html(self.highlight(&source, lang.as_deref()).into()));
                    }
                }
                other => events.push(other),
            }
        }

        let mut html = String::with_capacity(markdown.len() * 2);
        md_html::push_html(&mut html, events.into_iter());
        html
    }

    fn highlight(&self, code: &str, lang: Option<&str>) -> String {
        let syntax = lang
            .and_then(|token| self.syntax_set.find_syntax_by_token(token))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        match self.highlight_lines(code, syntax) {
            Ok(body) => format!("<pre><code{}>{body}</code></pre>", language_class(lang)),
            Err(err) => {
                tracing::warn!(error = %err, lang, "syntax highlighting failed");
                format!("<pre><code{}>{}</code></pre>", language_class(lang), escape_html(code))
            }
        }
    }

    /// Colored spans for `code`. Backgrounds are left to the page stylesheet.
    fn highlight_lines(
        &self,
        code: &str,
        syntax: &syntect::parsing::SyntaxReference,
    ) -> std::result::Result<String, syntect::Error> {
        let mut highlighter = HighlightLines::new(syntax, &self.theme);
        let mut html = String::with_capacity(code.len() * 4);
        for line in LinesWithEndings::from(code) {
            let regions = highlighter.highlight_line(line, &self.syntax_set)?;
            html.push_str(&styled_line_to_highlighted_html(
                &regions[..],
                IncludeBackground::No,
            )?);
        }
        Ok(html)
    }
}

/// syntect's default grammars plus [`EXTRA_SYNTAXES`].
fn load_syntax_set() -> SyntaxSet {
    let mut builder = SyntaxSet::load_defaults_newlines().into_builder();
    for (name, source) in EXTRA_SYNTAXES {
        match SyntaxDefinition::load_from_str(source, true, None) {
            Ok(definition) => builder.add(definition),
            Err(err) => tracing::warn!(syntax = name, error = %err, "bundled syntax failed to load"),
        }
    }
    builder.build()
}

fn language_class(lang: Option<&str>) -> String {
    lang.map(|l| format!(" class=\"language-{}\"", escape_html(l)))
        .unwrap_or_default()
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Identifier-keyed table of post documents.
#[derive(Debug)]
pub struct ContentLibrary {
    documents: HashMap<String, Cow<'static, str>>,
    renderer: MarkdownRenderer,
}

impl ContentLibrary {
    /// The documents compiled in from `content/posts/`.
    pub fn builtin() -> Self {
        Self::from_documents(crate::builtin::DOCUMENTS.iter().copied())
    }

    /// Build a library from `(identifier, markdown)` pairs.
    pub fn from_documents<I, K, V>(documents: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Cow<'static, str>>,
    {
        Self {
            documents: documents
                .into_iter()
                .map(|(id, doc)| (id.into(), doc.into()))
                .collect(),
            renderer: MarkdownRenderer::default(),
        }
    }

    /// Whether a document is registered for `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.documents.contains_key(id)
    }

    /// Identifiers of every stored document, in no particular order.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }

    /// Load and render the document for `id`.
    pub fn load(&self, id: &str) -> Result<RenderedContent> {
        let source = self
            .documents
            .get(id)
            .ok_or_else(|| Error::ContentMissing(id.to_string()))?;

        Ok(RenderedContent {
            html: self.renderer.render(source),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> MarkdownRenderer {
        MarkdownRenderer::default()
    }

    #[test]
    fn render_markdown_empty() {
        assert!(renderer().render("").is_empty());
    }

    #[test]
    fn render_markdown_paragraph_and_headings() {
        let html = renderer().render("# Title\n\n## Section\n\nHello, world!");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<h2>Section</h2>"));
        assert!(html.contains("<p>Hello, world!</p>"));
    }

    #[test]
    fn render_markdown_gfm_table() {
        let html = renderer().render("| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn render_markdown_strikethrough_and_tasks() {
        let html = renderer().render("~~gone~~\n\n- [x] done\n- [ ] todo");
        assert!(html.contains("<del>gone</del>"));
        assert!(html.contains("checkbox"));
    }

    #[test]
    fn render_markdown_fenced_code_is_highlighted() {
        let html = renderer().render("```rust\nfn main() {}\n```");
        assert!(html.contains("<pre"));
        assert!(html.contains("style="));
        assert!(html.contains("main"));
        assert!(html.contains("<code class=\"language-rust\">"));
    }

    /// Distinct span colors in highlighted output.
    fn span_colors(html: &str) -> std::collections::HashSet<&str> {
        html.split("<span style=\"color:")
            .skip(1)
            .filter_map(|rest| rest.split(';').next())
            .collect()
    }

    #[test]
    fn render_markdown_kotlin_is_highlighted() {
        let html = renderer().render("```kotlin\nval x = 1\n```");
        assert!(
            span_colors(&html).len() > 1,
            "kotlin block rendered as plain text: {html}"
        );
        assert!(html.contains("<code class=\"language-kotlin\">"));
    }

    #[test]
    fn kotlin_syntax_is_registered() {
        let renderer = renderer();
        assert!(renderer.syntax_set.find_syntax_by_token("kotlin").is_some());
        assert!(renderer.syntax_set.find_syntax_by_token("kt").is_some());
    }

    #[test]
    fn highlighted_code_has_no_background() {
        let html = renderer().render("```rust\nlet x = 1;\n```");
        assert!(!html.contains("background-color"));
        assert!(html.starts_with("<pre><code"));
    }

    #[test]
    fn builtin_kotlin_posts_are_highlighted() {
        let library = ContentLibrary::builtin();
        let content = library.load("advanced-mavlink-kotlin-part-1").unwrap();
        assert!(content.html.contains("language-kotlin"));
        assert!(span_colors(&content.html).len() > 1);
    }

    #[test]
    fn render_markdown_unknown_language_still_renders() {
        let html = renderer().render("```nosuchlang\na < b\n```");
        assert!(html.contains("<pre"));
        assert!(html.contains("&lt;"));
    }

    #[test]
    fn render_markdown_inline_code() {
        let html = renderer().render("use `cargo`");
        assert!(html.contains("<code>cargo</code>"));
    }

    #[test]
    fn unknown_theme_falls_back() {
        let html = MarkdownRenderer::new("no-such-theme").render("```\nx\n```");
        assert!(html.contains("<pre"));
    }

    #[test]
    fn escape_html_specials() {
        assert_eq!(escape_html("<a href=\"x\">&</a>"), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
    }

    #[test]
    fn library_load_present() {
        let library = ContentLibrary::from_documents([("a", "Hello from **a**")]);
        let content = library.load("a").unwrap();
        assert!(content.html.contains("<strong>a</strong>"));
    }

    #[test]
    fn library_load_missing() {
        let library = ContentLibrary::from_documents([("a", "A")]);
        assert_eq!(
            library.load("b").unwrap_err(),
            Error::ContentMissing("b".to_string())
        );
    }

    #[test]
    fn library_load_idempotent() {
        let library = ContentLibrary::from_documents([("a", "```kotlin\nval x = 1\n```")]);
        assert_eq!(library.load("a").unwrap(), library.load("a").unwrap());
    }

    #[test]
    fn library_identifiers() {
        let library = ContentLibrary::from_documents([("a", "A"), ("b", "B")]);
        let mut ids: Vec<&str> = library.identifiers().collect();
        ids.sort_unstable();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn builtin_library_has_documents() {
        let library = ContentLibrary::builtin();
        assert!(library.contains("next-js-mdx"));
        assert!(!library.contains("mavlink-kotlin-intro"));
    }
}

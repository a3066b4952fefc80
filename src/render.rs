//! HTML page rendering.
//!
//! Turns a parsed [`Document`] plus a per-page [`RenderingContext`] into a
//! complete HTML document. Uses [maud](https://maud.lambda.xyz/) for
//! compile-time templating: malformed markup is a build error, interpolation
//! is auto-escaped, and there is no template directory to ship.
//!
//! All intra-site links are relative. The context's `path_to_root` prefix
//! (`"../"` per folder level) carries every generated page back to the site
//! root, so an exported tree can be served from any sub-path or opened
//! straight from the filesystem.

use crate::archive::{Document, Reference, TopicSection};
use maud::{DOCTYPE, Markup, html};
use std::collections::BTreeMap;
use std::path::Path;

/// Per-page rendering configuration.
///
/// Ephemeral: built for one render call and discarded. The index variant
/// of a page gets its own context with one extra `../` level, since the
/// variant lives one directory deeper than the normal page.
pub struct RenderingContext<'a> {
    /// `"../"` repeated once per folder level.
    pub path_to_root: String,
    /// The document's cross-reference table.
    pub references: &'a BTreeMap<String, Reference>,
    /// Whether this render is the `index.html` landing variant.
    pub is_index: bool,
    /// Whether navigation links point at directory-style `index.html`
    /// targets instead of bare directory prefixes.
    pub index_links: bool,
}

/// Render a full HTML document for one page.
pub fn render_page(doc: &Document, ctx: &RenderingContext) -> Markup {
    let abstract_text = doc.abstract_text();

    let content = html! {
        header.site-header {
            nav.breadcrumb {
                a href=(home_href(ctx)) { "Home" }
            }
        }
        main.doc-page {
            h1 { (doc.title()) }
            @if !abstract_text.is_empty() {
                p.abstract { (abstract_text) }
            }
            @for section in &doc.topic_sections {
                (topic_section(section, ctx))
            }
        }
    };

    base_document(doc.title(), ctx, content)
}

/// The base HTML document shell: head with stylesheet link, titled body.
fn base_document(title: &str, ctx: &RenderingContext, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="stylesheet" href={ (ctx.path_to_root) "css/site.css" };
            }
            body class=[ctx.is_index.then_some("index-page")] {
                (content)
            }
        }
    }
}

/// One topic section: heading plus a link list of resolved references.
fn topic_section(section: &TopicSection, ctx: &RenderingContext) -> Markup {
    html! {
        section.topics {
            @if !section.title.is_empty() {
                h2 { (section.title) }
            }
            ul {
                @for identifier in &section.identifiers {
                    li {
                        @match resolve(identifier, ctx) {
                            Some((title, Some(href))) => {
                                a href=(href) { (title) }
                            }
                            Some((title, None)) => { (title) }
                            None => { code { (identifier) } }
                        }
                    }
                }
            }
        }
    }
}

/// Resolve a reference identifier to its display title and relative href.
///
/// Unresolvable identifiers (not in the reference table) yield `None` and
/// are rendered as literal text rather than broken links.
fn resolve<'a>(
    identifier: &'a str,
    ctx: &'a RenderingContext,
) -> Option<(&'a str, Option<String>)> {
    let reference = ctx.references.get(identifier)?;
    let title = reference.title.as_deref().unwrap_or(identifier);
    let href = reference
        .url
        .as_deref()
        .map(|url| reference_href(url, &ctx.path_to_root));
    Some((title, href))
}

/// Rewrite a site-absolute reference URL to a page-relative href.
///
/// Topic references have extensionless URLs (`/documentation/Foo/Bar`) and
/// gain a `.html` suffix; media references keep their extension.
fn reference_href(url: &str, path_to_root: &str) -> String {
    let rel = url.trim_start_matches('/');
    let (path_part, fragment) = match rel.split_once('#') {
        Some((p, f)) => (p, Some(f)),
        None => (rel, None),
    };

    let mut href = if Path::new(path_part).extension().is_some() {
        format!("{path_to_root}{path_part}")
    } else {
        format!("{path_to_root}{path_part}.html")
    };
    if let Some(fragment) = fragment {
        href.push('#');
        href.push_str(fragment);
    }
    href
}

/// Breadcrumb link back to the site root.
fn home_href(ctx: &RenderingContext) -> String {
    if ctx.index_links {
        format!("{}index.html", ctx.path_to_root)
    } else {
        ctx.path_to_root.clone()
    }
}

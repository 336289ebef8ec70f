//! HTML parser turning pages into Markdown and raw links
//!
//! This module handles parsing HTML content to extract:
//! - The page title and `description`/`keywords` metadata
//! - Content blocks (headings, paragraphs, lists, tables, quotes, code)
//! - Links to follow, with their text, classes and id
//!
//! Everything inside boilerplate elements (`script`, `style`, `header`,
//! `footer`, `nav`, `aside`, `form`, `iframe`, `button`, `noscript`) is
//! ignored, links included.

use crate::crawler::extractor::RawLink;
use crate::filter::LinkMeta;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use url::Url;

const BOILERPLATE_TAGS: &[&str] = &[
    "script", "style", "header", "footer", "nav", "aside", "form", "iframe", "button", "noscript",
];

/// Blocks rendered as a whole; block elements nested inside them are skipped
const CONTAINER_TAGS: &[&str] = &["ul", "ol", "table", "blockquote", "pre"];

static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());
static DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[name="description"]"#).unwrap());
static KEYWORDS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[name="keywords"]"#).unwrap());
static BLOCKS: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("p, h1, h2, h3, h4, h5, h6, ul, ol, table, blockquote, pre").unwrap()
});
static ROWS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());
static CELLS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("th, td").unwrap());
static ANCHORS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// The page title (from <title> tag)
    pub title: Option<String>,

    /// `<meta name="description">` content
    pub description: Option<String>,

    /// `<meta name="keywords">` content
    pub keywords: Option<String>,

    /// Markdown blocks in document order
    pub blocks: Vec<String>,

    /// Links outside boilerplate, in document order
    pub links: Vec<RawLink>,
}

/// Parses HTML content into content blocks, metadata and links
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` tags outside boilerplate elements
///
/// **Exclude:**
/// - Links inside `nav`, `header`, `footer` and the other boilerplate tags
/// - `<a href="..." download>`
///
/// Hrefs are returned untouched; resolving them is the caller's job.
///
/// # Example
///
/// ```
/// use site_archiver::crawler::parse_html;
///
/// let html = r#"<html><head><title>Test</title></head><body><p>Hi</p><a href="/page">Link</a></body></html>"#;
/// let parsed = parse_html(html);
/// assert_eq!(parsed.title, Some("Test".to_string()));
/// assert_eq!(parsed.links[0].href, "/page");
/// ```
pub fn parse_html(html: &str) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: extract_title(&document),
        description: extract_meta(&document, &DESCRIPTION),
        keywords: extract_meta(&document, &KEYWORDS),
        blocks: extract_blocks(&document),
        links: extract_links(&document),
    }
}

/// Renders a parsed page as the archived Markdown document
///
/// # Arguments
///
/// * `page` - The parsed page
/// * `url` - Source URL, also the title fallback (its host)
/// * `depth` - Crawl depth of the page
/// * `converted_at` - Timestamp to stamp the document with
pub fn render_document(page: &ParsedPage, url: &Url, depth: u32, converted_at: &str) -> String {
    let title = page
        .title
        .clone()
        .or_else(|| url.host_str().map(str::to_string))
        .unwrap_or_else(|| url.to_string());

    let mut md = String::new();
    md.push_str(&format!("# {}\n\n", title));
    md.push_str(&format!("**Source URL:** {}\n", url));
    md.push_str(&format!("**Converted:** {}\n", converted_at));
    md.push_str(&format!("**Depth:** {}\n", depth));
    if let Some(description) = &page.description {
        md.push_str(&format!("**Description:** {}\n", description));
    }
    if let Some(keywords) = &page.keywords {
        md.push_str(&format!("**Keywords:** {}\n", keywords));
    }

    md.push_str("\n## Content\n\n");
    if page.blocks.is_empty() {
        md.push_str("_No content extracted._\n");
    } else {
        md.push_str(&page.blocks.join("\n\n"));
        md.push('\n');
    }

    md
}

fn extract_title(document: &Html) -> Option<String> {
    document
        .select(&TITLE)
        .next()
        .map(|element| collapse_whitespace(&element.text().collect::<String>()))
        .filter(|s| !s.is_empty())
}

fn extract_meta(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .and_then(|element| element.value().attr("content"))
        .map(collapse_whitespace)
        .filter(|s| !s.is_empty())
}

fn extract_blocks(document: &Html) -> Vec<String> {
    document
        .select(&BLOCKS)
        .filter(|element| !in_boilerplate(element) && !in_container(element))
        .filter_map(render_block)
        .filter(|block| !block.trim().is_empty())
        .collect()
}

fn extract_links(document: &Html) -> Vec<RawLink> {
    let mut links = Vec::new();

    for element in document.select(&ANCHORS) {
        if in_boilerplate(&element) || element.value().attr("download").is_some() {
            continue;
        }

        if let Some(href) = element.value().attr("href") {
            links.push(RawLink {
                href: href.to_string(),
                meta: LinkMeta {
                    text: collapse_whitespace(&element.text().collect::<String>()),
                    classes: element.value().classes().map(str::to_string).collect(),
                    id: element.value().id().map(str::to_string),
                },
            });
        }
    }

    links
}

fn render_block(element: ElementRef<'_>) -> Option<String> {
    let name = element.value().name();
    let block = match name {
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            let level = name[1..].parse::<usize>().unwrap_or(1);
            let text = collapse_whitespace(&visible_text(element));
            if text.is_empty() {
                return None;
            }
            format!("{} {}", "#".repeat(level), text)
        }
        "p" => collapse_whitespace(&visible_text(element)),
        "ul" | "ol" => render_list(element, name == "ol"),
        "table" => render_table(element),
        "blockquote" => collapse_whitespace(&visible_text(element))
            .lines()
            .map(|line| format!("> {}", line))
            .collect::<Vec<_>>()
            .join("\n"),
        "pre" => {
            let code = visible_text(element);
            let code = code.trim_matches('\n');
            if code.trim().is_empty() {
                return None;
            }
            format!("```\n{}\n```", code)
        }
        _ => return None,
    };

    Some(block)
}

/// Direct `li` children only; nested lists are flattened into their item
fn render_list(list: ElementRef<'_>, ordered: bool) -> String {
    list.children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "li")
        .map(|item| collapse_whitespace(&visible_text(item)))
        .filter(|text| !text.is_empty())
        .enumerate()
        .map(|(i, text)| {
            if ordered {
                format!("{}. {}", i + 1, text)
            } else {
                format!("- {}", text)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_table(table: ElementRef<'_>) -> String {
    let mut lines = Vec::new();

    for row in table.select(&ROWS) {
        let cells: Vec<String> = row
            .select(&CELLS)
            .map(|cell| collapse_whitespace(&visible_text(cell)).replace('|', "\\|"))
            .collect();
        if cells.is_empty() {
            continue;
        }

        lines.push(format!("| {} |", cells.join(" | ")));
        if lines.len() == 1 {
            lines.push(format!("|{}", " --- |".repeat(cells.len())));
        }
    }

    lines.join("\n")
}

/// Text of an element, without text that sits inside boilerplate
fn visible_text(element: ElementRef<'_>) -> String {
    let mut text = String::new();

    for node in element.descendants() {
        if let Some(fragment) = node.value().as_text() {
            let hidden = node
                .ancestors()
                .filter_map(|ancestor| ancestor.value().as_element())
                .any(|e| BOILERPLATE_TAGS.contains(&e.name()));
            if !hidden {
                text.push_str(fragment);
            }
        }
    }

    text
}

fn in_boilerplate(element: &ElementRef<'_>) -> bool {
    BOILERPLATE_TAGS.contains(&element.value().name())
        || element
            .ancestors()
            .filter_map(|node| node.value().as_element())
            .any(|e| BOILERPLATE_TAGS.contains(&e.name()))
}

fn in_container(element: &ElementRef<'_>) -> bool {
    element
        .ancestors()
        .filter_map(|node| node.value().as_element())
        .any(|e| CONTAINER_TAGS.contains(&e.name()))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

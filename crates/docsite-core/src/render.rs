//! Markdown to HTML conversion with table-of-contents extraction.
//!
//! Every heading is rendered with a sequential `id="toc-<n>"` so the table of
//! contents can link to it. [`render_text`] walks the same event stream to
//! produce plain text for terminals.

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd};

use crate::models::{Document, RenderedPage, TocEntry};

fn options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Render a document into a cacheable [`RenderedPage`].
pub fn render_page(doc: &Document) -> RenderedPage {
    let (html, toc) = render_markdown(&doc.text);
    RenderedPage {
        page: doc.page,
        title: doc.title.clone(),
        html,
        toc,
        text: render_text(&doc.text),
    }
}

/// Convert markdown to HTML and collect the headings it contains.
pub fn render_markdown(text: &str) -> (String, Vec<TocEntry>) {
    let mut toc = Vec::new();
    let mut events = Vec::new();
    let mut open: Option<TocEntry> = None;

    for event in Parser::new_ext(text, options()) {
        match event {
            Event::Start(Tag::Heading {
                level,
                classes,
                attrs,
                ..
            }) => {
                let anchor = format!("toc-{}", toc.len());
                open = Some(TocEntry {
                    level: level as u8,
                    text: String::new(),
                    anchor: anchor.clone(),
                });
                events.push(Event::Start(Tag::Heading {
                    level,
                    id: Some(CowStr::from(anchor)),
                    classes,
                    attrs,
                }));
            }
            Event::End(TagEnd::Heading(level)) => {
                if let Some(mut entry) = open.take() {
                    entry.text = entry.text.trim().to_string();
                    toc.push(entry);
                }
                events.push(Event::End(TagEnd::Heading(level)));
            }
            Event::Text(ref t) | Event::Code(ref t) => {
                if let Some(entry) = open.as_mut() {
                    entry.text.push_str(t);
                }
                events.push(event);
            }
            other => events.push(other),
        }
    }

    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, events.into_iter());
    (out, toc)
}

/// Convert markdown to plain text: markup and raw HTML dropped, list items
/// bulleted or numbered, code blocks kept verbatim, at most one blank line
/// between blocks.
pub fn render_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    // One entry per open list: the next ordinal for ordered lists.
    let mut lists: Vec<Option<u64>> = Vec::new();

    for event in Parser::new_ext(text, options()) {
        match event {
            Event::Start(Tag::List(start)) => {
                end_line(&mut out);
                lists.push(start);
            }
            Event::End(TagEnd::List(_)) => {
                lists.pop();
                if lists.is_empty() {
                    end_block(&mut out);
                }
            }
            Event::Start(Tag::Item) => {
                end_line(&mut out);
                out.push_str(&"  ".repeat(lists.len().saturating_sub(1)));
                match lists.last_mut() {
                    Some(Some(n)) => {
                        out.push_str(&format!("{}. ", n));
                        *n += 1;
                    }
                    _ => out.push_str("- "),
                }
            }
            Event::End(TagEnd::Item) | Event::End(TagEnd::TableHead) | Event::End(TagEnd::TableRow) => {
                end_line(&mut out)
            }
            Event::End(TagEnd::Paragraph) if !lists.is_empty() => end_line(&mut out),
            Event::End(TagEnd::Paragraph)
            | Event::End(TagEnd::Heading(_))
            | Event::End(TagEnd::CodeBlock)
            | Event::End(TagEnd::Table) => end_block(&mut out),
            Event::End(TagEnd::TableCell) => out.push_str(" | "),
            Event::Text(t) | Event::Code(t) => out.push_str(&t),
            Event::SoftBreak => out.push(' '),
            Event::HardBreak => out.push('\n'),
            Event::Rule => {
                end_line(&mut out);
                out.push_str("----");
                end_block(&mut out);
            }
            Event::TaskListMarker(done) => out.push_str(if done { "[x] " } else { "[ ] " }),
            _ => {}
        }
    }

    out.trim_end().to_string()
}

fn end_line(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

fn end_block(out: &mut String) {
    end_line(out);
    if !out.is_empty() && !out.ends_with("\n\n") {
        out.push('\n');
    }
}

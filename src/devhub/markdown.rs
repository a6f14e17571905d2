//! Markdown to terminal-friendly spans. Message bodies and post
//! descriptions are markdown; the core stores them raw and this module
//! flattens them into styled text runs for the CLI to colorize. No HTML is
//! ever produced.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanStyle {
    Plain,
    Strong,
    Emphasis,
    Code,
    Heading,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub style: SpanStyle,
}

impl Span {
    fn new(text: impl Into<String>, style: SpanStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// Walks the event stream once, tracking the innermost inline style.
/// Block structure degrades to blank lines and bullet markers.
pub fn render_spans(markdown: &str) -> Vec<Span> {
    let parser = Parser::new_ext(markdown, Options::ENABLE_STRIKETHROUGH);
    let mut spans: Vec<Span> = Vec::new();
    let mut style_stack: Vec<SpanStyle> = Vec::new();
    let mut list_depth: usize = 0;

    let current = |stack: &[SpanStyle]| *stack.last().unwrap_or(&SpanStyle::Plain);

    for event in parser {
        match event {
            Event::Start(Tag::Heading { .. }) => style_stack.push(SpanStyle::Heading),
            Event::End(TagEnd::Heading(_)) => {
                style_stack.pop();
                spans.push(Span::new("\n\n", SpanStyle::Plain));
            }
            Event::Start(Tag::Strong) => style_stack.push(SpanStyle::Strong),
            Event::End(TagEnd::Strong) => {
                style_stack.pop();
            }
            Event::Start(Tag::Emphasis) => style_stack.push(SpanStyle::Emphasis),
            Event::End(TagEnd::Emphasis) => {
                style_stack.pop();
            }
            Event::Start(Tag::CodeBlock(_)) => style_stack.push(SpanStyle::Code),
            Event::End(TagEnd::CodeBlock) => {
                style_stack.pop();
                spans.push(Span::new("\n", SpanStyle::Plain));
            }
            Event::Start(Tag::List(_)) => list_depth += 1,
            Event::End(TagEnd::List(_)) => {
                list_depth = list_depth.saturating_sub(1);
                if list_depth == 0 {
                    spans.push(Span::new("\n", SpanStyle::Plain));
                }
            }
            Event::Start(Tag::Item) => {
                let indent = "  ".repeat(list_depth.saturating_sub(1));
                spans.push(Span::new(format!("{}• ", indent), SpanStyle::Plain));
            }
            Event::End(TagEnd::Item) => spans.push(Span::new("\n", SpanStyle::Plain)),
            Event::End(TagEnd::Paragraph) => {
                if list_depth == 0 {
                    spans.push(Span::new("\n\n", SpanStyle::Plain));
                }
            }
            Event::Text(text) => spans.push(Span::new(text.to_string(), current(&style_stack))),
            Event::Code(code) => spans.push(Span::new(code.to_string(), SpanStyle::Code)),
            Event::SoftBreak | Event::HardBreak => {
                spans.push(Span::new("\n", SpanStyle::Plain));
            }
            _ => {}
        }
    }

    // trim trailing block separators so callers control spacing
    while matches!(spans.last(), Some(s) if s.style == SpanStyle::Plain && s.text.chars().all(|c| c == '\n')) {
        spans.pop();
    }
    spans
}

/// The spans joined without styling; what `--no-color` output shows.
pub fn render_plain(markdown: &str) -> String {
    render_spans(markdown)
        .into_iter()
        .map(|span| span.text)
        .collect()
}

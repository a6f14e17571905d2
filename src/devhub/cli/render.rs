//! Turns view models into terminal text. Templates carry the layout,
//! the palette carries the colors, and this module builds the data each
//! template consumes.

use chrono::{DateTime, Utc};
use minijinja::Environment;
use serde_json::{json, Value};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use devhub::error::{HubError, Result};
use devhub::markdown::{self, SpanStyle};
use devhub::model::{Comment, EntityId, EntityKind, FeedItem, Post};
use devhub::router::ViewModel;

use super::styles::{self, Palette};
use super::templates;

const BOARD_TITLE_WIDTH: usize = 36;

pub struct HubRenderer {
    env: Environment<'static>,
    palette: &'static Palette,
    use_color: bool,
}

impl HubRenderer {
    pub fn new(palette: &'static Palette, use_color: bool) -> Result<Self> {
        let mut env = Environment::new();
        env.add_filter("style", move |text: String, name: String| {
            palette.apply(&name, &text, use_color)
        });
        for (name, source) in templates::ALL {
            env.add_template(name, source).map_err(template_error)?;
        }
        Ok(Self {
            env,
            palette,
            use_color,
        })
    }

    /// Renders the active view. `favorites` marks starred posts on the
    /// board and single-post screens.
    pub fn render_view(&self, view: &ViewModel, favorites: &[EntityId]) -> Result<String> {
        match view {
            ViewModel::Feed(items) => {
                let items: Vec<Value> = items.iter().map(|i| self.feed_item(i)).collect();
                self.render("feed", json!({ "items": items }))
            }
            ViewModel::Subjects(subjects) => {
                self.render("subjects", json!({ "subjects": subjects }))
            }
            ViewModel::Board { subject, posts } => {
                let header = subject.clone().unwrap_or_else(|| "All posts".to_string());
                let posts: Vec<Value> = posts
                    .iter()
                    .map(|p| self.board_row(p, favorites.contains(&p.id)))
                    .collect();
                self.render("board", json!({ "header": header, "posts": posts }))
            }
            ViewModel::Post { post, comments } => {
                let comments_json: Vec<Value> =
                    comments.iter().map(|c| self.comment_row(c)).collect();
                self.render(
                    "post",
                    json!({
                        "post": self.post_detail(post, favorites.contains(&post.id)),
                        "comments": comments_json,
                        "comments_header": format!("Comments ({})", comments.len()),
                    }),
                )
            }
        }
    }

    fn render(&self, name: &str, ctx: Value) -> Result<String> {
        let template = self.env.get_template(name).map_err(template_error)?;
        template.render(ctx).map_err(template_error)
    }

    fn feed_item(&self, item: &FeedItem) -> Value {
        let (badge, badge_style) = match item.kind() {
            EntityKind::Message => ("said", "badge_message"),
            EntityKind::Post => ("shared a snippet", "badge_post"),
            EntityKind::Comment => ("commented", "badge_comment"),
        };
        let (body, reply) = match item {
            FeedItem::Message(m) => (
                self.markdown_to_ansi(&m.text),
                m.reply_to.as_ref().map(reply_note),
            ),
            FeedItem::Post(p) => {
                let title = self.palette.apply("title", &p.title, self.use_color);
                let subject = self.palette.apply("subject", &p.subject, self.use_color);
                let language = self.palette.apply("language", &p.language, self.use_color);
                (format!("{} in {} ({})", title, subject, language), None)
            }
            FeedItem::Comment(c) => (
                self.markdown_to_ansi(&c.text),
                Some(reply_note(&c.post_id)),
            ),
        };
        json!({
            "avatar": styles::avatar(item.author(), self.use_color),
            "author": item.author(),
            "badge": badge,
            "badge_style": badge_style,
            "time": format_time_ago(item.timestamp()),
            "reply": reply,
            "body": body,
        })
    }

    fn board_row(&self, post: &Post, is_favorite: bool) -> Value {
        json!({
            "marker": if is_favorite { "★ " } else { "" },
            "number": post
                .post_number
                .map(|n| format!("#{} ", n))
                .unwrap_or_default(),
            "title": pad_to_width(&post.title, BOARD_TITLE_WIDTH),
            "language": post.language,
            "author": post.author,
            "time": format_time_ago(post.timestamp),
        })
    }

    fn post_detail(&self, post: &Post, is_favorite: bool) -> Value {
        let mut meta = format!("{} · {}", post.subject, post.language);
        if let Some(n) = post.post_number {
            meta.push_str(&format!(" · #{}", n));
        }
        meta.push_str(&format!(
            " · by {} · {}",
            post.author,
            format_time_ago(post.timestamp)
        ));
        let description = if post.description.trim().is_empty() {
            None
        } else {
            Some(self.markdown_to_ansi(&post.description))
        };
        json!({
            "marker": if is_favorite { "★ " } else { "" },
            "title": post.title,
            "meta": meta,
            "description": description,
            "code_header": format!("── {} ──", post.language),
            "code": self.palette.apply("code", &post.code, self.use_color),
            "image_note": post.image.as_ref().map(|_| {
                format!(
                    "(image attached; `devhub post image {}` saves it)",
                    post.id
                )
            }),
        })
    }

    fn comment_row(&self, comment: &Comment) -> Value {
        json!({
            "avatar": styles::avatar(&comment.author, self.use_color),
            "author": comment.author,
            "time": format_time_ago(comment.timestamp),
            "text": self.markdown_to_ansi(&comment.text),
        })
    }

    fn markdown_to_ansi(&self, text: &str) -> String {
        markdown::render_spans(text)
            .iter()
            .map(|span| match span.style {
                SpanStyle::Plain => span.text.clone(),
                SpanStyle::Strong => self.palette.apply("strong", &span.text, self.use_color),
                SpanStyle::Emphasis => self.palette.apply("emphasis", &span.text, self.use_color),
                SpanStyle::Code => self.palette.apply("code", &span.text, self.use_color),
                SpanStyle::Heading => self.palette.apply("heading", &span.text, self.use_color),
            })
            .collect()
    }
}

fn template_error(err: minijinja::Error) -> HubError {
    HubError::Api(format!("Template error: {}", err))
}

fn reply_note(target: &EntityId) -> String {
    // char-wise cut: foreign ids from migrated stores may be non-ASCII
    let short: String = target.as_str().chars().take(13).collect();
    format!("  ↳ in reply to {}", short)
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let seconds = (Utc::now() - timestamp).num_seconds().max(0) as u64;
    timeago::Formatter::new().convert(std::time::Duration::from_secs(seconds))
}

/// Truncates on display width (wide glyphs count double) and pads the
/// remainder so board columns line up.
fn pad_to_width(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0usize;
    for c in text.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > width.saturating_sub(1) && UnicodeWidthStr::width(text) > width {
            out.push('…');
            used += 1;
            break;
        }
        out.push(c);
        used += w;
    }
    while used < width {
        out.push(' ');
        used += 1;
    }
    out
}

//! Terminal front end: hub discovery, palette resolution and the handlers
//! `main` dispatches to. Handlers gather input (flags, files, the editor),
//! call into `devhub::commands` and print the result.

pub mod render;
pub mod styles;
pub mod templates;

use std::env;
use std::fs;
use std::path::PathBuf;

use colored::*;
use directories::ProjectDirs;

use devhub::commands::export::extension_for;
use devhub::commands::post::PostPatch;
use devhub::commands::{self, CmdMessage, CmdResult, MessageLevel};
use devhub::editor;
use devhub::error::{HubError, Result};
use devhub::media;
use devhub::model::{EntityKind, PostDraft, Theme};
use devhub::projector::SortMode;
use devhub::router::ViewRouter;
use devhub::store::fs::FsBackend;
use devhub::store::EntityStore;

use crate::args::{Cli, CommentAction, MsgAction, PostAction};
use render::HubRenderer;

pub struct AppContext {
    pub store: EntityStore<FsBackend>,
    pub router: ViewRouter,
    renderer: HubRenderer,
}

pub fn init_context(cli: &Cli) -> Result<AppContext> {
    let root = hub_dir(cli)?;
    let (store, report) = EntityStore::open(FsBackend::new(root.clone()))?;
    for key in &report.recovered_keys {
        eprintln!(
            "{}",
            format!(
                "Warning: stored key '{}' was unreadable; starting that collection empty.",
                key
            )
            .yellow()
        );
    }
    if cli.verbose {
        eprintln!("hub directory: {}", root.display());
    }
    let renderer = HubRenderer::new(styles::resolve(store.theme()), !cli.no_color)?;
    Ok(AppContext {
        store,
        router: ViewRouter::new(),
        renderer,
    })
}

/// `--hub` wins, then `DEVHUB_HOME`, then the platform data directory.
fn hub_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.hub {
        return Ok(dir.clone());
    }
    if let Ok(dir) = env::var("DEVHUB_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let dirs = ProjectDirs::from("com", "devhub", "devhub")
        .ok_or_else(|| HubError::Api("Could not determine a data directory".into()))?;
    Ok(dirs.data_dir().to_path_buf())
}

fn finish(ctx: &AppContext, result: CmdResult) -> Result<()> {
    if let Some(view) = &result.view {
        let rendered = ctx.renderer.render_view(view, ctx.store.favorites())?;
        print!("{}", rendered);
        if !rendered.ends_with('\n') {
            println!();
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => eprintln!("{}", message.content.yellow()),
            MessageLevel::Error => eprintln!("{}", message.content.red()),
        }
    }
}

pub fn handle_login(ctx: &mut AppContext, name: &str) -> Result<()> {
    let result = commands::login::run(&mut ctx.store, name)?;
    finish(ctx, result)
}

pub fn handle_send(ctx: &mut AppContext, text: Vec<String>, reply: Option<String>) -> Result<()> {
    let joined = text.join(" ");
    let body = if joined.trim().is_empty() {
        match editor::compose("", "md")? {
            Some(text) => text,
            None => return Err(HubError::Api("Empty message; nothing sent".into())),
        }
    } else {
        joined
    };
    let result = commands::send::run(&mut ctx.store, &mut ctx.router, &body, reply.as_deref())?;
    finish(ctx, result)
}

pub fn handle_feed(
    ctx: &mut AppContext,
    search: Option<String>,
    kind: Option<String>,
) -> Result<()> {
    let kind = kind.as_deref().map(parse_kind).transpose()?;
    let result = commands::feed::run(&ctx.store, &mut ctx.router, search, kind)?;
    finish(ctx, result)
}

pub fn handle_board(
    ctx: &mut AppContext,
    subject: Option<String>,
    search: Option<String>,
    sort: &str,
) -> Result<()> {
    let sort = sort.parse::<SortMode>()?;
    let result = commands::board::run(&ctx.store, &mut ctx.router, subject, search, sort)?;
    finish(ctx, result)
}

pub fn handle_post(ctx: &mut AppContext, action: PostAction) -> Result<()> {
    let result = match action {
        PostAction::New {
            title,
            subject,
            language,
            number,
            describe,
            code,
            code_file,
            image,
            no_editor,
        } => {
            let code = gather_code(code, code_file, &language, no_editor)?.ok_or_else(|| {
                HubError::Api("No code given (use --code or --code-file)".into())
            })?;
            let draft = PostDraft {
                title,
                subject,
                description: describe.unwrap_or_default(),
                code,
                language,
                image: image.as_deref().map(media::encode_file).transpose()?,
                post_number: number,
            };
            commands::post::create(&mut ctx.store, &mut ctx.router, draft)?
        }
        PostAction::Edit {
            selector,
            title,
            subject,
            language,
            number,
            describe,
            code,
            code_file,
            image,
        } => {
            let code = match (code, code_file) {
                (Some(code), _) => Some(code),
                (None, Some(path)) => Some(fs::read_to_string(path).map_err(HubError::Io)?),
                (None, None) => None,
            };
            let patch = PostPatch {
                title,
                subject,
                description: describe,
                code,
                language,
                image: image.as_deref().map(media::encode_file).transpose()?,
                post_number: number,
            };
            commands::post::edit(&mut ctx.store, &mut ctx.router, &selector, patch)?
        }
        PostAction::Rm { selector } => commands::post::remove(&mut ctx.store, &selector)?,
        PostAction::Image { selector, out } => commands::post::image(&ctx.store, &selector, &out)?,
    };
    finish(ctx, result)
}

fn gather_code(
    code: Option<String>,
    code_file: Option<PathBuf>,
    language: &str,
    no_editor: bool,
) -> Result<Option<String>> {
    match (code, code_file) {
        (Some(code), _) => Ok(Some(code)),
        (None, Some(path)) => Ok(Some(fs::read_to_string(path).map_err(HubError::Io)?)),
        (None, None) if no_editor => Ok(None),
        (None, None) => editor::compose("", extension_for(language)),
    }
}

pub fn handle_view(ctx: &mut AppContext, selector: &str) -> Result<()> {
    let result = commands::view::run(&ctx.store, &mut ctx.router, selector)?;
    finish(ctx, result)
}

pub fn handle_comment(ctx: &mut AppContext, action: CommentAction) -> Result<()> {
    let result = match action {
        CommentAction::Add { post, text, reply } => commands::comment::add(
            &mut ctx.store,
            &post,
            &text.join(" "),
            reply.as_deref(),
        )?,
        CommentAction::Rm { selector } => commands::comment::remove(&mut ctx.store, &selector)?,
    };
    finish(ctx, result)
}

pub fn handle_msg(ctx: &mut AppContext, action: MsgAction) -> Result<()> {
    let result = match action {
        MsgAction::Rm { selector } => commands::msg::remove(&mut ctx.store, &selector)?,
    };
    finish(ctx, result)
}

pub fn handle_fav(ctx: &mut AppContext, selector: &str) -> Result<()> {
    let result = commands::favorite::run(&mut ctx.store, selector)?;
    finish(ctx, result)
}

pub fn handle_copy(ctx: &mut AppContext, selector: &str) -> Result<()> {
    let result = commands::copy::run(&ctx.store, selector)?;
    finish(ctx, result)
}

pub fn handle_export(ctx: &mut AppContext, selectors: &[String]) -> Result<()> {
    let result = commands::export::run(&ctx.store, selectors)?;
    finish(ctx, result)
}

pub fn handle_theme(ctx: &mut AppContext, value: Option<String>) -> Result<()> {
    let theme = value.map(|v| v.parse::<Theme>()).transpose()?;
    let result = commands::theme::run(&mut ctx.store, theme)?;
    finish(ctx, result)
}

pub fn handle_doctor(ctx: &mut AppContext) -> Result<()> {
    let result = commands::doctor::run(&mut ctx.store)?;
    finish(ctx, result)
}

fn parse_kind(raw: &str) -> Result<EntityKind> {
    match raw.to_lowercase().as_str() {
        "message" | "msg" => Ok(EntityKind::Message),
        "post" => Ok(EntityKind::Post),
        "comment" | "cmt" => Ok(EntityKind::Comment),
        other => Err(HubError::Validation(format!(
            "Unknown feed type '{}' (expected message, post or comment)",
            other
        ))),
    }
}

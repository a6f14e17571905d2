use clap::Parser;
use devhub::error::Result;

mod args;
mod cli;

use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }
    let mut ctx = cli::init_context(&cli)?;

    match cli.command {
        Some(Commands::Login { name }) => cli::handle_login(&mut ctx, &name),
        Some(Commands::Send { text, reply }) => cli::handle_send(&mut ctx, text, reply),
        Some(Commands::Feed { search, kind }) => cli::handle_feed(&mut ctx, search, kind),
        Some(Commands::Board {
            subject,
            search,
            sort,
        }) => cli::handle_board(&mut ctx, subject, search, &sort),
        Some(Commands::Post { action }) => cli::handle_post(&mut ctx, action),
        Some(Commands::View { selector }) => cli::handle_view(&mut ctx, &selector),
        Some(Commands::Comment { action }) => cli::handle_comment(&mut ctx, action),
        Some(Commands::Msg { action }) => cli::handle_msg(&mut ctx, action),
        Some(Commands::Fav { selector }) => cli::handle_fav(&mut ctx, &selector),
        Some(Commands::Copy { selector }) => cli::handle_copy(&mut ctx, &selector),
        Some(Commands::Export { selectors }) => cli::handle_export(&mut ctx, &selectors),
        Some(Commands::Theme { value }) => cli::handle_theme(&mut ctx, value),
        Some(Commands::Doctor) => cli::handle_doctor(&mut ctx),
        None => cli::handle_feed(&mut ctx, None, None),
    }
}

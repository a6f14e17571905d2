use clap::{Parser, Subcommand};
use std::path::PathBuf;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    " ",
    env!("GIT_COMMIT_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "devhub")]
#[command(about = "A terminal hub for team chatter and shareable code snippets")]
#[command(version, long_version = LONG_VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Hub directory (overrides DEVHUB_HOME and the platform default)
    #[arg(long, global = true, value_name = "DIR")]
    pub hub: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pick the name your messages and posts are signed with
    Login {
        /// Username, as shown to everyone in the hub
        name: String,
    },

    /// Post a chat message (opens the editor when no text is given)
    #[command(alias = "s")]
    Send {
        /// Message text; markdown is rendered in the feed
        text: Vec<String>,

        /// Reply to a message, post or comment (id, #number or title)
        #[arg(short, long, value_name = "SELECTOR")]
        reply: Option<String>,
    },

    /// Show the chatroom feed
    #[command(alias = "f")]
    Feed {
        /// Only show items whose text matches
        #[arg(short, long)]
        search: Option<String>,

        /// Only show one kind of item: message, post or comment
        #[arg(long = "type", value_name = "KIND")]
        kind: Option<String>,
    },

    /// Browse the coderoom: all subjects, or one subject's posts
    #[command(alias = "b")]
    Board {
        /// Subject to open ("Favorites" lists starred posts)
        subject: Option<String>,

        /// Only show posts whose title matches
        #[arg(short, long)]
        search: Option<String>,

        /// Sort order: newest, oldest, az or number
        #[arg(long, default_value = "newest")]
        sort: String,
    },

    /// Create, edit or delete code posts
    Post {
        #[command(subcommand)]
        action: PostAction,
    },

    /// View a post with its comments
    #[command(alias = "v")]
    View {
        /// Post id, #number, id prefix or title fragment
        selector: String,
    },

    /// Comment on posts
    Comment {
        #[command(subcommand)]
        action: CommentAction,
    },

    /// Manage chat messages
    Msg {
        #[command(subcommand)]
        action: MsgAction,
    },

    /// Star or unstar a post
    Fav {
        /// Post id, #number, id prefix or title fragment
        selector: String,
    },

    /// Copy a post's code to the clipboard
    Copy {
        /// Post id, #number, id prefix or title fragment
        selector: String,
    },

    /// Bundle posts into a tar.gz of source files
    Export {
        /// Posts to include (id, #number or title each); omit for all
        selectors: Vec<String>,
    },

    /// Show or set the color theme (dark or light)
    Theme {
        /// New theme; omit to print the current one
        value: Option<String>,
    },

    /// Check the stored data and prune anything dangling
    Doctor,
}

#[derive(Subcommand, Debug)]
pub enum PostAction {
    /// Share a new code snippet
    #[command(alias = "n")]
    New {
        #[arg(long)]
        title: String,

        #[arg(long)]
        subject: String,

        /// Language tag, used for syntax hints and export file extensions
        #[arg(long, default_value = "text")]
        language: String,

        /// Ordering number shown on the board
        #[arg(long)]
        number: Option<u32>,

        /// Markdown description
        #[arg(long)]
        describe: Option<String>,

        /// Snippet body; omit to type it in the editor
        #[arg(long)]
        code: Option<String>,

        /// Read the snippet body from a file
        #[arg(long, value_name = "FILE", conflicts_with = "code")]
        code_file: Option<PathBuf>,

        /// Attach an image; it is inlined into the hub as a data URI
        #[arg(long, value_name = "FILE")]
        image: Option<PathBuf>,

        /// Fail instead of opening the editor when no code is given
        #[arg(long)]
        no_editor: bool,
    },

    /// Change fields of an existing post
    #[command(alias = "e")]
    Edit {
        /// Post id, #number, id prefix or title fragment
        selector: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        subject: Option<String>,

        #[arg(long)]
        language: Option<String>,

        #[arg(long)]
        number: Option<u32>,

        #[arg(long)]
        describe: Option<String>,

        #[arg(long)]
        code: Option<String>,

        #[arg(long, value_name = "FILE", conflicts_with = "code")]
        code_file: Option<PathBuf>,

        #[arg(long, value_name = "FILE")]
        image: Option<PathBuf>,
    },

    /// Delete a post along with its comments and favorite mark
    Rm {
        /// Post id, #number, id prefix or title fragment
        selector: String,
    },

    /// Save a post's attached image to a file
    Image {
        /// Post id, #number, id prefix or title fragment
        selector: String,

        /// Where to write the decoded image
        #[arg(short, long, value_name = "FILE")]
        out: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum CommentAction {
    /// Comment on a post
    #[command(alias = "a")]
    Add {
        /// Post to comment on (id, #number or title)
        post: String,

        /// Comment text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Reply to another comment on the same post
        #[arg(short, long, value_name = "SELECTOR")]
        reply: Option<String>,
    },

    /// Delete a comment
    Rm {
        /// Comment id or id prefix
        selector: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum MsgAction {
    /// Delete a chat message
    Rm {
        /// Message id or id prefix
        selector: String,
    },
}

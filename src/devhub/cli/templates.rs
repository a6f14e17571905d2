//! The view templates, embedded at compile time so the binary stays
//! self-contained.

pub const FEED: &str = include_str!("templates/feed.tmp");
pub const SUBJECTS: &str = include_str!("templates/subjects.tmp");
pub const BOARD: &str = include_str!("templates/board.tmp");
pub const POST: &str = include_str!("templates/post.tmp");

/// Every template the renderer registers, as `(name, source)` pairs.
pub const ALL: [(&str, &str); 4] = [
    ("feed", FEED),
    ("subjects", SUBJECTS),
    ("board", BOARD),
    ("post", POST),
];

use chrono::Utc;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::Write;

use crate::commands::{helpers, CmdMessage, CmdResult};
use crate::error::{HubError, Result};
use crate::model::Post;
use crate::store::backend::KeyValueStore;
use crate::store::EntityStore;

/// Writes the selected posts (default: all) as source files into a
/// `.tar.gz` archive in the working directory.
pub fn run<B: KeyValueStore>(store: &EntityStore<B>, selectors: &[String]) -> Result<CmdResult> {
    let posts = resolve_posts(store, selectors)?;

    if posts.is_empty() {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::info("No posts to export."));
        return Ok(result);
    }

    let filename = format!("devhub-{}.tar.gz", Utc::now().format("%Y-%m-%d_%H%M%S"));
    let file = File::create(&filename).map_err(HubError::Io)?;
    write_archive(file, &posts)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Exported {} post(s) to {}",
        posts.len(),
        filename
    )));
    Ok(result)
}

fn resolve_posts<B: KeyValueStore>(
    store: &EntityStore<B>,
    selectors: &[String],
) -> Result<Vec<Post>> {
    if selectors.is_empty() {
        return Ok(store.posts().to_vec());
    }
    let mut posts = Vec::with_capacity(selectors.len());
    for selector in selectors {
        let id = helpers::resolve_post(store, selector)?;
        if let Some(post) = store.post(&id) {
            posts.push(post.clone());
        }
    }
    Ok(posts)
}

fn write_archive<W: Write>(writer: W, posts: &[Post]) -> Result<()> {
    let enc = GzEncoder::new(writer, Compression::default());
    let mut tar = tar::Builder::new(enc);

    for post in posts {
        let entry_name = format!(
            "devhub/{}-{}.{}",
            sanitize_filename(&post.title),
            id_fragment(post),
            extension_for(&post.language)
        );

        // description rides along as a comment header so the file stands alone
        let mut content = String::new();
        if !post.description.trim().is_empty() {
            for line in post.description.lines() {
                content.push_str("// ");
                content.push_str(line);
                content.push('\n');
            }
            content.push('\n');
        }
        content.push_str(&post.code);
        if !content.ends_with('\n') {
            content.push('\n');
        }

        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();

        tar.append_data(&mut header, entry_name, content.as_bytes())
            .map_err(HubError::Io)?;
    }

    tar.finish().map_err(HubError::Io)?;
    Ok(())
}

fn id_fragment(post: &Post) -> String {
    // char-wise cut: foreign ids from migrated stores may be non-ASCII
    let raw = post.id.as_str();
    let tail = raw.split('_').nth(1).unwrap_or(raw);
    tail.chars().take(8).collect()
}

fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim()
        .replace(' ', "-")
}

/// File extension for a post's language label; unknown labels export as txt.
pub fn extension_for(language: &str) -> &'static str {
    match language.trim().to_lowercase().as_str() {
        "rust" => "rs",
        "python" => "py",
        "javascript" | "js" => "js",
        "typescript" | "ts" => "ts",
        "go" | "golang" => "go",
        "c" => "c",
        "c++" | "cpp" => "cpp",
        "c#" | "csharp" => "cs",
        "java" => "java",
        "kotlin" => "kt",
        "ruby" => "rb",
        "swift" => "swift",
        "shell" | "bash" | "sh" => "sh",
        "sql" => "sql",
        "html" => "html",
        "css" => "css",
        "json" => "json",
        "yaml" | "yml" => "yml",
        "toml" => "toml",
        "markdown" | "md" => "md",
        _ => "txt",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn archive_is_gzip_and_contains_every_post() {
        let fixture = StoreFixture::new()
            .with_post("Intro", "rust")
            .with_post("Joins", "sql");
        let posts = resolve_posts(&fixture.store, &[]).unwrap();

        let mut buf = Vec::new();
        write_archive(&mut buf, &posts).unwrap();

        assert_eq!(&buf[..2], &[0x1f, 0x8b]); // gzip magic
    }

    #[test]
    fn selectors_narrow_the_export() {
        let fixture = StoreFixture::new()
            .with_post("Intro", "rust")
            .with_post("Joins", "sql");
        let posts = resolve_posts(&fixture.store, &["Joins".to_string()]).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Joins");
    }

    #[test]
    fn language_maps_to_a_source_extension() {
        assert_eq!(extension_for("Rust"), "rs");
        assert_eq!(extension_for("c++"), "cpp");
        assert_eq!(extension_for("brainfuck"), "txt");
    }

    #[test]
    fn filenames_are_sanitized() {
        assert_eq!(sanitize_filename("foo/bar baz"), "foo_bar-baz");
    }

    #[test]
    fn id_fragment_cuts_non_ascii_ids_on_char_boundaries() {
        let fixture = StoreFixture::new().with_post("Intro", "rust");
        let mut post = fixture.store.posts()[0].clone();

        assert_eq!(id_fragment(&post).chars().count(), 8);

        // ids migrated from the browser build are not prefix_uuid shaped
        post.id = crate::model::EntityId::from("ñandú-4242424242");
        assert_eq!(id_fragment(&post), "ñandú-42");
    }
}

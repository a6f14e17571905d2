//! Selector resolution. Posts can be picked by full id, unique id prefix,
//! `#N` post number or title substring; messages and comments by id or
//! unique prefix. Ambiguity is an error that lists the candidates.

use crate::error::{HubError, Result};
use crate::model::EntityId;
use crate::store::backend::KeyValueStore;
use crate::store::EntityStore;

pub fn resolve_post<B: KeyValueStore>(store: &EntityStore<B>, selector: &str) -> Result<EntityId> {
    let selector = selector.trim();

    if let Some(post) = store.posts().iter().find(|p| p.id.as_str() == selector) {
        return Ok(post.id.clone());
    }

    if let Some(number) = selector.strip_prefix('#').and_then(|n| n.parse::<u32>().ok()) {
        let matches: Vec<_> = store
            .posts()
            .iter()
            .filter(|p| p.post_number == Some(number))
            .collect();
        return match matches.as_slice() {
            [post] => Ok(post.id.clone()),
            [] => Err(HubError::Api(format!("No post is numbered #{}", number))),
            many => Err(ambiguity(
                selector,
                many.iter().map(|p| p.title.as_str()),
            )),
        };
    }

    let by_prefix: Vec<_> = store
        .posts()
        .iter()
        .filter(|p| p.id.as_str().starts_with(selector))
        .collect();
    match by_prefix.as_slice() {
        [post] => return Ok(post.id.clone()),
        [] => {}
        many => return Err(ambiguity(selector, many.iter().map(|p| p.id.as_str()))),
    }

    let needle = selector.to_lowercase();
    let by_title: Vec<_> = store
        .posts()
        .iter()
        .filter(|p| p.title.to_lowercase().contains(&needle))
        .collect();
    match by_title.as_slice() {
        [post] => Ok(post.id.clone()),
        [] => Err(HubError::Api(format!("No post matches '{}'", selector))),
        many => Err(ambiguity(selector, many.iter().map(|p| p.title.as_str()))),
    }
}

pub fn resolve_message<B: KeyValueStore>(
    store: &EntityStore<B>,
    selector: &str,
) -> Result<EntityId> {
    resolve_by_id_prefix(
        "message",
        selector,
        store.messages().iter().map(|m| &m.id),
    )
}

pub fn resolve_comment<B: KeyValueStore>(
    store: &EntityStore<B>,
    selector: &str,
) -> Result<EntityId> {
    resolve_by_id_prefix(
        "comment",
        selector,
        store.comments().iter().map(|c| &c.id),
    )
}

/// Resolves a reply target against all three collections; used by
/// `send --reply` and `comment --reply`, which may point at anything.
pub fn resolve_any<B: KeyValueStore>(store: &EntityStore<B>, selector: &str) -> Result<EntityId> {
    let ids = store
        .messages()
        .iter()
        .map(|m| &m.id)
        .chain(store.posts().iter().map(|p| &p.id))
        .chain(store.comments().iter().map(|c| &c.id));
    resolve_by_id_prefix("item", selector, ids)
}

fn resolve_by_id_prefix<'a>(
    noun: &str,
    selector: &str,
    ids: impl Iterator<Item = &'a EntityId>,
) -> Result<EntityId> {
    let selector = selector.trim();
    let matches: Vec<&EntityId> = ids
        .filter(|id| id.as_str().starts_with(selector))
        .collect();
    match matches.as_slice() {
        [id] => Ok((*id).clone()),
        [] => Err(HubError::Api(format!(
            "No {} matches '{}'",
            noun, selector
        ))),
        many => Err(ambiguity(selector, many.iter().map(|id| id.as_str()))),
    }
}

fn ambiguity<'a>(selector: &str, candidates: impl Iterator<Item = &'a str>) -> HubError {
    let listed: Vec<&str> = candidates.collect();
    HubError::Api(format!(
        "'{}' is ambiguous; candidates: {}",
        selector,
        listed.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn resolves_post_by_full_id_and_prefix() {
        let fixture = StoreFixture::new().with_post("Intro", "rust");
        let id = fixture.post_id("Intro");

        assert_eq!(resolve_post(&fixture.store, id.as_str()).unwrap(), id);
        let prefix = &id.as_str()[..10];
        assert_eq!(resolve_post(&fixture.store, prefix).unwrap(), id);
    }

    #[test]
    fn resolves_post_by_number_and_title() {
        let fixture = StoreFixture::new()
            .with_numbered_post("Joins explained", "sql", 7)
            .with_post("Intro", "rust");

        let joins = fixture.post_id("Joins explained");
        assert_eq!(resolve_post(&fixture.store, "#7").unwrap(), joins);
        assert_eq!(resolve_post(&fixture.store, "joins").unwrap(), joins);
    }

    #[test]
    fn ambiguous_title_lists_candidates() {
        let fixture = StoreFixture::new()
            .with_post("Rust intro", "rust")
            .with_post("Rust tricks", "rust");

        match resolve_post(&fixture.store, "rust") {
            Err(HubError::Api(msg)) => {
                assert!(msg.contains("Rust intro"));
                assert!(msg.contains("Rust tricks"));
            }
            other => panic!("expected ambiguity error, got {:?}", other),
        }
    }

    #[test]
    fn missing_selector_is_an_error() {
        let fixture = StoreFixture::new();
        assert!(resolve_post(&fixture.store, "nothing").is_err());
        assert!(resolve_message(&fixture.store, "msg_x").is_err());
        assert!(resolve_comment(&fixture.store, "cmt_x").is_err());
    }

    #[test]
    fn resolve_any_spans_all_collections() {
        let fixture = StoreFixture::new()
            .with_message("hi")
            .with_post("Intro", "rust")
            .with_comment("Intro", "nice");

        let mid = fixture.store.messages()[0].id.clone();
        let cid = fixture.store.comments()[0].id.clone();
        assert_eq!(resolve_any(&fixture.store, mid.as_str()).unwrap(), mid);
        assert_eq!(resolve_any(&fixture.store, cid.as_str()).unwrap(), cid);
        // every generated id shares no prefix with the others' kind tags
        assert!(resolve_any(&fixture.store, "msg_").is_ok());
    }
}

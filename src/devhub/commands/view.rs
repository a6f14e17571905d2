use crate::commands::{helpers, CmdResult};
use crate::error::Result;
use crate::router::{View, ViewQuery, ViewRouter};
use crate::store::backend::KeyValueStore;
use crate::store::EntityStore;

/// Single-post view: the post plus its comments, chronological.
pub fn run<B: KeyValueStore>(
    store: &EntityStore<B>,
    router: &mut ViewRouter,
    selector: &str,
) -> Result<CmdResult> {
    let id = helpers::resolve_post(store, selector)?;
    router.navigate(View::SinglePost(id));
    let view = router.view_model(store, &ViewQuery::default())?;
    Ok(CmdResult::default().with_view(view))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::ViewModel;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn shows_post_with_its_comments() {
        let fixture = StoreFixture::new()
            .with_post("Intro", "rust")
            .with_comment("Intro", "nice")
            .with_comment("Intro", "agreed");
        let mut router = ViewRouter::new();

        let result = run(&fixture.store, &mut router, "Intro").unwrap();
        match result.view {
            Some(ViewModel::Post { post, comments }) => {
                assert_eq!(post.title, "Intro");
                assert_eq!(comments.len(), 2);
            }
            other => panic!("expected post view, got {:?}", other),
        }
    }

    #[test]
    fn unknown_selector_fails() {
        let fixture = StoreFixture::new();
        let mut router = ViewRouter::new();
        assert!(run(&fixture.store, &mut router, "ghost").is_err());
    }
}

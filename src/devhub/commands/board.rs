use crate::commands::CmdResult;
use crate::error::Result;
use crate::projector::SortMode;
use crate::router::{View, ViewQuery, ViewRouter};
use crate::store::backend::KeyValueStore;
use crate::store::EntityStore;

/// The coderoom: without a subject it shows the subject list, with one it
/// shows that subject's posts filtered and sorted.
pub fn run<B: KeyValueStore>(
    store: &EntityStore<B>,
    router: &mut ViewRouter,
    subject: Option<String>,
    search: Option<String>,
    sort: SortMode,
) -> Result<CmdResult> {
    match subject {
        None => router.navigate(View::SubjectList),
        Some(s) => router.navigate(View::PostList(Some(s))),
    }
    let query = ViewQuery {
        search,
        kind: None,
        sort,
    };
    let view = router.view_model(store, &query)?;
    Ok(CmdResult::default().with_view(view))
}

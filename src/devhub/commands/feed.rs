use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::EntityKind;
use crate::router::{View, ViewQuery, ViewRouter};
use crate::store::backend::KeyValueStore;
use crate::store::EntityStore;

pub fn run<B: KeyValueStore>(
    store: &EntityStore<B>,
    router: &mut ViewRouter,
    search: Option<String>,
    kind: Option<EntityKind>,
) -> Result<CmdResult> {
    router.navigate(View::Chatroom);
    let query = ViewQuery {
        search,
        kind,
        ..ViewQuery::default()
    };
    let view = router.view_model(store, &query)?;

    let mut result = CmdResult::default().with_view(view);
    if store.current_user().is_none() {
        result.add_message(CmdMessage::info(
            "Not logged in; run `devhub login <name>` to join in.",
        ));
    }
    Ok(result)
}

use crate::cache::Cache;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::node::CacheId;

pub fn run(cache: &mut Cache, parent: CacheId) -> Result<CmdResult> {
    let node = cache.add_node(parent)?;
    let mut result = CmdResult::default();

    result.add_message(CmdMessage::success(format!(
        "Staged {} under {}: {}",
        node.id, parent, node.value
    )));
    if node.is_deleted() {
        result.add_message(CmdMessage::warning(format!(
            "Parent {} is deleted, so {} starts deleted",
            parent, node.id
        )));
    }

    Ok(result)
}

use crate::cache::Cache;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{BdcError, Result};
use crate::node::CacheId;

pub fn run(cache: &mut Cache, cache_id: CacheId) -> Result<CmdResult> {
    let node = cache
        .node(cache_id)
        .ok_or(BdcError::NodeNotFound(cache_id.0))?;
    let was_deleted = node.is_deleted();
    let value = node.value.clone();

    let cascaded = cache.delete(cache_id)?;
    let mut result = CmdResult::default();

    if was_deleted {
        result.add_message(CmdMessage::info(format!(
            "Already deleted ({}): {}",
            cache_id, value
        )));
        return Ok(result);
    }

    result.add_message(CmdMessage::success(format!(
        "Deleted ({}): {}",
        cache_id, value
    )));
    if !cascaded.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "{} descendant(s) deleted with it",
            cascaded.len()
        )));
    }

    Ok(result)
}

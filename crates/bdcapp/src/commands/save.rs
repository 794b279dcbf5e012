use crate::cache::Cache;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::NodeStore;

pub fn run<S: NodeStore>(cache: &mut Cache, db: &mut S) -> Result<CmdResult> {
    let report = cache.save(db)?;
    let mut result = CmdResult::default();

    if report.updated == 0 && report.created.is_empty() {
        result.add_message(CmdMessage::info("Nothing to save"));
        return Ok(result);
    }

    result.add_message(CmdMessage::success(format!(
        "Saved: {} updated, {} created",
        report.updated,
        report.created.len()
    )));
    for (cache_id, db_id) in &report.created {
        result.add_message(CmdMessage::info(format!(
            "{} committed as {}",
            cache_id, db_id
        )));
    }
    if !report.cascaded.is_empty() {
        let ids: Vec<String> = report.cascaded.iter().map(|id| id.to_string()).collect();
        result.add_message(CmdMessage::warning(format!(
            "Deleted in the store, now deleted here too: {}",
            ids.join(", ")
        )));
    }

    Ok(result)
}

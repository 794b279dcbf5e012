//! Text and JSON output for command results.
//!
//! Text rendering returns strings so it can be tested without a terminal; the read loop prints
//! them. Colors follow the `colored` crate's own env handling (`NO_COLOR`, `CLICOLOR_FORCE`).

use bdcapp::commands::{CmdMessage, CmdResult, MessageLevel};
use bdcapp::view::DisplayNode;
use colored::*;

const INDENT: &str = "  ";

pub fn render_text(result: &CmdResult) -> String {
    let mut out = String::new();
    for message in &result.messages {
        out.push_str(&render_message(message));
        out.push('\n');
    }
    if !result.db_tree.is_empty() {
        out.push_str(&format!("{}\n", "Store".bold()));
        render_forest(&mut out, &result.db_tree);
    }
    if !result.cache_tree.is_empty() {
        out.push_str(&format!("{}\n", "Cache".bold()));
        render_forest(&mut out, &result.cache_tree);
    }
    out
}

pub fn render_json(result: &CmdResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}

pub fn render_message(message: &CmdMessage) -> String {
    match message.level {
        MessageLevel::Info => message.content.normal().to_string(),
        MessageLevel::Success => message.content.green().to_string(),
        MessageLevel::Warning => message.content.yellow().to_string(),
        MessageLevel::Error => message.content.red().to_string(),
    }
}

fn render_forest(out: &mut String, rows: &[DisplayNode]) {
    for row in rows {
        render_node(out, row);
    }
}

fn render_node(out: &mut String, node: &DisplayNode) {
    let label = match node.cache_id {
        Some(cache_id) => {
            let db = node
                .db_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string());
            format!("[{}/{}]", cache_id, db)
        }
        None => format!(
            "[{}]",
            node.db_id.map(|id| id.to_string()).unwrap_or_default()
        ),
    };

    let line = if node.is_deleted {
        format!(
            "{} {} {}",
            label.dimmed(),
            node.value.dimmed().strikethrough(),
            "(deleted)".red()
        )
    } else {
        format!("{} {}", label.yellow(), node.value)
    };

    out.push_str(&INDENT.repeat(node.depth + 1));
    out.push_str(&line);
    if node.is_orphan {
        out.push_str(&format!(" {}", "(orphan)".cyan()));
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use bdcapp::cache::Cache;
    use bdcapp::commands::view::{self, Layers};
    use bdcapp::node::DbId;
    use bdcapp::store::{Db, NodeStore};

    fn plain(result: &CmdResult) -> String {
        colored::control::set_override(false);
        render_text(result)
    }

    #[test]
    fn test_store_tree_is_indented() {
        let db = Db::example();
        let cache = Cache::new();
        let result = view::run(&cache, &db, Layers::Db).unwrap();
        let text = plain(&result);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Store");
        assert_eq!(lines[1], "  [0] root");
        assert_eq!(lines[2], "    [1] node_1_1");
        assert_eq!(lines[3], "      [3] node_2_1");
        assert_eq!(lines.len(), 10);
    }

    #[test]
    fn test_cache_tree_labels() {
        let db = Db::example();
        let mut cache = Cache::new();
        let five = cache.load(DbId(5), &db).unwrap();
        cache.add_node(five).unwrap();
        cache.delete(five).unwrap();

        let result = view::run(&cache, &db, Layers::Cache).unwrap();
        let text = plain(&result);
        assert!(text.contains("  [0/5] node_3_1 (deleted) (orphan)"));
        assert!(text.contains("    [1/-] New Node (deleted)"));
    }

    #[test]
    fn test_deep_chain_renders() {
        let mut db = Db::new();
        let mut parent = db.add_root("top").unwrap().db_id;
        for depth in 1..=8_000 {
            parent = db
                .add_to_parent(parent, &format!("n{}", depth), false)
                .unwrap()
                .db_id;
        }

        let cache = Cache::new();
        let result = view::run(&cache, &db, Layers::Db).unwrap();
        let text = plain(&result);

        let last = text.lines().last().unwrap();
        assert_eq!(last, format!("{}[8000] n8000", INDENT.repeat(8_001)));
        assert_eq!(text.lines().count(), 8_002);
    }

    #[test]
    fn test_messages_first() {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::success("Saved"));
        result.add_message(CmdMessage::warning("Careful"));
        assert_eq!(plain(&result), "Saved\nCareful\n");
    }

    #[test]
    fn test_json_output() {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::info("hello"));
        let json: serde_json::Value = serde_json::from_str(&render_json(&result).unwrap()).unwrap();
        assert_eq!(json["messages"][0]["level"], "info");
        assert_eq!(json["messages"][0]["content"], "hello");
        assert!(json.get("db_tree").is_none());
    }
}

//! Output formatting for the CLI.
//!
//! Everything here returns strings; `commands.rs` decides where they go. Positions shown
//! to users are 1-based, like outline paths. JSON output keeps the library's raw values
//! (ids, 0-based indexes) so scripts can replay diffs exactly.

use super::styles;
use nodelineapp::api::NodelineApi;
use nodelineapp::hierarchy::DiffAction;
use nodelineapp::model::ItemId;
use std::collections::BTreeSet;

const INDENT: &str = "  ";

pub fn render_outline(api: &NodelineApi) -> String {
    let indexed = api.indexed();
    if indexed.is_empty() {
        return format!("{}\n", styles::MUTED.apply_to("Empty outline"));
    }

    let mut out = String::new();
    for entry in indexed {
        let (check, text) = if entry.item.done {
            ("[x]", styles::DONE.apply_to(entry.item.text.as_str()))
        } else {
            ("[ ]", styles::TEXT.apply_to(entry.item.text.as_str()))
        };
        out.push_str(&format!(
            "{}{} {} {}\n",
            INDENT.repeat(entry.path.level()),
            styles::PATH.apply_to(format!("{}.", entry.path)),
            styles::MUTED.apply_to(check),
            text
        ));
    }
    out
}

pub fn render_outline_json(api: &NodelineApi) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&api.indexed())
}

pub fn render_actions(api: &NodelineApi, actions: &[DiffAction]) -> String {
    let mut out = String::new();
    for action in actions {
        let line = match action {
            DiffAction::Updated { id } => format!(
                "{} {}",
                styles::UPDATED.apply_to("updated "),
                describe_item(api, *id)
            ),
            DiffAction::Inserted { indexes, parent } => format!(
                "{} {} under {}",
                styles::INSERTED.apply_to("inserted"),
                positions(indexes),
                describe_parent(api, *parent)
            ),
            DiffAction::Removed { indexes, parent } => format!(
                "{} {} under {}",
                styles::REMOVED.apply_to("removed "),
                positions(indexes),
                describe_parent(api, *parent)
            ),
        };
        out.push_str(&line);
        out.push('\n');
    }
    out
}

pub fn render_actions_json(actions: &[DiffAction]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(actions)
}

fn positions(indexes: &BTreeSet<usize>) -> String {
    let shown: Vec<String> = indexes.iter().map(|i| (i + 1).to_string()).collect();
    shown.join(", ")
}

fn describe_parent(api: &NodelineApi, parent: Option<ItemId>) -> String {
    match parent {
        None => "top level".to_string(),
        Some(id) => describe_item(api, id),
    }
}

fn describe_item(api: &NodelineApi, id: ItemId) -> String {
    match (api.path_of(id), api.get(id)) {
        (Ok(path), Ok(item)) => format!("{} \"{}\"", styles::PATH.apply_to(path), item.text),
        _ => id.to_string(),
    }
}

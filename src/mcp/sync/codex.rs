use std::path::Path;
use toml_edit::{DocumentMut, Item, Table};

use crate::app_config::ServerRecord;
use crate::config::{read_text_file_opt, write_text_file};
use crate::error::AppError;

use super::super::toml_convert::server_to_toml_table;

/// Top-level table owning every `[mcp_servers.<name>]` section
pub const MCP_SERVERS_KEY: &str = "mcp_servers";

/// Highest document position of any header table under `table`.
fn max_table_position(table: &Table) -> usize {
    let mut max = table.position().unwrap_or(0);
    for (_, item) in table.iter() {
        match item {
            Item::Table(t) => max = max.max(max_table_position(t)),
            Item::ArrayOfTables(arr) => {
                for t in arr.iter() {
                    max = max.max(max_table_position(t));
                }
            }
            _ => {}
        }
    }
    max
}

/// A `[header]` table in document order, with the comment text written above it.
struct Header {
    position: usize,
    owned: bool,
    comments: Option<String>,
}

fn push_header(t: &Table, owned: bool, out: &mut Vec<Header>) {
    if let (false, false, Some(position)) = (t.is_implicit(), t.is_dotted(), t.position()) {
        let comments = t
            .decor()
            .prefix()
            .and_then(|raw| raw.as_str())
            .filter(|text| text.contains('#'))
            .map(str::to_string);
        out.push(Header {
            position,
            owned,
            comments,
        });
    }
    for (_, item) in t.iter() {
        collect_headers(item, owned, out);
    }
}

fn collect_headers(item: &Item, owned: bool, out: &mut Vec<Header>) {
    match item {
        Item::Table(t) => push_header(t, owned, out),
        Item::ArrayOfTables(arr) => {
            for t in arr.iter() {
                push_header(t, owned, out);
            }
        }
        _ => {}
    }
}

/// Comments sitting right above an owned section, paired with the position of the
/// next foreign header they should move onto (`None` means end of document).
///
/// Comments between two owned sections belong to the earlier one and go with it.
fn orphaned_comments(doc: &DocumentMut) -> Vec<(Option<usize>, String)> {
    let mut headers = Vec::new();
    for (key, item) in doc.as_table().iter() {
        collect_headers(item, key == MCP_SERVERS_KEY, &mut headers);
    }
    headers.sort_by_key(|h| h.position);

    let mut moves = Vec::new();
    for (idx, header) in headers.iter().enumerate() {
        let Some(comments) = header.comments.as_ref().filter(|_| header.owned) else {
            continue;
        };
        if idx > 0 && headers[idx - 1].owned {
            continue;
        }
        let target = headers[idx + 1..]
            .iter()
            .find(|h| !h.owned)
            .map(|h| h.position);
        moves.push((target, comments.clone()));
    }
    moves
}

fn header_at_mut(table: &mut Table, position: usize) -> Option<&mut Table> {
    for (_, item) in table.iter_mut() {
        let candidates: Vec<&mut Table> = match item {
            Item::Table(t) => vec![t],
            Item::ArrayOfTables(arr) => arr.iter_mut().collect(),
            _ => continue,
        };
        for t in candidates {
            if !t.is_implicit() && !t.is_dotted() && t.position() == Some(position) {
                return Some(t);
            }
            if let Some(found) = header_at_mut(t, position) {
                return Some(found);
            }
        }
    }
    None
}

fn reattach_comments(doc: &mut DocumentMut, moves: Vec<(Option<usize>, String)>) {
    for (target, comments) in moves {
        let header = target.and_then(|pos| header_at_mut(doc.as_table_mut(), pos));
        match header {
            Some(table) => {
                let existing = table
                    .decor()
                    .prefix()
                    .and_then(|raw| raw.as_str())
                    .unwrap_or_default()
                    .to_string();
                table.decor_mut().set_prefix(format!("{comments}{existing}"));
            }
            None => {
                let trailing = doc.trailing().as_str().unwrap_or_default().to_string();
                doc.set_trailing(format!("{trailing}{comments}"));
            }
        }
    }
}

/// Write servers into `~/.codex/config.toml` as `[mcp_servers.<name>]` sections.
///
/// Strategy:
/// - an invalid existing file is reported and never overwritten
/// - every existing `mcp_servers` section is dropped
/// - comments written above the first of a run of those sections stay in place
/// - all other tables, keys, comments and whitespace are kept as written
/// - one fresh section per server is appended after everything else
pub fn sync_to_codex(servers: &[ServerRecord], path: &Path) -> Result<(), AppError> {
    let base_text = read_text_file_opt(path)?.unwrap_or_default();

    let mut doc = if base_text.trim().is_empty() {
        DocumentMut::new()
    } else {
        base_text
            .parse::<DocumentMut>()
            .map_err(|e| AppError::toml(path, e))?
    };

    let moves = orphaned_comments(&doc);
    if doc.as_table_mut().remove(MCP_SERVERS_KEY).is_some() {
        log::debug!("replacing existing [{MCP_SERVERS_KEY}] sections in {}", path.display());
        reattach_comments(&mut doc, moves);
    }

    if !servers.is_empty() {
        let mut next_position = max_table_position(doc.as_table()) + 1;

        let mut servers_tbl = Table::new();
        servers_tbl.set_implicit(true);
        servers_tbl.set_position(next_position);
        for server in servers {
            let mut table = server_to_toml_table(server);
            next_position += 1;
            table.set_position(next_position);
            servers_tbl.insert(&server.name, Item::Table(table));
        }
        doc.as_table_mut()
            .insert(MCP_SERVERS_KEY, Item::Table(servers_tbl));
    }

    write_text_file(path, &doc.to_string())
}

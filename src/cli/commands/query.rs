//! `code/query` dispatch across the `find`/`refs`/`symbols`/`structure`
//! modes (spec.md §6).

use serde_json::Value;

use crate::indexing::Maintainer;
use crate::storage::query::{self, QueryArgs};

#[derive(Default)]
pub struct QueryCommand {
    pub find: Option<String>,
    pub refs: Option<String>,
    pub symbols: Option<String>,
    pub structure: bool,
    pub kind: Option<String>,
    pub limit: Option<usize>,
}

/// Returns an error message if more than one query mode flag was supplied,
/// or if none were (the CLI requires exactly one mode per invocation).
pub fn run(maintainer: &Maintainer, cmd: QueryCommand) -> Result<Value, String> {
    let kind = match &cmd.kind {
        Some(tag) => Some(query::parse_kind(tag).ok_or_else(|| format!("unknown kind '{tag}'"))?),
        None => None,
    };

    let modes_selected = [
        cmd.find.is_some(),
        cmd.refs.is_some(),
        cmd.symbols.is_some(),
        cmd.structure,
    ]
    .into_iter()
    .filter(|&x| x)
    .count();

    if modes_selected != 1 {
        return Err("exactly one of --find, --refs, --symbols, --structure is required".into());
    }

    if let Some(name) = cmd.find {
        return Ok(query::find(
            maintainer.store(),
            &QueryArgs {
                name: Some(name),
                kind,
                limit: cmd.limit,
                ..Default::default()
            },
        ));
    }
    if let Some(name) = cmd.refs {
        return Ok(query::refs(
            maintainer.store(),
            &QueryArgs {
                name: Some(name),
                kind,
                limit: cmd.limit,
                ..Default::default()
            },
        ));
    }
    if let Some(file) = cmd.symbols {
        return Ok(query::symbols(
            maintainer.store(),
            &QueryArgs {
                file: Some(file),
                kind,
                ..Default::default()
            },
        ));
    }
    Ok(query::structure(maintainer.store()))
}

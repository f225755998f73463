//! Decision trace explanation.
//!
//! Turns the evaluator's encoded trail into an audit: for every rule that was
//! considered, the outcome code, the `file:line` it was written at, and the
//! text of that line.
//!
//! - **[`decode`]** — trail tokenizer (fused `12d` and split `12 d` forms).
//! - **[`registry`]** — streaming lookup of rule id → `file:line`.
//! - **[`conf_cache`]** — lazily loaded configuration file lines.
//! - **[`render`]** — legend and per-event output lines.

pub mod conf_cache;
pub mod decode;
pub mod outcome;
pub mod registry;
pub mod render;

pub use conf_cache::{AdminDir, ConfLineCache, ConfSource};
pub use decode::{TraceEvent, decode};
pub use outcome::Outcome;
pub use registry::{RuleLocation, RuleRegistry};
pub use render::{RuleInfo, legend, render_event};

use std::collections::{BTreeSet, HashMap};

use crate::error::Result;

/// Resolve every rule id referenced by `events` with one registry pass, then
/// pull each rule's source line through `cache`. Ids missing from the
/// registry are absent from the result.
pub fn resolve<S: ConfSource>(
    events: &[TraceEvent],
    registry: &RuleRegistry,
    cache: &mut ConfLineCache<S>,
) -> Result<HashMap<u32, RuleInfo>> {
    let ids: BTreeSet<u32> = events.iter().filter_map(|e| e.rule_id()).collect();
    let locations = registry.locate(&ids)?;

    let mut infos = HashMap::with_capacity(locations.len());
    // registry order is arbitrary here; walk ids sorted so files load deterministically
    for id in &ids {
        let Some(loc) = locations.get(id) else {
            continue;
        };
        let content = cache.line(&loc.file, loc.line)?.to_string();
        infos.insert(
            *id,
            RuleInfo {
                rule_id: *id,
                file: loc.file.clone(),
                line: loc.line,
                content,
            },
        );
    }
    Ok(infos)
}

/// Decode `trail` and render one line per event, in trail order.
pub fn explain<S: ConfSource>(
    trail: &str,
    registry: &RuleRegistry,
    cache: &mut ConfLineCache<S>,
) -> Result<Vec<String>> {
    let events = decode(trail)?;
    let infos = resolve(&events, registry, cache)?;
    Ok(events
        .iter()
        .map(|e| render_event(*e, e.rule_id().and_then(|id| infos.get(&id))))
        .collect())
}

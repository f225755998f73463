//! Append-only rule registry: `<rule_id> <conf_file> <line_number>` per line.
//!
//! The registry only grows, so lookups stream it from the top and stop at the
//! record that satisfies the last outstanding id. Ids that never show up are
//! left out of the result.

use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Where a rule was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleLocation {
    pub file: String,
    /// 1-based.
    pub line: usize,
}

fn parse_record(record: &str) -> Option<(u32, RuleLocation)> {
    let mut fields = record.split_whitespace();
    let id = fields.next()?.parse().ok()?;
    let file = fields.next()?.to_string();
    let line = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some((id, RuleLocation { file, line }))
}

/// Scan `reader` for `wanted` ids. Reads no further than the record that
/// resolves the last pending id; `origin` only labels errors.
pub fn scan<R: BufRead>(
    mut reader: R,
    wanted: &BTreeSet<u32>,
    origin: &Path,
) -> Result<HashMap<u32, RuleLocation>> {
    let mut pending = wanted.clone();
    let mut found = HashMap::with_capacity(wanted.len());
    let mut buf = String::new();
    let mut line_no = 0;

    while !pending.is_empty() {
        buf.clear();
        let n = reader
            .read_line(&mut buf)
            .map_err(|e| Error::io(origin, e))?;
        if n == 0 {
            break;
        }
        line_no += 1;

        let record = buf.trim();
        if record.is_empty() {
            continue;
        }
        let Some((id, location)) = parse_record(record) else {
            return Err(Error::Registry {
                path: origin.to_path_buf(),
                line_no,
                record: record.to_string(),
            });
        };
        if pending.remove(&id) {
            found.insert(id, location);
        }
    }

    if !pending.is_empty() {
        log::debug!(
            "{}: {} rule id(s) not registered: {:?}",
            origin.display(),
            pending.len(),
            pending
        );
    }
    log::debug!("{}: scanned {line_no} record(s)", origin.display());
    Ok(found)
}

/// Handle on the registry file under the administrative base.
#[derive(Debug, Clone)]
pub struct RuleRegistry {
    path: PathBuf,
}

impl RuleRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Locate every id in `ids` with one pass over the registry.
    pub fn locate(&self, ids: &BTreeSet<u32>) -> Result<HashMap<u32, RuleLocation>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let file = File::open(&self.path).map_err(|e| Error::io(&self.path, e))?;
        scan(BufReader::new(file), ids, &self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const REGISTRY: &str = "\
1 conf/gitolite.conf 3
2 conf/gitolite.conf 7
3 conf/users.conf 1

4 conf/gitolite.conf 12
5 conf/users.conf 4
";

    fn ids(list: &[u32]) -> BTreeSet<u32> {
        list.iter().copied().collect()
    }

    fn loc(file: &str, line: usize) -> RuleLocation {
        RuleLocation {
            file: file.into(),
            line,
        }
    }

    #[test]
    fn finds_requested_ids_across_files() {
        let found = scan(Cursor::new(REGISTRY), &ids(&[2, 5]), Path::new("rule_info")).unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[&2], loc("conf/gitolite.conf", 7));
        assert_eq!(found[&5], loc("conf/users.conf", 4));
    }

    #[test]
    fn stops_at_the_last_needed_record() {
        let mut cursor = Cursor::new(REGISTRY);
        let found = scan(&mut cursor, &ids(&[1, 3]), Path::new("rule_info")).unwrap();
        assert_eq!(found.len(), 2);
        let end_of_third = REGISTRY.match_indices('\n').nth(2).unwrap().0 + 1;
        assert_eq!(cursor.position() as usize, end_of_third);
    }

    #[test]
    fn nothing_requested_reads_nothing() {
        let mut cursor = Cursor::new(REGISTRY);
        let found = scan(&mut cursor, &BTreeSet::new(), Path::new("rule_info")).unwrap();
        assert!(found.is_empty());
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn missing_ids_read_to_end_without_error() {
        let mut cursor = Cursor::new(REGISTRY);
        let found = scan(&mut cursor, &ids(&[4, 99]), Path::new("rule_info")).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[&4], loc("conf/gitolite.conf", 12));
        assert_eq!(cursor.position() as usize, REGISTRY.len());
    }

    #[test]
    fn first_record_for_an_id_wins() {
        let data = "7 a.conf 1\n7 b.conf 2\n";
        let found = scan(Cursor::new(data), &ids(&[7]), Path::new("r")).unwrap();
        assert_eq!(found[&7], loc("a.conf", 1));
    }

    #[test]
    fn corrupt_record_is_an_error() {
        let data = "1 a.conf 1\nbogus line\n3 a.conf 9\n";
        let err = scan(Cursor::new(data), &ids(&[3]), Path::new("rule_info")).unwrap_err();
        assert!(matches!(err, Error::Registry { line_no: 2, .. }), "{err}");
    }

    #[test]
    fn corruption_past_the_stop_point_is_never_seen() {
        let data = "1 a.conf 1\nbogus\n";
        let found = scan(Cursor::new(data), &ids(&[1]), Path::new("rule_info")).unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn missing_registry_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let reg = RuleRegistry::new(dir.path().join("rule_info"));
        assert!(matches!(reg.locate(&ids(&[1])), Err(Error::Io { .. })));
        // no ids, no open
        assert!(reg.locate(&BTreeSet::new()).unwrap().is_empty());
    }
}

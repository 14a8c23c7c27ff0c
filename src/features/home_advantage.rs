//! Historical home-ground advantage table.
//!
//! The table is loaded explicitly, once, by whoever owns it, and is read-only
//! afterwards. A missing or malformed source fails at construction so no
//! feature is ever computed from a partial table.
//!
//! # Format
//!
//! One entry per line, `team,location=probability`:
//!
//! ```text
//! # team,venue=win probability at that venue
//! Geelong,Kardinia Park=0.71
//! Collingwood,MCG=0.58
//! ```
//!
//! Surrounding whitespace is ignored, as are blank lines and lines starting
//! with `#`. The probability must lie in `[0, 1]`, and a `(team, location)`
//! pair may appear only once.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use tracing::info;

use crate::error::{NumericError, Result};

/// `(team, location) → probability` lookup consumed by feature builders.
pub trait AdvantageLookup {
    fn advantage(&self, team: &str, location: &str) -> Option<f64>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeAdvantageTable {
    // team -> location -> probability
    entries: HashMap<String, HashMap<String, f64>>,
    len: usize,
}

fn parse_line(line: &str, line_no: usize) -> Result<Option<((String, String), f64)>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let err = |reason: String| NumericError::Parse { line: line_no, reason };
    let (key, prob) = line
        .rsplit_once('=')
        .ok_or_else(|| err("expected `team,location=probability`".into()))?;
    let (team, location) = key
        .split_once(',')
        .ok_or_else(|| err(format!("expected `team,location` before `=`, got `{}`", key.trim())))?;
    let (team, location) = (team.trim(), location.trim());
    if team.is_empty() || location.is_empty() {
        return Err(err("team and location must be non-empty".into()));
    }
    let prob: f64 = prob
        .trim()
        .parse()
        .map_err(|e| err(format!("bad probability `{}`: {e}", prob.trim())))?;
    if !(0.0..=1.0).contains(&prob) {
        return Err(err(format!("probability {prob} outside [0, 1]")));
    }
    Ok(Some(((team.to_string(), location.to_string()), prob)))
}

impl HomeAdvantageTable {
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut entries: HashMap<String, HashMap<String, f64>> = HashMap::new();
        let mut len = 0;
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = i + 1;
            let Some(((team, location), prob)) = parse_line(&line, line_no)? else {
                continue;
            };
            let venues = entries.entry(team).or_default();
            if venues.contains_key(&location) {
                return Err(NumericError::Parse {
                    line: line_no,
                    reason: format!("duplicate entry for location `{location}`"),
                });
            }
            venues.insert(location, prob);
            len += 1;
        }
        Ok(Self { entries, len })
    }

    /// Read and parse a table file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let table = Self::from_reader(BufReader::new(File::open(path)?))?;
        info!(entries = table.len(), source = %path.display(), "loaded home advantage table");
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, team: &str, location: &str) -> Option<f64> {
        self.entries.get(team)?.get(location).copied()
    }

    /// Every entry, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, f64)> + '_ {
        self.entries
            .iter()
            .flat_map(|(t, venues)| venues.iter().map(move |(l, &p)| (t.as_str(), l.as_str(), p)))
    }
}

impl FromStr for HomeAdvantageTable {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_reader(s.as_bytes())
    }
}

impl AdvantageLookup for HomeAdvantageTable {
    fn advantage(&self, team: &str, location: &str) -> Option<f64> {
        self.get(team, location)
    }
}

impl AdvantageLookup for HashMap<(String, String), f64> {
    fn advantage(&self, team: &str, location: &str) -> Option<f64> {
        self.get(&(team.to_string(), location.to_string())).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
# venue advantage
Geelong,Kardinia Park=0.71

  Collingwood , MCG = 0.58
Richmond,MCG=0.5
";

    #[test]
    fn parses_entries_and_skips_comments() {
        let t: HomeAdvantageTable = TABLE.parse().unwrap();
        assert_eq!(t.len(), 3);
        assert_eq!(t.advantage("Geelong", "Kardinia Park"), Some(0.71));
        assert_eq!(t.advantage("Collingwood", "MCG"), Some(0.58));
        assert_eq!(t.advantage("Geelong", "MCG"), None);
        assert_eq!(t.iter().filter(|&(_, l, _)| l == "MCG").count(), 2);
    }

    #[test]
    fn reports_line_numbers() {
        let bad = "A,B=0.5\nA,C=1.5\n";
        assert!(matches!(bad.parse::<HomeAdvantageTable>(), Err(NumericError::Parse { line: 2, .. })));
        assert!(matches!("A B=0.5".parse::<HomeAdvantageTable>(), Err(NumericError::Parse { line: 1, .. })));
        assert!(matches!("A,B".parse::<HomeAdvantageTable>(), Err(NumericError::Parse { line: 1, .. })));
        assert!(matches!("A,B=x".parse::<HomeAdvantageTable>(), Err(NumericError::Parse { line: 1, .. })));
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let dup = "A,B=0.5\n# again\nA , B=0.6\n";
        assert!(matches!(dup.parse::<HomeAdvantageTable>(), Err(NumericError::Parse { line: 3, .. })));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = HomeAdvantageTable::load("/nonexistent/numkit/home_advantage.txt").unwrap_err();
        assert!(matches!(err, NumericError::Io(_)));
    }

    #[test]
    fn plain_maps_are_lookups() {
        let mut m = HashMap::new();
        m.insert(("A".to_string(), "B".to_string()), 0.25);
        assert_eq!(m.advantage("A", "B"), Some(0.25));
    }
}

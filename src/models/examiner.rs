//! Examiner model.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// An internal or external examiner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Examiner {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// The two examiner rosters. Rosters are disjoint by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExaminerRosters {
    #[serde(default)]
    pub internal: Vec<Examiner>,
    #[serde(default)]
    pub external: Vec<Examiner>,
}

impl Examiner {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Whether both id and name are present.
    pub fn is_complete(&self) -> bool {
        !self.id.trim().is_empty() && !self.name.trim().is_empty()
    }
}

impl ExaminerRosters {
    pub fn new(internal: Vec<Examiner>, external: Vec<Examiner>) -> Self {
        Self { internal, external }
    }

    /// Cleans caller-supplied rosters.
    ///
    /// Drops incomplete entries, keeps the first entry per id inside each
    /// roster, and removes from the external roster any id already listed as
    /// internal. Returns the cleaned rosters and one warning per adjustment.
    pub fn sanitize(internal: &[Examiner], external: &[Examiner]) -> (Self, Vec<String>) {
        let mut warnings = Vec::new();
        let internal = clean_roster("internal", internal, &HashSet::new(), &mut warnings);
        let internal_ids: HashSet<&str> = internal.iter().map(|e| e.id.as_str()).collect();
        let external = clean_roster("external", external, &internal_ids, &mut warnings);
        (Self { internal, external }, warnings)
    }

    pub fn is_empty(&self) -> bool {
        self.internal.is_empty() && self.external.is_empty()
    }
}

fn clean_roster(
    kind: &str,
    examiners: &[Examiner],
    excluded: &HashSet<&str>,
    warnings: &mut Vec<String>,
) -> Vec<Examiner> {
    let mut seen = HashSet::new();
    let mut kept = Vec::new();
    let mut incomplete = 0usize;

    for e in examiners {
        if !e.is_complete() {
            incomplete += 1;
            continue;
        }
        let cleaned = Examiner::new(e.id.trim(), e.name.trim());
        if excluded.contains(cleaned.id.as_str()) {
            warnings.push(format!(
                "Examiner '{}' is listed as both internal and external; kept as internal only",
                cleaned.id
            ));
            continue;
        }
        if !seen.insert(cleaned.id.clone()) {
            warnings.push(format!(
                "Duplicate {kind} examiner id '{}' ignored",
                cleaned.id
            ));
            continue;
        }
        kept.push(cleaned);
    }

    if incomplete > 0 {
        warnings.push(format!(
            "{incomplete} {kind} examiner entr{} without id or name ignored",
            if incomplete == 1 { "y" } else { "ies" }
        ));
    }
    kept
}

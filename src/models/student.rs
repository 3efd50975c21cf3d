//! Student grouping models.
//!
//! Students are identified only by register number. Callers may group
//! them into batches (lab sections) inside semesters; the grouping is a
//! seating preference, never a hard constraint.

use serde::{Deserialize, Serialize};

/// A named group of students, typically one lab section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    pub name: String,
    #[serde(default)]
    pub register_numbers: Vec<String>,
}

/// A named group of batches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Semester {
    pub name: String,
    #[serde(default)]
    pub batches: Vec<Batch>,
}

/// An ordered run of students that should stay together when seated.
///
/// Flat register lists become a single unlabelled group; each batch of a
/// semester tree becomes one labelled group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentGroup {
    /// Semester label, if the caller supplied one.
    pub semester: Option<String>,
    /// Batch label, if the caller supplied one.
    pub batch: Option<String>,
    /// Register numbers in input order.
    pub register_numbers: Vec<String>,
}

impl Batch {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            register_numbers: Vec::new(),
        }
    }

    /// Adds register numbers.
    pub fn with_students<I, S>(mut self, register_numbers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.register_numbers
            .extend(register_numbers.into_iter().map(Into::into));
        self
    }
}

impl Semester {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            batches: Vec::new(),
        }
    }

    /// Adds a batch.
    pub fn with_batch(mut self, batch: Batch) -> Self {
        self.batches.push(batch);
        self
    }

    /// Total register numbers across all batches (duplicates included).
    pub fn student_count(&self) -> usize {
        self.batches.iter().map(|b| b.register_numbers.len()).sum()
    }
}

impl StudentGroup {
    /// Creates an unlabelled group.
    pub fn unlabelled<I, S>(register_numbers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            semester: None,
            batch: None,
            register_numbers: register_numbers.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a group labelled with its semester and batch.
    pub fn from_batch(semester: &Semester, batch: &Batch) -> Self {
        Self {
            semester: non_blank(&semester.name),
            batch: non_blank(&batch.name),
            register_numbers: batch.register_numbers.clone(),
        }
    }

    /// A group with the same labels and no students.
    pub fn empty_like(&self) -> Self {
        Self {
            semester: self.semester.clone(),
            batch: self.batch.clone(),
            register_numbers: Vec::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.register_numbers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.register_numbers.is_empty()
    }
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semester_builder() {
        let sem = Semester::new("S5")
            .with_batch(Batch::new("A").with_students(["21CS001", "21CS002"]))
            .with_batch(Batch::new("B").with_students(["21CS003"]));
        assert_eq!(sem.batches.len(), 2);
        assert_eq!(sem.student_count(), 3);
    }

    #[test]
    fn test_group_from_batch_labels() {
        let sem = Semester::new("S5");
        let batch = Batch::new("  ").with_students(["X1"]);
        let group = StudentGroup::from_batch(&sem, &batch);
        assert_eq!(group.semester.as_deref(), Some("S5"));
        assert_eq!(group.batch, None);
        assert_eq!(group.len(), 1);

        let empty = group.empty_like();
        assert!(empty.is_empty());
        assert_eq!(empty.semester.as_deref(), Some("S5"));
    }
}

use crate::artifacts::diff::myers::Edit;

/// A maximal run of consecutive line edits
///
/// `a_start`/`b_start` are 0-indexed line numbers into the old and new
/// sequences; the run lengths are the number of deleted and inserted lines.
/// No context lines are carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    a_start: usize,
    b_start: usize,
    deleted: Vec<String>,
    inserted: Vec<String>,
}

impl Hunk {
    /// Group an edit script into hunks, dropping the equal stretches
    pub fn group<T: Into<String>>(edits: Vec<Edit<T>>) -> Vec<Hunk> {
        let mut hunks = Vec::new();
        let mut open: Option<Hunk> = None;

        let (mut a_line, mut b_line) = (0usize, 0usize);

        for edit in edits {
            match edit {
                Edit::Equal { .. } => {
                    if let Some(hunk) = open.take() {
                        hunks.push(hunk);
                    }
                    a_line += 1;
                    b_line += 1;
                }
                Edit::Delete { value } => {
                    open.get_or_insert_with(|| Hunk::starting_at(a_line, b_line))
                        .deleted
                        .push(value.into());
                    a_line += 1;
                }
                Edit::Insert { value } => {
                    open.get_or_insert_with(|| Hunk::starting_at(a_line, b_line))
                        .inserted
                        .push(value.into());
                    b_line += 1;
                }
            }
        }

        if let Some(hunk) = open.take() {
            hunks.push(hunk);
        }

        hunks
    }

    fn starting_at(a_start: usize, b_start: usize) -> Self {
        Hunk {
            a_start,
            b_start,
            deleted: Vec::new(),
            inserted: Vec::new(),
        }
    }

    pub fn a_start(&self) -> usize {
        self.a_start
    }

    pub fn b_start(&self) -> usize {
        self.b_start
    }

    pub fn a_len(&self) -> usize {
        self.deleted.len()
    }

    pub fn b_len(&self) -> usize {
        self.inserted.len()
    }

    pub fn deleted(&self) -> &[String] {
        &self.deleted
    }

    pub fn inserted(&self) -> &[String] {
        &self.inserted
    }

    /// Unified-diff hunk header
    ///
    /// Each range shows a 1-indexed start when its length is non-zero (the
    /// raw 0-indexed position otherwise) and omits the `,<len>` part when the
    /// length is exactly one.
    pub fn header(&self) -> String {
        format!(
            "@@ -{} +{} @@",
            Self::format_range(self.a_start, self.a_len()),
            Self::format_range(self.b_start, self.b_len())
        )
    }

    fn format_range(start: usize, len: usize) -> String {
        let mut range = if len != 0 {
            (start + 1).to_string()
        } else {
            start.to_string()
        };

        if len != 1 {
            range.push_str(&format!(",{len}"));
        }

        range
    }
}

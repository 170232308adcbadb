//! Run summary printed after a successful conversion

use std::fmt;

/// Row counts observed across one conversion run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub master_count: usize,
    pub form_count: usize,
    pub merged_count: usize,
}

impl RunSummary {
    pub fn new(master_count: usize, form_count: usize, merged_count: usize) -> Self {
        Self {
            master_count,
            form_count,
            merged_count,
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Successfully processed and merged {} customers",
            self.merged_count
        )?;
        writeln!(f, "Master export: {} customers", self.master_count)?;
        write!(f, "Form export: {} customers", self.form_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_display() {
        let summary = RunSummary::new(3, 2, 4);
        let rendered = summary.to_string();

        assert!(rendered.contains("merged 4 customers"));
        assert!(rendered.contains("Master export: 3 customers"));
        assert!(rendered.contains("Form export: 2 customers"));
    }
}

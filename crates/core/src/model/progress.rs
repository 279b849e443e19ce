use std::fmt;

/// Completion progress of a topic index page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSummary {
    completed: usize,
    total: usize,
    percent: u32,
}

impl ProgressSummary {
    /// Percentage is `round(100 * completed / total)`, half rounding up, and
    /// 0 when there are no lessons at all.
    #[must_use]
    pub fn compute(completed: usize, total: usize) -> Self {
        let percent = if total == 0 {
            0
        } else {
            let completed = completed as u64;
            let total = total as u64;
            let rounded = (completed * 200 + total) / (total * 2);
            u32::try_from(rounded).unwrap_or(u32::MAX)
        };
        Self {
            completed,
            total,
            percent,
        }
    }

    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn percent(&self) -> u32 {
        self.percent
    }

    /// CSS width of the progress fill. Capped at 100% since the stored set may
    /// hold lessons no longer listed on the page.
    #[must_use]
    pub fn bar_width(&self) -> String {
        format!("{}%", self.percent.min(100))
    }

    #[must_use]
    pub fn summary_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ProgressSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} lessons completed ({}%)",
            self.completed, self.total, self.percent
        )
    }
}

use core::fmt;

use super::{filter::SkipReason, locker::LockOutcome};

/// Tally of processed leaf items
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report
{
    pub locked: usize,
    pub skipped: usize,
    pub failed: usize
}

impl Report
{
    pub fn new() -> Report
    {
        Report::default()
    }

    /// Count a skip, containers are not counted at all
    pub fn skip(&mut self, reason: SkipReason)
    {
        if reason != SkipReason::Container
        {
            self.skipped += 1;
        }
    }

    pub fn record(&mut self, outcome: LockOutcome)
    {
        match outcome
        {
            LockOutcome::Locked => self.locked += 1,
            LockOutcome::Failed(_) => self.failed += 1
        }
    }

    pub fn total(&self) -> usize
    {
        self.locked + self.skipped + self.failed
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "--- Results ---")?;
        writeln!(f, "Locked : {}", self.locked)?;
        writeln!(f, "Skipped: {} (already locked, unsupported type, no permission)", self.skipped)?;
        writeln!(f, "Failed : {} (API errors)", self.failed)?;
        write!(f, "---------------")
    }
}

//! Walk a Drive tree, decide which files can be locked, lock them and tally
//!
//! ```not_rust
//!  url -> id -> collect_items -> check_eligibility -> lock_item -> Report
//! ```

use crate::{config::Config, drive::{DriveApi, Item}};

pub mod filter;
pub mod locker;
pub mod report;
pub mod walker;

use filter::{check_eligibility, Eligibility};
use locker::lock_item;
use report::Report;

/// Everything a run needs, built once in main and passed by reference
pub struct LockContext<D: DriveApi>
{
    pub drive: D,
    pub non_lockable_mime_types: Vec<String>,
    pub lock_reason: String
}

impl<D: DriveApi> LockContext<D>
{
    pub fn new(drive: D, config: &Config) -> LockContext<D>
    {
        LockContext
        {
            drive,
            non_lockable_mime_types: config.non_lockable_mime_types(),
            lock_reason: config.lock_reason()
        }
    }
}

/// Check and lock items in order, one call at a time. Capabilities and
///   restrictions are those fetched while walking, they are not re-read.
pub async fn lock_items<D: DriveApi>(context: &LockContext<D>, items: &[Item]) -> Report
{
    let mut report = Report::new();

    for item in items
    {
        crate::log(format!("- Processing '{}' ({})", item.name, item.mime_type), None);

        match check_eligibility(item, &context.non_lockable_mime_types)
        {
            Eligibility::Skip(reason) =>
            {
                crate::log(format!("  Skipped '{}', {}", item.name, reason), None);
                report.skip(reason);
            },
            Eligibility::Eligible =>
            {
                report.record(lock_item(&context.drive, &item.id, &item.name, &context.lock_reason).await);
            }
        }
    }

    report
}

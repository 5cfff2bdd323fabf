use core::fmt;

use crate::drive::{DriveApi, DriveError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockFailure
{
    Forbidden,
    BadRequest,
    NotApplied,
    Unexpected
}

impl LockFailure
{
    /// Classify a failed update call by its HTTP status
    pub fn from_error(error: &DriveError) -> LockFailure
    {
        match error.status
        {
            Some(403) => LockFailure::Forbidden,
            Some(400) => LockFailure::BadRequest,
            _ => LockFailure::Unexpected
        }
    }
}

impl fmt::Display for LockFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let reason = match self
        {
            LockFailure::Forbidden => "forbidden",
            LockFailure::BadRequest => "bad request",
            LockFailure::NotApplied => "not applied",
            LockFailure::Unexpected => "unexpected"
        };
        write!(f, "{}", reason)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockOutcome
{
    Locked,
    Failed(LockFailure)
}

/// Add a read-only restriction to id, name is only used for messages.
///   The update only counts when the returned item is read-only. No retries.
pub async fn lock_item<D: DriveApi + ?Sized>(drive: &D, id: &str, name: &str, reason: &str) -> LockOutcome
{
    match drive.set_read_only(id, reason).await
    {
        Ok(updated) =>
        {
            if updated.is_read_only()
            {
                crate::log(format!("  Locked '{}' (ID: {})", name, id), Some("LOCK"));
                LockOutcome::Locked
            }
            else
            {
                crate::log(format!("  '{}' (ID: {}) update succeeded but no read-only restriction was applied", name, id), Some("WARN"));
                LockOutcome::Failed(LockFailure::NotApplied)
            }
        },
        Err(e) =>
        {
            let failure = LockFailure::from_error(&e);
            crate::log(format!("  Could not lock '{}' (ID: {}), {}: {}", name, id, failure, e), Some("ERROR"));
            LockOutcome::Failed(failure)
        }
    }
}

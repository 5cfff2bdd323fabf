use core::fmt;

use crate::drive::Item;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason
{
    Container,
    AlreadyLocked,
    TypeNotLockable,
    NoEditPermission,
    RestrictionChangeForbidden
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let reason = match self
        {
            SkipReason::Container => "not lockable, container",
            SkipReason::AlreadyLocked => "already locked",
            SkipReason::TypeNotLockable => "type not lockable",
            SkipReason::NoEditPermission => "no edit permission",
            SkipReason::RestrictionChangeForbidden => "API forbids restriction change"
        };
        write!(f, "{}", reason)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility
{
    Eligible,
    Skip(SkipReason)
}

/// Decide whether item may be locked, the first failing check names the reason
///
/// Depends only on the type, capabilities and restrictions of item.
pub fn check_eligibility(item: &Item, non_lockable_mime_types: &[String]) -> Eligibility
{
    if item.is_container()
    {
        return Eligibility::Skip(SkipReason::Container)
    }

    if item.is_read_only()
    {
        return Eligibility::Skip(SkipReason::AlreadyLocked)
    }

    if non_lockable_mime_types.iter().any(|m| m == &item.mime_type)
    {
        return Eligibility::Skip(SkipReason::TypeNotLockable)
    }

    if !item.capabilities.can_edit
    {
        return Eligibility::Skip(SkipReason::NoEditPermission)
    }

    if !item.capabilities.can_modify_editor_content_restriction
    {
        return Eligibility::Skip(SkipReason::RestrictionChangeForbidden)
    }

    Eligibility::Eligible
}

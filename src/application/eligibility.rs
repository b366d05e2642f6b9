//! # Eligibility Resolver
//!
//! Computes which members of a group may vote in a new election.
//! Eligible voters are non-bot members that are online and allowed to post.

use std::collections::BTreeSet;

use crate::domain::errors::VotekickError;
use crate::domain::traits::GroupDirectory;
use crate::domain::types::{MemberSnapshot, Presence};

/// Filter a membership snapshot down to eligible voter ids.
pub fn eligible_voters(members: &[MemberSnapshot], exclude_bots: bool) -> BTreeSet<String> {
    members
        .iter()
        .filter(|m| !(exclude_bots && m.is_bot))
        .filter(|m| m.presence == Presence::Online && m.can_post_messages)
        .map(|m| m.id.clone())
        .collect()
}

/// Fetch the group's snapshot and resolve its eligible voters.
/// A failed fetch is an error; no partial list is ever returned.
pub async fn resolve<D>(
    directory: &D,
    group_id: &str,
    exclude_bots: bool,
) -> Result<BTreeSet<String>, VotekickError>
where
    D: GroupDirectory + ?Sized,
{
    let members = directory.fetch_members(group_id).await.map_err(|e| {
        tracing::warn!(group = group_id, error = %e, "Failed to fetch group members");
        VotekickError::Transport(e)
    })?;
    let voters = eligible_voters(&members, exclude_bots);
    tracing::debug!(group = group_id, ?voters, "Resolved eligible voters");
    Ok(voters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{FakePlatform, member};

    #[test]
    fn test_filters_bots_presence_and_permissions() {
        let members = vec![
            member("1", false, Presence::Online, true),
            member("2", true, Presence::Online, true),
            member("3", false, Presence::Idle, true),
            member("4", false, Presence::Offline, true),
            member("5", false, Presence::Online, false),
            member("6", false, Presence::Online, true),
        ];
        let voters = eligible_voters(&members, true);
        assert_eq!(voters.into_iter().collect::<Vec<_>>(), vec!["1", "6"]);
    }

    #[test]
    fn test_bots_included_when_not_excluded() {
        let members = vec![
            member("1", false, Presence::Online, true),
            member("2", true, Presence::Online, true),
        ];
        assert_eq!(eligible_voters(&members, false).len(), 2);
    }

    #[tokio::test]
    async fn test_resolve_uses_directory_snapshot() {
        let platform = FakePlatform::with_online_voters(&["a", "b", "c"]);
        let voters = resolve(&platform, "group", true).await.unwrap();
        assert_eq!(voters.len(), 3);
    }

    #[tokio::test]
    async fn test_resolve_fails_closed() {
        let platform = FakePlatform::with_online_voters(&["a", "b", "c"]);
        platform.fail_member_fetch("timeout");
        let err = resolve(&platform, "group", true).await.unwrap_err();
        assert_eq!(err, VotekickError::Transport("timeout".to_string()));
    }
}

//! Local/remote progress reconciliation.
//!
//! The policy compares set sizes only. Two sets of equal size but different
//! members are treated as equivalent and the remote one wins, which can drop
//! local-only completions. That tie-break is kept as-is.

use crate::core::ProgressSet;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressSource {
    Local,
    Remote,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub authoritative: ProgressSet,
    pub should_push_to_remote: bool,
    pub source: ProgressSource,
}

/// Picks the set to apply. `remote` is `None` when the remote store could
/// not be read; an absent remote record is `Some(empty)`, not `None`.
pub fn reconcile(remote: Option<ProgressSet>, local: ProgressSet) -> Reconciliation {
    let Some(remote) = remote else {
        return Reconciliation {
            authoritative: local,
            should_push_to_remote: false,
            source: ProgressSource::Local,
        };
    };

    if local.len() > remote.len() {
        Reconciliation {
            authoritative: local,
            should_push_to_remote: true,
            source: ProgressSource::Local,
        }
    } else {
        // Remote is ahead or the sizes tie.
        Reconciliation {
            authoritative: remote,
            should_push_to_remote: false,
            source: ProgressSource::Remote,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_remote_uses_local() {
        let result = reconcile(None, ProgressSet::from([3, 5]));
        assert_eq!(result.authoritative, ProgressSet::from([3, 5]));
        assert!(!result.should_push_to_remote);
        assert_eq!(result.source, ProgressSource::Local);
    }

    #[test]
    fn test_remote_ahead_wins() {
        let result = reconcile(Some(ProgressSet::from([1, 2, 3])), ProgressSet::from([1, 2]));
        assert_eq!(result.authoritative, ProgressSet::from([1, 2, 3]));
        assert!(!result.should_push_to_remote);
    }

    #[test]
    fn test_local_ahead_is_pushed() {
        let result = reconcile(Some(ProgressSet::from([1, 2])), ProgressSet::from([1, 2, 3]));
        assert_eq!(result.authoritative, ProgressSet::from([1, 2, 3]));
        assert!(result.should_push_to_remote);
    }

    #[test]
    fn test_equal_size_prefers_remote_regardless_of_members() {
        let result = reconcile(Some(ProgressSet::from([1, 2])), ProgressSet::from([3, 4]));
        assert_eq!(result.authoritative, ProgressSet::from([1, 2]));
        assert!(!result.should_push_to_remote);
        assert_eq!(result.source, ProgressSource::Remote);
    }

    #[test]
    fn test_empty_remote_record_is_present() {
        let both_empty = reconcile(Some(ProgressSet::new()), ProgressSet::new());
        assert!(both_empty.authoritative.is_empty());
        assert_eq!(both_empty.source, ProgressSource::Remote);

        let local_ahead = reconcile(Some(ProgressSet::new()), ProgressSet::from([1]));
        assert!(local_ahead.should_push_to_remote);
    }
}

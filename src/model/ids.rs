// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// A stable node identifier.
///
/// Ids are creation-ordered integers. They are persisted verbatim, so values minted from the
/// wall clock in an earlier session stay valid after a reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u64);

impl NodeId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NodeId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}

impl From<u64> for NodeId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IdClock {
    WallMillis,
    Sequential,
}

/// Per-session allocator for [`NodeId`]s.
///
/// The clock-backed source hands out `max(now_ms, last + 1)`, which keeps ids increasing even
/// when several nodes are created within one millisecond or the clock steps backwards.
#[derive(Debug, Clone)]
pub struct IdSource {
    last: u64,
    clock: IdClock,
}

impl Default for IdSource {
    fn default() -> Self {
        Self::wall_clock()
    }
}

impl IdSource {
    pub fn wall_clock() -> Self {
        Self {
            last: 0,
            clock: IdClock::WallMillis,
        }
    }

    /// Deterministic source starting at `first`; used by tests and benches.
    pub fn sequential(first: u64) -> Self {
        Self {
            last: first.saturating_sub(1),
            clock: IdClock::Sequential,
        }
    }

    pub fn next_id(&mut self) -> NodeId {
        let floor = self.last.saturating_add(1);
        let value = match self.clock {
            IdClock::WallMillis => now_millis().max(floor),
            IdClock::Sequential => floor,
        };
        self.last = value;
        NodeId(value)
    }

    /// Makes sure ids handed out later never collide with `id`.
    pub fn observe(&mut self, id: NodeId) {
        self.last = self.last.max(id.0);
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{IdSource, NodeId};

    #[test]
    fn sequential_source_counts_up_from_first() {
        let mut ids = IdSource::sequential(10);
        assert_eq!(ids.next_id(), NodeId::new(10));
        assert_eq!(ids.next_id(), NodeId::new(11));
    }

    #[test]
    fn observed_ids_are_skipped() {
        let mut ids = IdSource::sequential(1);
        ids.observe(NodeId::new(40));
        assert_eq!(ids.next_id(), NodeId::new(41));

        ids.observe(NodeId::new(3));
        assert_eq!(ids.next_id(), NodeId::new(42));
    }

    #[test]
    fn wall_clock_ids_are_strictly_increasing() {
        let mut ids = IdSource::wall_clock();
        let first = ids.next_id();
        let second = ids.next_id();
        let third = ids.next_id();
        assert!(first < second && second < third);
    }

    #[test]
    fn node_id_parses_from_decimal() {
        assert_eq!("1700000000000".parse::<NodeId>(), Ok(NodeId::new(1_700_000_000_000)));
        assert!("n:1".parse::<NodeId>().is_err());
    }
}

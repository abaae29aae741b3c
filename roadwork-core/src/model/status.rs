use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle of a roadwork entry as tracked by a field team.
///
/// Ordering follows [`Status::rank`]: a record further along its lifecycle
/// outranks one that is less advanced, and conflicting edits never move a
/// record backwards past what the server already holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    New,
    Later,
    Ongoing,
    Finished,
}

impl Status {
    /// Every variant, lowest rank first.
    pub const ALL: [Status; 4] = [Status::New, Status::Later, Status::Ongoing, Status::Finished];

    /// Position in the total order used to break merge conflicts.
    pub const fn rank(self) -> u8 {
        match self {
            Status::New => 0,
            Status::Later => 1,
            Status::Ongoing => 2,
            Status::Finished => 3,
        }
    }

    /// Wire token, identical to the serialized form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Status::New => "New",
            Status::Later => "Later",
            Status::Ongoing => "Ongoing",
            Status::Finished => "Finished",
        }
    }
}

impl Ord for Status {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for Status {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

use crate::model::SyncRecord;

/// How one incoming record is settled against the stored one with the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Client edited on top of the current server value; edit accepted as-is.
    Accepted,
    /// Both sides changed and the stored status ranks higher; server value kept.
    ServerWins,
    /// Both sides changed and the client status ranks equal or higher; client value kept.
    ClientWins,
    /// Client had no edit but a stale copy; replaced with the server value.
    Overwritten,
    /// Client had no edit and an up-to-date copy.
    Unchanged,
}

impl Resolution {
    /// Whether the record gets a fresh server timestamp.
    pub fn takes_new_timestamp(self) -> bool {
        matches!(self, Resolution::Accepted | Resolution::ClientWins)
    }

    /// Whether the stored value replaces the incoming one.
    pub fn takes_server_value(self) -> bool {
        matches!(self, Resolution::ServerWins | Resolution::Overwritten)
    }
}

/// Decide how `incoming` is reconciled with `existing`.
///
/// A dirty record whose `server_update_time` still matches the stored one is
/// a plain update. When the server moved on in the meantime, the status rank
/// breaks the tie: the stored value only wins if it ranks strictly higher.
/// A clean record is refreshed whenever its `server_update_time` differs.
pub fn resolve(existing: &SyncRecord, incoming: &SyncRecord) -> Resolution {
    let same_base = incoming.server_update_time == existing.server_update_time;
    match (incoming.dirty, same_base) {
        (true, true) => Resolution::Accepted,
        (true, false) if incoming.status < existing.status => Resolution::ServerWins,
        (true, false) => Resolution::ClientWins,
        (false, false) => Resolution::Overwritten,
        (false, true) => Resolution::Unchanged,
    }
}

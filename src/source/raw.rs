//! Raw record shapes as the native enumeration primitive reports them:
//! attribute bits, a size split into high/low 32-bit halves, and timestamps
//! as 64-bit file-times (100 ns ticks since 1601-01-01 UTC) split the same
//! way. Decoding into API types happens here, in one place.

use chrono::{DateTime, Utc};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::EntryAttributes;

/// Seconds between the file-time epoch (1601-01-01) and the Unix epoch.
const FILETIME_UNIX_DIFF_SECS: i64 = 11_644_473_600;

/// File-time ticks per second (one tick = 100 ns).
const TICKS_PER_SEC: i64 = 10_000_000;

/// A 64-bit value reported as two 32-bit halves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SplitU64 {
    pub high: u32,
    pub low: u32,
}

impl SplitU64 {
    pub fn from_u64(value: u64) -> SplitU64 {
        SplitU64 {
            high: (value >> 32) as u32,
            low: value as u32,
        }
    }

    pub fn to_u64(self) -> u64 {
        (u64::from(self.high) << 32) | u64::from(self.low)
    }
}

/// A native file-time: 100 ns ticks since 1601-01-01 UTC, split high/low.
/// A zero value means the filesystem did not report this timestamp.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawFileTime(pub SplitU64);

impl RawFileTime {
    pub const ZERO: RawFileTime = RawFileTime(SplitU64 { high: 0, low: 0 });

    pub fn from_ticks(ticks: u64) -> RawFileTime {
        RawFileTime(SplitU64::from_u64(ticks))
    }

    pub fn ticks(self) -> u64 {
        self.0.to_u64()
    }

    /// Decode into an absolute UTC timestamp. Zero decodes to the file-time
    /// epoch itself; out-of-range values saturate to the Unix epoch.
    pub fn to_utc(self) -> DateTime<Utc> {
        let ticks = self.ticks() as i64;
        let secs = ticks / TICKS_PER_SEC - FILETIME_UNIX_DIFF_SECS;
        let nanos = (ticks % TICKS_PER_SEC) as u32 * 100;
        DateTime::from_timestamp(secs, nanos).unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// Encode a platform timestamp, `ZERO` when the platform didn't have one.
    pub fn from_system_time(time: Option<SystemTime>) -> RawFileTime {
        let Some(time) = time else {
            return RawFileTime::ZERO;
        };
        match time.duration_since(UNIX_EPOCH) {
            Ok(after) => {
                let ticks = (after.as_secs() as i64 + FILETIME_UNIX_DIFF_SECS) * TICKS_PER_SEC
                    + i64::from(after.subsec_nanos() / 100);
                RawFileTime::from_ticks(ticks as u64)
            }
            Err(before) => {
                // Pre-Unix-epoch but still after 1601 in all realistic cases.
                let back = before.duration();
                let ticks = (FILETIME_UNIX_DIFF_SECS - back.as_secs() as i64) * TICKS_PER_SEC
                    - i64::from(back.subsec_nanos() / 100);
                RawFileTime::from_ticks(ticks.max(0) as u64)
            }
        }
    }
}

/// One raw entry as fetched from a cursor, before it is wrapped into a
/// [`FileRecord`](crate::FileRecord).
#[derive(Clone, Debug)]
pub struct RawEntry {
    pub name: String,
    pub attributes: EntryAttributes,
    pub size: SplitU64,
    pub created: RawFileTime,
    pub accessed: RawFileTime,
    pub modified: RawFileTime,
}

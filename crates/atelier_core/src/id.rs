use crate::error::IdError;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use parking_lot::Mutex;
use std::sync::OnceLock;

const COUNTER_MASK: u32 = 0x00FF_FFFF;

/// Last issued seconds/counter pair of this process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ClockState {
    last_seconds: u32,
    counter: u32,
}

impl ClockState {
    /// Next `(seconds, counter)` pair, strictly greater than the previous one.
    ///
    /// A clock that goes backwards keeps the last seconds value. A counter that
    /// runs out within one second moves on to the following second.
    fn advance(&mut self, now: u32) -> (u32, u32) {
        if now > self.last_seconds {
            self.last_seconds = now;
            self.counter = 0;
        } else if self.counter >= COUNTER_MASK {
            self.last_seconds = self.last_seconds.wrapping_add(1);
            self.counter = 0;
        } else {
            self.counter += 1;
        }
        (self.last_seconds, self.counter)
    }
}

static PROCESS_UNIQUE: OnceLock<[u8; 5]> = OnceLock::new();
static CLOCK: Mutex<ClockState> = Mutex::new(ClockState {
    last_seconds: 0,
    counter: 0,
});

/// A 12-byte record identifier, rendered as 24 lowercase hex characters.
///
/// Layout: 4-byte big-endian unix seconds, 5 bytes unique to this process and
/// a 3-byte counter. Byte order (and therefore hex order) follows creation order,
/// which is what listings sort on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    pub fn new() -> Self {
        let now = chrono::Utc::now().timestamp() as u32;
        let unique = PROCESS_UNIQUE.get_or_init(|| {
            let mut bytes = [0u8; 5];
            bytes.copy_from_slice(&uuid::Uuid::new_v4().as_bytes()[..5]);
            bytes
        });
        let (seconds, count) = CLOCK.lock().advance(now);

        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..9].copy_from_slice(unique);
        bytes[9..].copy_from_slice(&count.to_be_bytes()[1..]);
        Self(bytes)
    }

    pub fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(bytes)
    }

    /// Parses a 24 character hex string. Surrounding whitespace is not accepted.
    pub fn parse_str(s: &str) -> Result<Self, IdError> {
        let mut bytes = [0u8; 12];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self(bytes))
    }

}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for ObjectId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse_str(&s).map_err(serde::de::Error::custom)
    }
}

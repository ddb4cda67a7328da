//! Time-ordered 64-bit identifiers.
//!
//! Layout, high to low: 42 bits of milliseconds since the service epoch,
//! 10 bits of worker id, 12 bits of per-millisecond sequence. Ordering by
//! raw value is creation order, which keeps primary-key indexes append-only.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

const TIMESTAMP_SHIFT: u8 = 22;
const WORKER_SHIFT: u8 = 12;
const WORKER_MASK: i64 = 0x3FF;
const SEQUENCE_MASK: i64 = 0xFFF;

/// Record identifier for every persisted entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Snowflake(i64);

impl Snowflake {
    /// Service epoch: 2024-01-01 00:00:00 UTC, in milliseconds.
    pub const EPOCH: i64 = 1_704_067_200_000;

    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Zero is the uninitialized sentinel and never a valid record id.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Milliseconds since the Unix epoch at which this id was minted.
    #[inline]
    pub fn timestamp(&self) -> i64 {
        (self.0 >> TIMESTAMP_SHIFT) + Self::EPOCH
    }

    /// Worker that minted this id.
    #[inline]
    pub fn worker_id(&self) -> u16 {
        ((self.0 >> WORKER_SHIFT) & WORKER_MASK) as u16
    }

    /// Creation instant recovered from the timestamp bits.
    pub fn created_at(&self) -> chrono::DateTime<chrono::Utc> {
        use chrono::{TimeZone, Utc};
        Utc.timestamp_millis_opt(self.timestamp())
            .single()
            .unwrap_or_else(|| Utc.timestamp_millis_opt(0).unwrap())
    }

    pub fn parse(s: &str) -> Result<Self, SnowflakeParseError> {
        s.parse::<i64>().map(Self).map_err(|_| SnowflakeParseError)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("not a valid snowflake id")]
pub struct SnowflakeParseError;

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for Snowflake {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<Snowflake> for i64 {
    fn from(id: Snowflake) -> Self {
        id.0
    }
}

impl std::str::FromStr for Snowflake {
    type Err = SnowflakeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Snowflake::parse(s)
    }
}

// Emitted as a JSON string: the full i64 range does not survive a round
// trip through a JavaScript number.
impl Serialize for Snowflake {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

// Accepted as either a string or a bare integer.
impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct IdVisitor;

        impl Visitor<'_> for IdVisitor {
            type Value = Snowflake;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a snowflake id as a string or integer")
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Snowflake, E> {
                Ok(Snowflake(value))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Snowflake, E> {
                Ok(Snowflake(value as i64))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Snowflake, E> {
                Snowflake::parse(value).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

/// Lock-free id generator.
///
/// The whole generator state lives in one atomic word: milliseconds since
/// the service epoch in the high bits, the sequence counter in the low 12.
/// Each mint is a single compare-and-swap, so ids from one generator are
/// strictly increasing even under contention, and a clock that steps
/// backwards simply keeps minting in the last observed millisecond.
pub struct SnowflakeGenerator {
    worker_id: u16,
    state: AtomicI64,
}

impl SnowflakeGenerator {
    /// # Panics
    /// Panics if `worker_id` does not fit in 10 bits.
    pub fn new(worker_id: u16) -> Self {
        assert!(i64::from(worker_id) <= WORKER_MASK, "worker id must fit in 10 bits");
        Self {
            worker_id,
            state: AtomicI64::new(0),
        }
    }

    /// Mint the next id.
    pub fn generate(&self) -> Snowflake {
        loop {
            let state = self.state.load(Ordering::Acquire);
            let last_ms = state >> WORKER_SHIFT;
            let now_ms = Self::now_millis() - Snowflake::EPOCH;

            let next = if now_ms > last_ms {
                now_ms << WORKER_SHIFT
            } else {
                let seq = (state & SEQUENCE_MASK) + 1;
                if seq > SEQUENCE_MASK {
                    // 4096 ids already minted in this millisecond
                    std::hint::spin_loop();
                    continue;
                }
                (last_ms << WORKER_SHIFT) | seq
            };

            if self
                .state
                .compare_exchange(state, next, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                let ms = next >> WORKER_SHIFT;
                let seq = next & SEQUENCE_MASK;
                return Snowflake::new(
                    (ms << TIMESTAMP_SHIFT) | (i64::from(self.worker_id) << WORKER_SHIFT) | seq,
                );
            }
        }
    }

    pub fn worker_id(&self) -> u16 {
        self.worker_id
    }

    #[inline]
    fn now_millis() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0)
    }
}

impl Default for SnowflakeGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn raw_value_round_trips() {
        let id = Snowflake::new(123_456_789);
        assert_eq!(id.into_inner(), 123_456_789);
        assert_eq!(i64::from(id), 123_456_789);
    }

    #[test]
    fn default_is_the_zero_sentinel() {
        assert!(Snowflake::default().is_zero());
        assert!(!Snowflake::new(1).is_zero());
    }

    #[test]
    fn parse_accepts_digits_only() {
        assert_eq!(Snowflake::parse("123456789").unwrap().into_inner(), 123_456_789);
        assert!(Snowflake::parse("abc").is_err());
        assert!(Snowflake::parse("").is_err());
    }

    #[test]
    fn serializes_as_a_json_string() {
        let id = Snowflake::new(123_456_789_012_345_678);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"123456789012345678\"");
    }

    #[test]
    fn deserializes_from_string_or_integer() {
        let id: Snowflake = serde_json::from_str("\"123456789012345678\"").unwrap();
        assert_eq!(id.into_inner(), 123_456_789_012_345_678);

        let id: Snowflake = serde_json::from_str("12345").unwrap();
        assert_eq!(id.into_inner(), 12_345);
    }

    #[test]
    fn minted_ids_are_unique_and_increasing() {
        let generator = SnowflakeGenerator::new(1);
        let mut seen = HashSet::new();
        let mut previous = Snowflake::new(0);

        for _ in 0..5000 {
            let id = generator.generate();
            assert!(seen.insert(id));
            assert!(id > previous);
            previous = id;
        }
    }

    #[test]
    fn worker_id_survives_in_the_minted_bits() {
        let generator = SnowflakeGenerator::new(42);
        assert_eq!(generator.generate().worker_id(), 42);
    }

    #[test]
    #[should_panic(expected = "worker id must fit in 10 bits")]
    fn rejects_out_of_range_worker_ids() {
        SnowflakeGenerator::new(1024);
    }
}

//! # Value Objects
//!
//! Immutable domain primitives: implementation versions, timestamps, and
//! the two size-bounded strings (`BoardName`, `Payload`).
//!
//! `Payload` is the fixed-size content encoding for message content,
//! topics, and comments: up to 31 bytes of UTF-8 stored inline. Longer
//! input is rejected at construction, never truncated, so a stored value
//! always round-trips exactly.

use crate::errors::ValueError;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Maximum encodable payload size in bytes (content, topic, comment).
pub const MAX_PAYLOAD_BYTES: usize = 31;

/// Maximum board name length in characters.
pub const MAX_NAME_CHARS: usize = 64;

// =============================================================================
// VERSION
// =============================================================================

/// An implementation version number. Versions start at 1.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize,
)]
pub struct Version(u32);

impl Version {
    /// Creates a version. The value must be >= 1; use [`Version::parse`]
    /// for checked construction from untrusted input.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Checked construction: rejects zero.
    pub fn parse(value: u32) -> Result<Self, ValueError> {
        if value == 0 {
            return Err(ValueError::ZeroVersion);
        }
        Ok(Self(value))
    }

    /// Returns the raw version number.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

// =============================================================================
// TIMESTAMP
// =============================================================================

/// Wall-clock seconds since the Unix epoch.
///
/// Append timestamps are strictly positive; a zero timestamp only appears
/// in defaults and never in a stored record.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Debug, Serialize, Deserialize,
)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Captures the current wall-clock time.
    #[must_use]
    pub fn now() -> Self {
        // Pre-epoch clocks yield 0 here; callers treat 0 as "no timestamp".
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        Self(secs)
    }

    /// Wraps raw epoch seconds.
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    /// Returns epoch seconds.
    #[must_use]
    pub const fn as_secs(&self) -> u64 {
        self.0
    }

    /// Returns true for a real (non-zero) timestamp.
    #[must_use]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// BOARD NAME
// =============================================================================

/// A validated board name: non-empty, at most 64 characters.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardName(String);

impl BoardName {
    /// Validates and wraps a board name.
    pub fn parse(name: impl Into<String>) -> Result<Self, ValueError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValueError::EmptyName);
        }
        let len = name.chars().count();
        if len > MAX_NAME_CHARS {
            return Err(ValueError::NameTooLong {
                len,
                max: MAX_NAME_CHARS,
            });
        }
        Ok(Self(name))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BoardName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// PAYLOAD (fixed-size content encoding)
// =============================================================================

/// A string payload stored in the fixed 31-byte inline encoding.
///
/// Construction rejects anything longer than [`MAX_PAYLOAD_BYTES`] bytes
/// of UTF-8. The stored bytes are always a whole, valid UTF-8 string, so
/// [`Payload::as_str`] is total.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Payload {
    bytes: [u8; MAX_PAYLOAD_BYTES],
    len: u8,
}

impl Payload {
    /// The empty payload.
    pub const EMPTY: Self = Self {
        bytes: [0u8; MAX_PAYLOAD_BYTES],
        len: 0,
    };

    /// Validates and encodes a string into the fixed-size form.
    pub fn parse(s: &str) -> Result<Self, ValueError> {
        let len = s.len();
        if len > MAX_PAYLOAD_BYTES {
            return Err(ValueError::PayloadTooLarge {
                len,
                max: MAX_PAYLOAD_BYTES,
            });
        }
        let mut bytes = [0u8; MAX_PAYLOAD_BYTES];
        bytes[..len].copy_from_slice(s.as_bytes());
        #[allow(clippy::cast_possible_truncation)]
        let len = len as u8;
        Ok(Self { bytes, len })
    }

    /// Returns the payload as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // Invariant: bytes[..len] were copied from a whole &str.
        std::str::from_utf8(&self.bytes[..self.len as usize]).unwrap_or("")
    }

    /// Returns the encoded length in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    /// Returns true for the empty payload.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Payload({:?})", self.as_str())
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Payload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Payload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(DeError::custom)
    }
}

// =============================================================================
// TESTS
// =============================================================================

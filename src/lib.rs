//! Decoder for the readsb heatmap ("ttf") export format.
//!
//! A heatmap file is a gzip compressed array of packed 16 byte entries.
//! The first part of the file is an index, followed by groups of aircraft
//! entries, each group introduced by a slice timestamp marker. See the
//! [ttf] module for the decoder itself.

use chrono::{DateTime, Utc};
use std::fmt;

pub mod ttf;

/// One decoded entry together with its position in the file.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Zero-based entry number, counting suppressed entries too.
    pub seq: u64,
    pub entry: Entry,
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:10}] {}", self.seq, self.entry)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Index(IndexEntry),
    Timestamp(TimestampEntry),
    Squawk(SquawkEntry),
    Position(PositionEntry),
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Index(entry) => write!(f, "index: {}", entry.value),
            Entry::Timestamp(entry) => fmt::Display::fmt(entry, f),
            Entry::Squawk(entry) => write!(
                f,
                "addr: {}, squawk: {}, callsign: {:?}",
                entry.addr,
                entry.squawk,
                entry.callsign()
            ),
            Entry::Position(entry) => write!(
                f,
                "addr_type: {}, addr: {}, lat: {:?}, lon: {:?}, alt: {}, gs: {}",
                entry.addr_type, entry.addr, entry.lat, entry.lon, entry.alt, entry.ground_speed
            ),
        }
    }
}

/// Entry of the index section. The hex field holds an offset into the
/// data section instead of an aircraft address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexEntry {
    pub value: u32,
}

/// Marks the start of an aggregation window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampEntry {
    Interval(SliceInterval),
    Marker(SliceMarker),
}

impl fmt::Display for TimestampEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimestampEntry::Interval(slice) => write!(
                f,
                "{} (start: {}, interval: {}ms)",
                MillisDisplay(slice.slice_stamp_ms),
                MillisDisplay(slice.derived_start_ms),
                slice.interval_ms
            ),
            TimestampEntry::Marker(marker) => write!(
                f,
                "slice stamp: {:#x}, interval: {}",
                marker.slice_stamp as u64, marker.interval
            ),
        }
    }
}

/// Slice timestamp in the repeated-interval form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceInterval {
    /// Milliseconds since the Unix epoch.
    pub slice_stamp_ms: i64,
    pub interval_ms: i16,
    /// `slice_stamp_ms` moved back by one interval per preceding marker.
    pub derived_start_ms: i64,
}

impl SliceInterval {
    pub fn slice_stamp(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.slice_stamp_ms)
    }

    pub fn derived_start(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.derived_start_ms)
    }
}

/// Slice timestamp in the single-marker form, kept as raw bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceMarker {
    pub lat: i32,
    pub lon: i32,
    /// `(lat << 32) | lon` with both halves read signed.
    pub slice_stamp: i64,
    /// Raw alt field, not unit-converted.
    pub interval: i16,
}

impl SliceMarker {
    /// Either 32 bit half is negative when read as signed, which the
    /// writer never produces for a sane timestamp.
    pub fn has_negative_half(&self) -> bool {
        self.lat < 0 || self.lon < 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SquawkEntry {
    /// Raw hex field, address type bits included.
    pub addr: u32,
    pub squawk: u32,
    /// The lon, alt and gs fields serialized back to bytes.
    pub callsign: [u8; 8],
}

impl SquawkEntry {
    /// Callsign as text with trailing NUL and space padding removed.
    pub fn callsign(&self) -> String {
        let end = self
            .callsign
            .iter()
            .rposition(|&b| b != 0 && b != b' ')
            .map_or(0, |pos| pos + 1);
        String::from_utf8_lossy(&self.callsign[..end]).into_owned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionEntry {
    pub addr_type: u8,
    /// Low 27 bits of the hex field.
    pub addr: u32,
    /// Degrees.
    pub lat: f64,
    /// Degrees.
    pub lon: f64,
    pub alt: i16,
    pub ground_speed: i16,
}

struct MillisDisplay(i64);

impl fmt::Display for MillisDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match DateTime::<Utc>::from_timestamp_millis(self.0) {
            Some(time) => write!(f, "{}", time.format("%Y-%m-%d %H:%M:%S UTC")),
            None => write!(f, "{}ms", self.0),
        }
    }
}

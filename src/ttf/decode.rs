use super::classify::RecordKind;
use super::consts::*;
use super::raw::RawRecord;
use crate::{
    Entry, IndexEntry, PositionEntry, SliceInterval, SliceMarker, SquawkEntry, TimestampEntry,
};
use log::warn;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("truncated entry at offset {offset}: {len} of 16 bytes")]
    TruncatedRecord { offset: u64, len: usize },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// How slice timestamp markers are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampForm {
    /// lat/lon hold the two unsigned halves of a millisecond timestamp and
    /// alt the heatmap interval in milliseconds.
    #[default]
    Interval,
    /// lat/lon are read signed and joined into raw bits, alt is passed
    /// through unchanged.
    SingleMarker,
}

/// Field decoding for one pass over a file. Owns the slice marker
/// counter used to derive window start times.
#[derive(Debug, Clone)]
pub struct FieldDecoder {
    form: TimestampForm,
    slices: i64,
}

impl FieldDecoder {
    pub fn new(form: TimestampForm) -> Self {
        Self { form, slices: 0 }
    }

    pub fn decode(&mut self, kind: RecordKind, record: &RawRecord) -> Entry {
        match kind {
            RecordKind::Index => Entry::Index(decode_index(record)),
            RecordKind::Timestamp => Entry::Timestamp(self.decode_timestamp(record)),
            RecordKind::Squawk => Entry::Squawk(decode_squawk(record)),
            RecordKind::Position => Entry::Position(decode_position(record)),
        }
    }

    fn decode_timestamp(&mut self, record: &RawRecord) -> TimestampEntry {
        match self.form {
            TimestampForm::Interval => {
                let slice = decode_slice_interval(record, self.slices);
                self.slices += 1;
                TimestampEntry::Interval(slice)
            }
            TimestampForm::SingleMarker => TimestampEntry::Marker(decode_slice_marker(record)),
        }
    }
}

fn decode_index(record: &RawRecord) -> IndexEntry {
    IndexEntry {
        value: record.hex(),
    }
}

fn decode_slice_interval(record: &RawRecord, preceding: i64) -> SliceInterval {
    let high = record.u32_le(LAT_OFFSET) as u64;
    let low = record.u32_le(LON_OFFSET) as u64;
    let slice_stamp_ms = ((high << 32) | low) as i64;
    let interval_ms = record.alt();

    let derived_start_ms =
        slice_stamp_ms.wrapping_sub(preceding.wrapping_mul(i64::from(interval_ms)));

    SliceInterval {
        slice_stamp_ms,
        interval_ms,
        derived_start_ms,
    }
}

fn decode_slice_marker(record: &RawRecord) -> SliceMarker {
    let lat = record.lat();
    let lon = record.lon();

    let marker = SliceMarker {
        lat,
        lon,
        slice_stamp: (i64::from(lat) << 32) | i64::from(lon),
        interval: record.alt(),
    };
    if marker.has_negative_half() {
        warn!("lat or lon is negative: lat={lat}, lon={lon}");
    }
    marker
}

fn decode_squawk(record: &RawRecord) -> SquawkEntry {
    let lat = record.lat();
    let lon = record.lon();
    let alt = record.alt();
    let gs = record.gs();

    // the writer packs the callsign over lon/alt/gs, so put the numbers
    // back into bytes at their stored widths
    let mut callsign = [0u8; 8];
    callsign[0..4].copy_from_slice(&lon.to_le_bytes());
    callsign[4..6].copy_from_slice(&alt.to_le_bytes());
    callsign[6..8].copy_from_slice(&gs.to_le_bytes());

    SquawkEntry {
        addr: record.hex(),
        squawk: (lat & !SQUAWK_MARKER) as u32,
        callsign,
    }
}

fn decode_position(record: &RawRecord) -> PositionEntry {
    let hex = record.hex();

    PositionEntry {
        addr_type: ((hex >> ADDR_TYPE_SHIFT) & ADDR_TYPE_MASK) as u8,
        addr: hex & ADDR_MASK,
        lat: f64::from(record.lat()) / LL_SCALE,
        lon: f64::from(record.lon()) / LL_SCALE,
        alt: record.alt(),
        ground_speed: record.gs(),
    }
}

pub const RECORD_SIZE: usize = 16;

/// Hex value of the slice timestamp marker. Its first occurrence also ends
/// the index section.
pub const SLICE_MARKER_HEX: u32 = 0x0e7f_7c9d;

/// Set in the lat field of squawk/callsign entries.
pub const SQUAWK_MARKER: i32 = 1 << 30;

pub const LL_SCALE: f64 = 1e6;

pub const ADDR_TYPE_SHIFT: u32 = 27;
pub const ADDR_TYPE_MASK: u32 = 0b11111;
pub const ADDR_MASK: u32 = 0x07ff_ffff;

pub const HEX_OFFSET: usize = 0;
pub const LAT_OFFSET: usize = 4;
pub const LON_OFFSET: usize = 8;
pub const ALT_OFFSET: usize = 12;
pub const GS_OFFSET: usize = 14;

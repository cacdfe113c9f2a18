use super::consts::*;

/// One packed heat entry, exactly as stored:
///
/// ```text
/// struct heatEntry {
///     int32_t hex;
///     int32_t lat;
///     int32_t lon;
///     int16_t alt;
///     int16_t gs;
/// } __attribute__ ((__packed__));
/// ```
///
/// All fields are little-endian. Decoders pick the interpretation they
/// need through the accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRecord([u8; RECORD_SIZE]);

impl RawRecord {
    pub fn new(bytes: [u8; RECORD_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; RECORD_SIZE] {
        &self.0
    }

    pub fn u32_le(&self, offset: usize) -> u32 {
        u32::from_le_bytes(self.array(offset))
    }

    pub fn i32_le(&self, offset: usize) -> i32 {
        i32::from_le_bytes(self.array(offset))
    }

    pub fn i16_le(&self, offset: usize) -> i16 {
        i16::from_le_bytes(self.array(offset))
    }

    pub fn hex(&self) -> u32 {
        self.u32_le(HEX_OFFSET)
    }

    pub fn lat(&self) -> i32 {
        self.i32_le(LAT_OFFSET)
    }

    pub fn lon(&self) -> i32 {
        self.i32_le(LON_OFFSET)
    }

    pub fn alt(&self) -> i16 {
        self.i16_le(ALT_OFFSET)
    }

    pub fn gs(&self) -> i16 {
        self.i16_le(GS_OFFSET)
    }

    fn array<const N: usize>(&self, offset: usize) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(&self.0[offset..offset + N]);
        out
    }
}

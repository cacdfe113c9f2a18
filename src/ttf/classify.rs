use super::consts::*;
use super::raw::RawRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Index,
    Data,
}

/// Which section the entry carrying the first slice marker belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SentinelRule {
    /// Switch to the data section, then classify. The first marker is a
    /// timestamp entry like every later one.
    #[default]
    TransitionFirst,
    /// Classify with the section in effect before the switch, so the first
    /// marker shows up as an index entry.
    Legacy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Index,
    Timestamp,
    Squawk,
    Position,
}

/// Assigns entries to their variant. The only state is the current
/// section, which moves from index to data exactly once.
#[derive(Debug, Clone)]
pub struct Classifier {
    section: Section,
    rule: SentinelRule,
}

impl Classifier {
    pub fn new(rule: SentinelRule) -> Self {
        Self {
            section: Section::Index,
            rule,
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn classify(&mut self, record: &RawRecord) -> RecordKind {
        let hex = record.hex();
        let before = self.section;

        if self.section == Section::Index && hex == SLICE_MARKER_HEX {
            self.section = Section::Data;
        }

        let section = match self.rule {
            SentinelRule::TransitionFirst => self.section,
            SentinelRule::Legacy => before,
        };

        classify_in(section, record)
    }
}

/// Classification as a pure function of the section and the entry bytes.
pub fn classify_in(section: Section, record: &RawRecord) -> RecordKind {
    if section == Section::Index {
        RecordKind::Index
    } else if record.hex() == SLICE_MARKER_HEX {
        RecordKind::Timestamp
    } else if record.lat() & SQUAWK_MARKER != 0 {
        RecordKind::Squawk
    } else {
        RecordKind::Position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(hex: u32, lat: i32) -> RawRecord {
        let mut buf = [0u8; RECORD_SIZE];
        buf[HEX_OFFSET..HEX_OFFSET + 4].copy_from_slice(&hex.to_le_bytes());
        buf[LAT_OFFSET..LAT_OFFSET + 4].copy_from_slice(&lat.to_le_bytes());
        RawRecord::new(buf)
    }

    #[test]
    fn index_section_entries_are_index() {
        let mut classifier = Classifier::new(SentinelRule::TransitionFirst);
        assert_eq!(classifier.classify(&record(5, 0x4000_0000)), RecordKind::Index);
        assert_eq!(classifier.section(), Section::Index);
    }

    #[test]
    fn sentinel_switches_to_data_section() {
        let mut classifier = Classifier::new(SentinelRule::TransitionFirst);
        assert_eq!(
            classifier.classify(&record(SLICE_MARKER_HEX, 0)),
            RecordKind::Timestamp
        );
        assert_eq!(classifier.section(), Section::Data);
    }

    #[test]
    fn legacy_rule_keeps_first_sentinel_in_index() {
        let mut classifier = Classifier::new(SentinelRule::Legacy);
        assert_eq!(
            classifier.classify(&record(SLICE_MARKER_HEX, 0)),
            RecordKind::Index
        );
        assert_eq!(classifier.section(), Section::Data);
        assert_eq!(
            classifier.classify(&record(SLICE_MARKER_HEX, 0)),
            RecordKind::Timestamp
        );
    }

    #[test]
    fn near_miss_sentinel_does_not_switch() {
        let mut classifier = Classifier::new(SentinelRule::TransitionFirst);
        classifier.classify(&record(SLICE_MARKER_HEX + 1, 0));
        classifier.classify(&record(SLICE_MARKER_HEX.swap_bytes(), 0));
        assert_eq!(classifier.section(), Section::Index);
    }

    #[test]
    fn data_section_never_returns_to_index() {
        let mut classifier = Classifier::new(SentinelRule::TransitionFirst);
        classifier.classify(&record(SLICE_MARKER_HEX, 0));
        for hex in [0, 5, SLICE_MARKER_HEX, u32::MAX] {
            assert_ne!(classifier.classify(&record(hex, 0)), RecordKind::Index);
        }
        assert_eq!(classifier.section(), Section::Data);
    }

    #[test]
    fn squawk_bit_selects_squawk() {
        let squawk = record(0x0123_4567, (1 << 30) | 1200);
        assert_eq!(classify_in(Section::Data, &squawk), RecordKind::Squawk);
        // negative coordinates keep bit 30 set
        let south = record(0x0123_4567, -1);
        assert_eq!(classify_in(Section::Data, &south), RecordKind::Squawk);
    }

    #[test]
    fn everything_else_is_position() {
        let position = record(0x0123_4567, 37_774_900);
        assert_eq!(classify_in(Section::Data, &position), RecordKind::Position);
        let max = record(0x0123_4567, SQUAWK_MARKER - 1);
        assert_eq!(classify_in(Section::Data, &max), RecordKind::Position);
    }
}

use super::classify::{Classifier, Section, SentinelRule};
use super::decode::{DecodeError, FieldDecoder, TimestampForm};
use super::read::RecordReader;
use crate::{Entry, Record};
use log::{debug, trace};
use std::io::Read;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeOptions {
    /// Also yield index section entries.
    pub verbose: bool,
    pub sentinel: SentinelRule,
    pub timestamp_form: TimestampForm,
}

/// Decodes one heatmap stream, yielding records in file order.
///
/// Every entry read gets the next sequence number, including index entries
/// that are suppressed when not running verbose. A truncated trailing entry
/// is yielded as an error once, after which the iterator is exhausted.
pub struct Decoder<R: Read> {
    reader: RecordReader<R>,
    classifier: Classifier,
    fields: FieldDecoder,
    verbose: bool,
    next_seq: u64,
    done: bool,
}

impl<R: Read> Decoder<R> {
    pub fn new(inner: R, options: DecodeOptions) -> Self {
        Self {
            reader: RecordReader::new(inner),
            classifier: Classifier::new(options.sentinel),
            fields: FieldDecoder::new(options.timestamp_form),
            verbose: options.verbose,
            next_seq: 0,
            done: false,
        }
    }

    /// Number of entries read so far.
    pub fn record_count(&self) -> u64 {
        self.next_seq
    }

    fn next_record(&mut self) -> Result<Option<Record>, DecodeError> {
        while let Some(raw) = self.reader.read_record()? {
            let seq = self.next_seq;
            self.next_seq += 1;

            let section = self.classifier.section();
            let kind = self.classifier.classify(&raw);
            if section == Section::Index && self.classifier.section() == Section::Data {
                debug!("index section ends at entry {seq}");
            }
            trace!("entry {seq}: {kind:?}");

            let entry = self.fields.decode(kind, &raw);
            if matches!(entry, Entry::Index(_)) && !self.verbose {
                continue;
            }
            return Ok(Some(Record { seq, entry }));
        }

        debug!("end of stream after {} entries", self.next_seq);
        Ok(None)
    }
}

impl<R: Read> Iterator for Decoder<R> {
    type Item = Result<Record, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

#[derive(Debug)]
pub struct DecodedFile {
    pub records: Vec<Record>,
    /// Entries read, suppressed ones included.
    pub record_count: u64,
    /// Set when decoding stopped early. Records before the failure are
    /// still in `records`.
    pub error: Option<DecodeError>,
}

/// Decodes an already decompressed heatmap file.
pub fn decode_file(data: &[u8], options: DecodeOptions) -> DecodedFile {
    let mut decoder = Decoder::new(data, options);
    let mut records = Vec::new();
    let mut error = None;

    for result in decoder.by_ref() {
        match result {
            Ok(record) => records.push(record),
            Err(err) => error = Some(err),
        }
    }

    DecodedFile {
        records,
        record_count: decoder.record_count(),
        error,
    }
}

/// Opens a gzip compressed heatmap file for decoding.
#[cfg(feature = "gzip")]
pub fn open(
    path: impl AsRef<std::path::Path>,
    options: DecodeOptions,
) -> std::io::Result<Decoder<flate2::read::GzDecoder<std::io::BufReader<std::fs::File>>>> {
    let file = std::fs::File::open(path)?;
    let gz = flate2::read::GzDecoder::new(std::io::BufReader::new(file));
    Ok(Decoder::new(gz, options))
}

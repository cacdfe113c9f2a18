use clap::Parser;
use heatmap::ttf::{self, DecodeOptions, Decoder, SentinelRule, TimestampForm};
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
struct Options {
    /// Paths to the heatmap files
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Also print index section entries
    #[arg(short, long)]
    verbose: bool,

    /// Classify the first slice marker as an index entry
    #[arg(long)]
    legacy_sentinel: bool,

    /// Slice markers use the single-marker layout
    #[arg(long)]
    single_marker: bool,

    /// Input files are not gzip compressed
    #[arg(long)]
    plain: bool,
}

/// Prints library warnings to stderr.
struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{}: {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

fn main() -> anyhow::Result<()> {
    let options = Options::parse();

    log::set_logger(&StderrLogger).map_err(|err| anyhow::anyhow!("{err}"))?;
    log::set_max_level(if options.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    });

    let decode_options = DecodeOptions {
        verbose: options.verbose,
        sentinel: if options.legacy_sentinel {
            SentinelRule::Legacy
        } else {
            SentinelRule::TransitionFirst
        },
        timestamp_form: if options.single_marker {
            TimestampForm::SingleMarker
        } else {
            TimestampForm::Interval
        },
    };

    let mut failures = 0;
    for input in &options.inputs {
        println!("Decoding {}.", input.display());

        if let Err(err) = decode_path(input, options.plain, decode_options) {
            eprintln!("ERROR: {}: {:#}", input.display(), err);
            failures += 1;
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} file(s) could not be decoded completely");
    }
    Ok(())
}

fn decode_path(input: &Path, plain: bool, options: DecodeOptions) -> anyhow::Result<()> {
    if plain {
        let file = BufReader::new(std::fs::File::open(input)?);
        print_records(Decoder::new(file, options))?;
    } else {
        print_records(ttf::open(input, options)?)?;
    }
    Ok(())
}

fn print_records<R: Read>(decoder: Decoder<R>) -> Result<(), ttf::DecodeError> {
    for result in decoder {
        println!("{}", result?);
    }
    Ok(())
}

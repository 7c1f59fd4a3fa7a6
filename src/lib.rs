//! seq2gif - convert ttyrec terminal recordings into animated GIFs.
//!
//! A recording is replayed through a virtual terminal; the screen is
//! rendered and quantized into a fixed 256-color palette whenever the
//! sampler decides to capture, and the frames are encoded as GIF89a.

pub mod config;
pub mod encoder;
pub mod error;
pub mod logging;
pub mod palette;
pub mod pipeline;
pub mod record;
pub mod sampler;
pub mod terminal;

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

pub use config::Config;
pub use error::Error;
pub use pipeline::{Pipeline, RunSummary, TimelineOptions};

use encoder::GifEncoder;
use terminal::VtTerminal;

/// Path meaning standard input or standard output.
pub const STDIO: &str = "-";

/// Convert `input` into a GIF at `output` using validated `config`.
///
/// The encoder is initialized and both streams are opened before any
/// record is read. The output only appears once encoding finished. A
/// truncated record stream still writes the frames captured so far; check
/// [`RunSummary::is_truncated`].
pub fn convert(config: &Config, input: &str, output: &str) -> Result<RunSummary, Error> {
    let settings = config.terminal_settings();
    let (width, height) = settings.pixel_size();
    let colormap = palette::build_colormap();
    let encoder = GifEncoder::open(width, height, &colormap).map_err(Error::EncoderInit)?;
    let terminal = VtTerminal::new(&settings);

    let reader = open_input(input)?;
    let sink = OutputSink::open(output)?;

    info!(
        "Converting {} to {} ({}x{} cells, {}x{} pixels)",
        input, output, settings.cols, settings.rows, width, height
    );
    let pipeline = Pipeline::new(terminal, encoder, config.timeline_options());
    let (bytes, summary) = pipeline.run(reader)?;
    sink.commit(&bytes)?;

    info!(
        "Wrote {} frames from {} events ({})",
        summary.frames,
        summary.events,
        humansize::format_size(summary.size, humansize::BINARY)
    );
    Ok(summary)
}

/// Run one conversion with the configuration file settings and return the
/// process exit status: 0 on success, 1 on any failure or a truncated
/// record stream.
pub fn convert_paths(input: &str, output: &str) -> i32 {
    let result = Config::load(None)
        .map_err(Error::from)
        .and_then(|config| convert(&config, input, output));
    exit_status(&result)
}

/// Exit status for a conversion result.
pub fn exit_status(result: &Result<RunSummary, Error>) -> i32 {
    match result {
        Ok(summary) if !summary.is_truncated() => 0,
        Ok(_) => 1,
        Err(err) => {
            error!("{err}");
            1
        }
    }
}

fn open_input(path: &str) -> Result<Box<dyn Read>, Error> {
    if path == STDIO {
        return Ok(Box::new(io::stdin().lock()));
    }
    let file = File::open(path).map_err(|source| Error::OpenInput {
        path: Path::new(path).to_path_buf(),
        source,
    })?;
    Ok(Box::new(BufReader::new(file)))
}

/// Where the encoded GIF goes.
///
/// A regular file is written next to its destination under a `.tmp` name
/// and renamed into place on commit, so a failed run leaves no partial
/// output behind.
enum OutputSink {
    Stdout,
    Direct(PathBuf),
    Staged(StagedFile),
}

impl OutputSink {
    fn open(path: &str) -> Result<Self, Error> {
        if path == STDIO {
            return Ok(OutputSink::Stdout);
        }
        let path = PathBuf::from(path);
        let open_err = |source| Error::OpenOutput {
            path: path.clone(),
            source,
        };
        match fs::metadata(&path) {
            // Devices and pipes cannot be replaced by a rename
            Ok(meta) if !meta.is_file() => {
                OpenOptions::new()
                    .write(true)
                    .open(&path)
                    .map_err(open_err)?;
                Ok(OutputSink::Direct(path))
            }
            _ => {
                let mut temp = path.clone().into_os_string();
                temp.push(".tmp");
                let temp = PathBuf::from(temp);
                let file = File::create(&temp).map_err(open_err)?;
                Ok(OutputSink::Staged(StagedFile {
                    path,
                    temp,
                    writer: Some(BufWriter::new(file)),
                    committed: false,
                }))
            }
        }
    }

    fn commit(self, bytes: &[u8]) -> Result<(), Error> {
        match self {
            OutputSink::Stdout => write_flushed(io::stdout().lock(), bytes),
            OutputSink::Direct(path) => {
                let file = OpenOptions::new()
                    .write(true)
                    .open(&path)
                    .map_err(Error::WriteOutput)?;
                write_flushed(BufWriter::new(file), bytes)
            }
            OutputSink::Staged(staged) => staged.commit(bytes),
        }
    }
}

/// Temporary output file, removed on drop unless committed.
struct StagedFile {
    path: PathBuf,
    temp: PathBuf,
    writer: Option<BufWriter<File>>,
    committed: bool,
}

impl StagedFile {
    fn commit(mut self, bytes: &[u8]) -> Result<(), Error> {
        if let Some(writer) = self.writer.take() {
            write_flushed(writer, bytes)?;
        }
        fs::rename(&self.temp, &self.path).map_err(Error::WriteOutput)?;
        self.committed = true;
        debug!("Renamed {} to {}", self.temp.display(), self.path.display());
        Ok(())
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        self.writer = None;
        if let Err(err) = fs::remove_file(&self.temp) {
            debug!("Failed to remove {}: {err}", self.temp.display());
        }
    }
}

fn write_flushed<W: Write>(mut writer: W, bytes: &[u8]) -> Result<(), Error> {
    writer
        .write_all(bytes)
        .and_then(|()| writer.flush())
        .map_err(Error::WriteOutput)
}

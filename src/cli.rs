//! Command-line interface.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{value_parser, ArgAction, Parser};

use seq2gif::{logging, Config};

const LICENSE: &str = "\
License GPLv3+: GNU GPL version 3 or later <https://gnu.org/licenses/gpl.html>.
This is free software: you are free to change and redistribute it.
There is NO WARRANTY, to the extent permitted by law.
";

#[derive(Debug, Parser)]
#[command(
    name = "seq2gif",
    about = "Convert a ttyrec record into an animated GIF",
    override_usage = "seq2gif [OPTIONS] < ttyrecord > record.gif",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Terminal width in cells
    #[arg(short = 'w', long, value_parser = value_parser!(u16).range(1..))]
    pub width: Option<u16>,

    /// Terminal height in cells
    #[arg(short = 'h', long, value_parser = value_parser!(u16).range(1..))]
    pub height: Option<u16>,

    /// Extra time the last frame is shown, in milliseconds (0 disables)
    #[arg(short = 'l', long, value_name = "MS")]
    pub last_frame_delay: Option<u32>,

    /// Default foreground palette index (0-255)
    #[arg(short = 'f', long, value_name = "COLOR")]
    pub foreground_color: Option<u8>,

    /// Default background palette index (0-255)
    #[arg(short = 'b', long, value_name = "COLOR")]
    pub background_color: Option<u8>,

    /// Cursor palette index (0-255)
    #[arg(short = 'c', long, value_name = "COLOR")]
    pub cursor_color: Option<u8>,

    /// Hardware tab width (0-255)
    #[arg(short = 't', long)]
    pub tabstop: Option<u8>,

    /// Treat East-Asian ambiguous width characters as wide
    #[arg(short = 'j', long)]
    pub cjkwidth: bool,

    /// Animation loop count (0 = infinite)
    #[arg(short = 'r', long)]
    pub repeat: Option<u16>,

    /// Input ttyrec file, "-" for stdin
    #[arg(short = 'i', long, default_value = seq2gif::STDIO)]
    pub input: String,

    /// Output GIF file, "-" for stdout
    #[arg(short = 'o', long, default_value = seq2gif::STDIO)]
    pub output: String,

    /// Configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Show version and license
    #[arg(short = 'V', long)]
    pub version: bool,

    /// Show help
    #[arg(short = 'H', long, action = ArgAction::Help)]
    help: Option<bool>,
}

impl Cli {
    pub fn run(&self) -> Result<ExitCode> {
        if self.version {
            print!("{}", version_text());
            return Ok(ExitCode::SUCCESS);
        }

        logging::init(self.verbose);

        let mut config =
            Config::load(self.config.as_deref()).context("Failed to load configuration")?;
        self.apply(&mut config);
        config.validate()?;

        let summary = seq2gif::convert(&config, &self.input, &self.output)?;
        if summary.is_truncated() {
            return Ok(ExitCode::FAILURE);
        }
        Ok(ExitCode::SUCCESS)
    }

    /// Override config values with flags given on the command line.
    pub fn apply(&self, config: &mut Config) {
        if let Some(width) = self.width {
            config.width = usize::from(width);
        }
        if let Some(height) = self.height {
            config.height = usize::from(height);
        }
        if let Some(delay) = self.last_frame_delay {
            config.last_frame_delay = delay;
        }
        if let Some(color) = self.foreground_color {
            config.foreground_color = u32::from(color);
        }
        if let Some(color) = self.background_color {
            config.background_color = u32::from(color);
        }
        if let Some(color) = self.cursor_color {
            config.cursor_color = u32::from(color);
        }
        if let Some(tabstop) = self.tabstop {
            config.tabstop = u32::from(tabstop);
        }
        if self.cjkwidth {
            config.cjkwidth = true;
        }
        if let Some(repeat) = self.repeat {
            config.repeat = u32::from(repeat);
        }
    }
}

pub fn version_text() -> String {
    let sha = option_env!("VERGEN_GIT_SHA").unwrap_or("unknown");
    let date = env!("SEQ2GIF_BUILD_DATE");
    let build = if cfg!(feature = "release") {
        format!("built {date}")
    } else {
        format!("git {sha}, built {date}")
    };
    format!(
        "seq2gif {} ({build})\n{LICENSE}",
        env!("CARGO_PKG_VERSION")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("seq2gif").chain(args.iter().copied()))
    }

    #[test]
    fn defaults() {
        let cli = parse(&[]).unwrap();
        assert_eq!(cli.input, "-");
        assert_eq!(cli.output, "-");
        assert_eq!(cli.width, None);
        assert!(!cli.cjkwidth);

        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn short_flags() {
        let cli = parse(&[
            "-w", "132", "-h", "43", "-l", "0", "-f", "15", "-b", "4", "-c", "1", "-t", "4", "-j",
            "-r", "2", "-i", "in.rec", "-o", "out.gif",
        ])
        .unwrap();

        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(
            config,
            Config {
                width: 132,
                height: 43,
                last_frame_delay: 0,
                foreground_color: 15,
                background_color: 4,
                cursor_color: 1,
                tabstop: 4,
                cjkwidth: true,
                repeat: 2,
            }
        );
        assert_eq!(cli.input, "in.rec");
        assert_eq!(cli.output, "out.gif");
    }

    #[test]
    fn flags_override_config_values() {
        let cli = parse(&["--repeat", "5"]).unwrap();
        let mut config = Config {
            repeat: 1,
            width: 100,
            ..Config::default()
        };
        cli.apply(&mut config);
        assert_eq!(config.repeat, 5);
        assert_eq!(config.width, 100);
    }

    #[test]
    fn help_uses_capital_h() {
        let err = parse(&["-H"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(parse(&["-w", "0"]).is_err());
        assert!(parse(&["-f", "256"]).is_err());
        assert!(parse(&["-r", "65536"]).is_err());
        assert!(parse(&["-l", "-1"]).is_err());
    }

    #[test]
    fn verbosity_counts() {
        assert_eq!(parse(&["-vv"]).unwrap().verbose, 2);
    }

    #[test]
    fn version_text_names_license() {
        let text = version_text();
        assert!(text.starts_with(&format!("seq2gif {}", env!("CARGO_PKG_VERSION"))));
        assert!(text.contains("GPLv3+"));
    }

    #[test]
    fn cli_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}

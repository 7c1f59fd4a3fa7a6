mod cli;

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;

use cli::Cli;

#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    match cli.run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("seq2gif: {err:#}");
            ExitCode::FAILURE
        }
    }
}

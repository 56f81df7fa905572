use clap::Parser;
use colcheck_cli::args::Args;
use colcheck_cli::config::Settings;
use std::io::BufWriter;
use std::process::ExitCode;

const EXIT_DIAGNOSTICS: u8 = 1;
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    let args = Args::parse();
    colcheck_cli::logging::init();

    let cwd = std::env::current_dir().unwrap_or_else(|_| ".".into());
    let settings = match Settings::resolve(args, &cwd) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Application Error: {e}");
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let mut out = BufWriter::new(std::io::stdout().lock());
    let mut err = std::io::stderr();
    match colcheck_cli::execute(&settings, &mut out, &mut err) {
        Ok(summary) if summary.is_clean() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(EXIT_DIAGNOSTICS),
        Err(e) => {
            drop(out);
            eprintln!("Application Error: {e}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

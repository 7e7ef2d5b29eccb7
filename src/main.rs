// filesum entry point
// Parses arguments, dispatches to the library, and maps results to exit codes

use clap::{CommandFactory, Parser};
use colored::Colorize;

use filesum::cli::{self, Cli};

fn main() {
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Help and version go to stdout and exit 0; anything else is invalid usage
            let _ = err.print();
            std::process::exit(if err.use_stderr() { 1 } else { 0 });
        }
    };

    if let Err(err) = cli::run(cli) {
        eprintln!("{} {}", "error:".red().bold(), err);
        eprintln!();
        eprintln!("{}", Cli::command().render_usage());
        std::process::exit(1);
    }
}

//! treesame CLI - a changelog between two branches measured from the nearest
//! tree state they share.

use clap::Parser;

mod commands;
mod output;

use commands::Cli;

fn main() {
    let cli = Cli::parse();
    output::set_quiet(cli.quiet);
    output::set_verbose(cli.verbose);

    if let Err(e) = commands::changelog::run(&cli) {
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

//! Census extract preparation CLI.

use anyhow::Result;
use clap::Parser;

use ipums_cli::cli::{Cli, Command};
use ipums_cli::commands::{run_data, run_ddl, run_vals, run_vars};
use ipums_cli::logging::init_logging;
use ipums_cli::summary::{
    print_ddl, print_label_summary, print_transcode_summary, print_value_label_summary,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    if let Err(error) = init_logging(&cli.log_config()) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match &cli.command {
        Command::Ddl(args) => finish(run_ddl(args), |ddl| print_ddl(ddl)),
        Command::Vars(args) => finish(run_vars(args), print_label_summary),
        Command::Vals(args) => finish(run_vals(args), print_value_label_summary),
        Command::Data(args) => finish(run_data(args), print_transcode_summary),
    };
    std::process::exit(exit_code);
}

fn finish<T>(result: Result<T>, report: impl FnOnce(&T)) -> i32 {
    match result {
        Ok(value) => {
            report(&value);
            0
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    }
}

extern crate env_logger;
#[macro_use]
extern crate log;
use std::io::{stdout, Write};
use std::process::ExitCode;

use anyhow::Result;

mod cli;
mod collection;
mod reader;
mod record;
mod timing;

use cli::Invocation;
use timing::Progress;

/// Logs an error, followed by every error in its chain of causes.
fn report_error(err: &anyhow::Error) {
    error!("{}", err);

    err.chain()
        .skip(1)
        .for_each(|cause| error!("  because: {}", cause));
}

fn print_usage() {
    eprintln!("{}", cli::usage());
}

fn try_main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .init();

    let invocation = match Invocation::from_args(std::env::args_os()) {
        Ok(invocation) => invocation,
        Err(err) => {
            // --help and --version also arrive here, and are not failures
            err.print()?;
            return Ok(if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            });
        }
    };

    for flag in &invocation.unknown_flags {
        error!("Unknown option '{flag}'");
        print_usage();
    }

    let mut progress = Progress::new(stdout(), invocation.cli.progress);
    let mut files_processed = 0;
    let mut failed = false;

    for job in &invocation.jobs {
        info!("Loading '{}' {} time(s)", job.path, job.repeats);

        match timing::load_repeatedly(&job.path, job.repeats, &mut progress) {
            Ok(summary) => {
                let mut out = stdout().lock();
                summary.report(&mut out, &job.path)?;
                out.flush()?;
                files_processed += 1;
            }
            Err(err) => {
                report_error(&err);
                error!("Processing '{}' failed", job.path);
                failed = true;
            }
        }
    }

    if files_processed == 0 {
        error!("No data processed -- provide the name of a file on the command line");
        print_usage();
        return Ok(ExitCode::FAILURE);
    }

    if failed {
        return Ok(ExitCode::FAILURE);
    }

    info!("Completed successfully.");
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    match try_main() {
        Ok(code) => code,
        Err(err) => {
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}

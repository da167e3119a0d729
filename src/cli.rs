use clap::builder::styling::AnsiColor;
use clap::builder::Styles;
use clap::{Arg, ArgAction, ArgMatches, Command, CommandFactory, FromArgMatches, Parser};
use std::ffi::OsString;

const fn extra_build_info() -> &'static str {
    match option_env!("CARGO_BUILD_DESC") {
        Some(e) => e,
        None => env!("CARGO_PKG_VERSION"),
    }
}
pub const VERSION: &str = extra_build_info();
const ABOUT_STRING: &str = "Prints timing of loading and storing FASTA records.";
const AFTER_STRING: &str = indoc::indoc! {"
    -R applies to every file which follows it, so
        fastaload a.fa -R 5 b.fa c.fa
    loads a.fa once, and b.fa and c.fa five times each.
    The time reported for each file is the average over its loads."};

// colouring of the help
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().bold())
    .usage(AnsiColor::BrightMagenta.on_default().bold())
    .literal(AnsiColor::BrightMagenta.on_default())
    .placeholder(AnsiColor::White.on_default());

#[derive(Parser, Debug)]
#[command(
    version = VERSION,
    about = ABOUT_STRING,
    after_help = AFTER_STRING,
    styles = STYLES
)]
pub struct Cli {
    /// number of times to repeat the load of the files that follow.
    /// the time reported will be the average time.
    #[arg(
        short = 'R',
        long,
        value_name = "REPEATS",
        action = ArgAction::Append,
        value_parser = clap::value_parser!(u64).range(1..),
        verbatim_doc_comment
    )]
    pub repeats: Vec<u64>,

    /// print a progress dot every this many records (0 to disable)
    #[arg(
        long,
        value_name = "RECORDS",
        action = ArgAction::Set,
        default_value_t = crate::timing::DEFAULT_PROGRESS_INTERVAL
    )]
    pub progress: usize,

    /// the FASTA files to load
    #[arg(value_name = "FILE")]
    pub files: Vec<String>,
}

/// A file to load, along with the number of times to load it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub path: String,
    pub repeats: u64,
}

/// The result of parsing the command line: the options, the files to load in order, and
/// any flags that were not recognised.
#[derive(Debug)]
pub struct Invocation {
    pub cli: Cli,
    pub jobs: Vec<Job>,
    pub unknown_flags: Vec<String>,
}

impl Invocation {
    /// Parses the command line.
    ///
    /// Unrecognised flags are not an error; they are set aside in `unknown_flags` so that
    /// the caller can warn about them and carry on.
    ///
    /// # Errors
    ///
    /// Returns the clap error for a missing or invalid value, and for `--help` and
    /// `--version` (use `clap::Error::use_stderr` to tell these apart).
    pub fn from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut command = Cli::command();
        let (known, unknown_flags) = split_unknown_flags(&command, args);

        let matches = command.try_get_matches_from_mut(known)?;
        let cli = Cli::from_arg_matches(&matches)?;
        let jobs = schedule_jobs(&matches, &cli);

        Ok(Self {
            cli,
            jobs,
            unknown_flags,
        })
    }
}

/// Renders the full help text, without colours.
pub fn usage() -> String {
    Cli::command().render_help().to_string()
}

/// Pairs each file with the value of the last `-R` given before it on the command line.
fn schedule_jobs(matches: &ArgMatches, cli: &Cli) -> Vec<Job> {
    let repeat_positions: Vec<(usize, u64)> = matches
        .indices_of("repeats")
        .map(|indices| indices.zip(cli.repeats.iter().copied()).collect())
        .unwrap_or_default();

    let file_positions = matches.indices_of("files").into_iter().flatten();

    cli.files
        .iter()
        .zip(file_positions)
        .map(|(path, position)| Job {
            path: path.clone(),
            repeats: repeat_positions
                .iter()
                .take_while(|(p, _)| *p < position)
                .last()
                .map_or(1, |(_, n)| *n),
        })
        .collect()
}

/// Separates the arguments that `command` does not know about from those it does. The
/// program name is kept as the first known argument.
fn split_unknown_flags<I, T>(command: &Command, args: I) -> (Vec<OsString>, Vec<String>)
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args = args.into_iter().map(Into::into);
    let mut known: Vec<OsString> = args.next().into_iter().collect();
    let mut unknown = Vec::new();

    let mut expect_value = false;
    let mut positional_only = false;

    for arg in args {
        if expect_value || positional_only {
            expect_value = false;
            known.push(arg);
            continue;
        }

        let Some(text) = arg.to_str() else {
            known.push(arg);
            continue;
        };

        if text == "--" {
            positional_only = true;
        } else if text.starts_with('-') && text != "-" {
            match lookup_flag(command, text) {
                Some(takes_value) => expect_value = takes_value,
                None => {
                    unknown.push(text.to_string());
                    continue;
                }
            }
        }
        known.push(arg);
    }

    (known, unknown)
}

/// Looks up a `-x`/`--long` flag. Returns `None` if it is unknown, or otherwise whether the
/// next argument is its value.
fn lookup_flag(command: &Command, flag: &str) -> Option<bool> {
    let takes_separate_value = |arg: &Arg, attached: bool| {
        !attached && arg.get_action().takes_values()
    };

    if let Some(long) = flag.strip_prefix("--") {
        let (name, attached) = match long.split_once('=') {
            Some((name, _)) => (name, true),
            None => (long, false),
        };
        if name == "help" || name == "version" {
            return Some(false);
        }
        command
            .get_arguments()
            .find(|a| a.get_long() == Some(name))
            .map(|a| takes_separate_value(a, attached))
    } else {
        let mut chars = flag[1..].chars();
        let short = chars.next()?;
        if short == 'h' || short == 'V' {
            return Some(false);
        }
        let attached = !chars.as_str().is_empty();
        command
            .get_arguments()
            .find(|a| a.get_short() == Some(short))
            .map(|a| takes_separate_value(a, attached))
    }
}

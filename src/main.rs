mod dashboard;

use cordex::{
    ALL_JOURNALS, CsvSource, Dataset, DatasetService, Filter, JournalChoice, Options, Panels, explore, journal_options,
};
use std::ffi::OsString;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_DATA: &str = "data/metadata.csv";
const DATA_ENV: &str = "CORDEX_DATA";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };
    debug!("Using data file: {}", config.data.display());

    let service = DatasetService::new(CsvSource::new(&config.data));
    let dataset = match service.dataset() {
        Ok(dataset) => dataset,
        Err(err) => {
            eprintln!("error: failed to load dataset: {err}");
            std::process::exit(1);
        }
    };

    if config.list_journals {
        for journal in journal_options(&dataset) {
            println!("{journal}");
        }
        return;
    }

    let filter = match build_filter(config.from, config.to, &config.journal, &dataset) {
        Ok(filter) => filter,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let options = Options {
        panels: config.panels,
        top_journals: config.top,
        title_words: config.words,
        ..Options::default()
    };
    let view = explore(&dataset, &filter, &options);

    if config.json {
        match serde_json::to_string_pretty(&view) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: failed to encode dashboard: {err}");
                std::process::exit(1);
            }
        }
        return;
    }

    let header = dashboard::Header { source: config.data.display().to_string(), filter: &filter };
    dashboard::print_dashboard(&header, &view, service.metrics(), config.color);
}

struct CliConfig {
    data: PathBuf,
    from: Option<i32>,
    to: Option<i32>,
    journal: String,
    panels: Panels,
    top: usize,
    words: usize,
    list_journals: bool,
    json: bool,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut data: Option<PathBuf> = None;
    let mut from = None;
    let mut to = None;
    let mut journal = ALL_JOURNALS.to_string();
    let mut panels = Panels::default();
    let mut top = 10;
    let mut words = 40;
    let mut list_journals = false;
    let mut json = false;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg.clone(), None),
        };

        match flag.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("cordex {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--json" => json = true,
            "--list-journals" => list_journals = true,
            "-d" | "--data" => {
                let value = value_for(&flag, inline, &mut args)?;
                set_data(&mut data, PathBuf::from(value))?;
            }
            "--from" => from = Some(parse_number(&flag, &value_for(&flag, inline, &mut args)?)?),
            "--to" => to = Some(parse_number(&flag, &value_for(&flag, inline, &mut args)?)?),
            "-j" | "--journal" => journal = value_for(&flag, inline, &mut args)?,
            "--top" => top = parse_number(&flag, &value_for(&flag, inline, &mut args)?)?,
            "--words" => words = parse_number(&flag, &value_for(&flag, inline, &mut args)?)?,
            "--panels" => panels = parse_panels(&value_for(&flag, inline, &mut args)?)?,
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => set_data(&mut data, PathBuf::from(arg))?,
        }
    }

    let data = resolve_data_path(data, std::env::var_os(DATA_ENV));

    Ok(CliConfig { data, from, to, journal, panels, top, words, list_journals, json, color })
}

/// Command-line path first, then a non-empty `CORDEX_DATA`, then the default.
fn resolve_data_path(cli: Option<PathBuf>, env: Option<OsString>) -> PathBuf {
    cli.or_else(|| env.filter(|v| !v.is_empty()).map(PathBuf::from)).unwrap_or_else(|| PathBuf::from(DEFAULT_DATA))
}

fn value_for(flag: &str, inline: Option<String>, args: &mut impl Iterator<Item = String>) -> Result<String, String> {
    match inline {
        Some(value) => Ok(value),
        None => args.next().ok_or_else(|| format!("error: {flag} expects a value")),
    }
}

fn set_data(slot: &mut Option<PathBuf>, path: PathBuf) -> Result<(), String> {
    if slot.is_some() {
        return Err("error: data path provided multiple times".to_string());
    }
    *slot = Some(path);
    Ok(())
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T, String> {
    value.trim().parse().map_err(|_| format!("error: invalid {flag} '{value}' (expected a number)"))
}

fn parse_panels(value: &str) -> Result<Panels, String> {
    value.split(',').filter(|name| !name.trim().is_empty()).try_fold(Panels::empty(), |acc, name| {
        Panels::from_cli_name(name).map(|panel| acc | panel).ok_or_else(|| {
            format!(
                "error: unknown panel '{}' (expected years, journals, words, abstracts, sample, all)",
                name.trim()
            )
        })
    })
}

/// Turn the requested range and journal into a [`Filter`].
///
/// Missing bounds default to the dataset's observed span, widened so a single
/// given bound never conflicts with the default for the other one. Only two
/// explicit bounds in the wrong order are an error; a range outside the data
/// is logged and simply matches nothing.
fn build_filter(from: Option<i32>, to: Option<i32>, journal: &str, dataset: &Dataset) -> Result<Filter, String> {
    let everything = Filter::everything(dataset);
    let (default_lo, default_hi) = (*everything.years.start(), *everything.years.end());

    let (lo, hi) = match (from, to) {
        (Some(lo), Some(hi)) if lo > hi => return Err(format!("error: --from {lo} is after --to {hi}")),
        (Some(lo), Some(hi)) => (lo, hi),
        (Some(lo), None) => (lo, default_hi.max(lo)),
        (None, Some(hi)) => (default_lo.min(hi), hi),
        (None, None) => (default_lo, default_hi),
    };

    if let Some((min, max)) = dataset.year_bounds() {
        if hi < min || lo > max {
            warn!("Year range {}..={} lies outside the dataset span {}..={}", lo, hi, min, max);
        }
    }

    let journal = JournalChoice::from_selector(journal);
    if let JournalChoice::Only(name) = &journal {
        if !dataset.journals().contains(&name.as_str()) {
            return Err(format!("error: unknown journal '{name}' (see --list-journals)"));
        }
    }

    Ok(Filter::new(lo..=hi, journal))
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "cordex {version}

Explore research-paper metadata (CORD-19 style) from the terminal.

Usage:
  cordex [OPTIONS] [DATA_PATH]

Options:
  -d, --data <path>          CSV file with title, abstract, publish_time,
                             journal and authors columns.
                             Default: ${data_env} or {default_data}
  --from <year>              First year of the range. Default: dataset minimum.
  --to <year>                Last year of the range. Default: dataset maximum.
  -j, --journal <name>       \"{all}\" or an exact journal name. Default: {all}
  --panels <list>            Comma-separated panels to show: years, journals,
                             words, abstracts, sample, all. Default: all
  --top <n>                  Journals in the top-journals chart. Default: 10
  --words <n>                Words in the title word list. Default: 40
  --list-journals            Print the journal choices and exit.
  --json                     Print the dashboard as JSON instead of text.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  RUST_LOG                   Log filter (e.g. debug). Default: warn
  {data_env}                Data file when none is given on the command line.

Exit codes:
  0  Success.
  1  Dataset could not be loaded.
  2  Invalid arguments.
",
        version = env!("CARGO_PKG_VERSION"),
        data_env = DATA_ENV,
        default_data = DEFAULT_DATA,
        all = ALL_JOURNALS,
    )
}

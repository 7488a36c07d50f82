//! almanac - calendar arithmetic and directory listings from the command line.
//!
//! Usage:
//!   almanac scan [PATH]                       List a directory
//!   almanac date start --unit month           Start of the current month
//!   almanac count FROM TO --unit day          Whole days between two instants
//!   almanac change --set day=1 --set hour=9   Edit components of an instant
//!   almanac components                        Break an instant into components
//!   almanac format --pattern y-MM-dd          Render an instant in a preset format
//!   almanac build BLUEPRINT.json              Write a file tree from a blueprint
//!   almanac --help                            Show help

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result};
use itertools::Itertools;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use almanac_calendar::{Calendar, CalendarUnit, DateFormat, FixedOffset, Instant, Weekday};
use almanac_core::ScanOptions;
use almanac_ops::Blueprint;
use almanac_scan::DirectoryScanner;

#[derive(Parser)]
#[command(
    name = "almanac",
    version,
    about = "Calendar arithmetic and directory listings",
    long_about = "almanac answers calendar questions (where does this week start, how many \
                  months lie between two dates) and lists directory trees.\n\n\
                  Set RUST_LOG=debug for diagnostic output on stderr."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the entries of a directory
    Scan {
        /// Directory to list
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Descend into subdirectories
        #[arg(short, long)]
        deep: bool,

        /// Include dot-prefixed entries
        #[arg(short = 'a', long)]
        hidden: bool,

        /// Descend into packages (only with --deep)
        #[arg(short, long)]
        packages: bool,

        /// Print absolute paths on deep scans
        #[arg(long)]
        absolute: bool,

        /// Follow symbolic links
        #[arg(short = 'L', long)]
        follow_symlinks: bool,

        /// Directory name pattern treated as a package (repeatable)
        #[arg(long = "package", value_name = "PATTERN")]
        package_patterns: Vec<String>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Period boundaries and neighbours of an instant
    Date {
        /// What to compute
        action: DateAction,

        /// Calendar unit
        #[arg(short, long)]
        unit: CalendarUnit,

        /// Instant in RFC 3339 (defaults to now)
        #[arg(long)]
        at: Option<Instant>,

        #[command(flatten)]
        calendar: CalendarArgs,
    },

    /// Count units between two instants
    Count {
        /// Start instant in RFC 3339
        from: Instant,

        /// End instant in RFC 3339
        to: Instant,

        /// Calendar unit
        #[arg(short, long)]
        unit: CalendarUnit,

        /// Print the fractional count
        #[arg(long)]
        precise: bool,

        #[command(flatten)]
        calendar: CalendarArgs,
    },

    /// Edit components of an instant
    Change {
        /// Instant in RFC 3339 (defaults to now)
        #[arg(long)]
        at: Option<Instant>,

        /// Component edit as unit=value (repeatable)
        #[arg(long = "set", value_name = "UNIT=VALUE", value_parser = parse_edit, required = true)]
        edits: Vec<(CalendarUnit, i32)>,

        #[command(flatten)]
        calendar: CalendarArgs,
    },

    /// Print every component of an instant as JSON
    Components {
        /// Instant in RFC 3339 (defaults to now)
        #[arg(long)]
        at: Option<Instant>,

        #[command(flatten)]
        calendar: CalendarArgs,
    },

    /// Render an instant in a preset format
    Format {
        /// Instant in RFC 3339 (defaults to now)
        #[arg(long)]
        at: Option<Instant>,

        /// Preset such as "y-MM-dd", "dd MMM y" or "HH:mm"
        #[arg(short, long, default_value = "y-MM-dd")]
        pattern: DateFormat,

        #[command(flatten)]
        calendar: CalendarArgs,
    },

    /// Write a file tree described by a JSON blueprint
    Build {
        /// Blueprint file
        blueprint: PathBuf,

        /// Directory to write into
        #[arg(short, long, default_value = ".")]
        into: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DateAction {
    Start,
    End,
    Next,
    Previous,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum Preset {
    /// Weeks start Monday, week 1 has at least 4 days
    #[default]
    Iso,
    /// Weeks start Sunday, week 1 contains January 1
    Gregorian,
}

/// Flags shared by every calendar command.
#[derive(Debug, Args)]
struct CalendarArgs {
    /// Week numbering preset
    #[arg(long, default_value = "iso")]
    calendar: Preset,

    /// Fixed UTC offset such as +05:30 or Z
    #[arg(long, value_parser = parse_offset)]
    utc_offset: Option<FixedOffset>,

    /// First day of the week (overrides the preset)
    #[arg(long)]
    week_start: Option<Weekday>,

    /// Minimum days in the first week of a year, 1 to 7 (overrides the preset)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=7))]
    min_days: Option<u8>,
}

impl CalendarArgs {
    fn build(&self) -> Calendar {
        let mut calendar = match self.calendar {
            Preset::Iso => Calendar::iso(),
            Preset::Gregorian => Calendar::gregorian(),
        };
        if let Some(offset) = self.utc_offset {
            calendar = calendar.with_utc_offset(offset);
        }
        if let Some(weekday) = self.week_start {
            calendar = calendar.with_first_weekday(weekday);
        }
        if let Some(days) = self.min_days {
            calendar = calendar.with_minimum_days_in_first_week(days);
        }
        calendar
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Scan {
            path,
            deep,
            hidden,
            packages,
            absolute,
            follow_symlinks,
            package_patterns,
            format,
        } => {
            let mut builder = ScanOptions::builder();
            builder
                .deep(deep)
                .include_hidden(hidden)
                .include_package_contents(packages)
                .relative_paths(deep && !absolute)
                .follow_symlinks(follow_symlinks);
            if !package_patterns.is_empty() {
                builder.package_patterns(package_patterns);
            }
            let options = builder.build().context("Invalid scan options")?;
            run_scan(&path, &options, format)?;
        }
        Command::Date {
            action,
            unit,
            at,
            calendar,
        } => {
            let calendar = calendar.build();
            let instant = at.unwrap_or_else(Instant::now);
            let result = match action {
                DateAction::Start => calendar.start_of(instant, unit),
                DateAction::End => calendar.end_of(instant, unit),
                DateAction::Next => calendar.next(instant, unit),
                DateAction::Previous => calendar.previous(instant, unit),
            };
            println!("{}", display_local(&calendar, result));
        }
        Command::Count {
            from,
            to,
            unit,
            precise,
            calendar,
        } => {
            let calendar = calendar.build();
            if precise {
                println!("{}", calendar.precise_count(from, to, unit));
            } else {
                println!("{}", calendar.count(from, to, unit));
            }
        }
        Command::Change {
            at,
            edits,
            calendar,
        } => {
            let calendar = calendar.build();
            let instant = at.unwrap_or_else(Instant::now);
            let result = calendar.changing(instant, edits);
            println!("{}", display_local(&calendar, result));
        }
        Command::Components { at, calendar } => {
            let calendar = calendar.build();
            let instant = at.unwrap_or_else(Instant::now);
            let components = calendar.components(instant);
            println!("{}", serde_json::to_string_pretty(&components)?);
        }
        Command::Format {
            at,
            pattern,
            calendar,
        } => {
            let calendar = calendar.build();
            let instant = at.unwrap_or_else(Instant::now);
            println!("{}", calendar.format(instant, pattern));
        }
        Command::Build { blueprint, into } => {
            run_build(&blueprint, &into)?;
        }
    }

    Ok(())
}

/// List a directory, sorted by path.
fn run_scan(path: &Path, options: &ScanOptions, format: OutputFormat) -> Result<()> {
    let scanner = DirectoryScanner::new();
    let entries = scanner
        .scan(path, options)
        .with_context(|| format!("Scan of {} failed", path.display()))?
        .into_iter()
        .sorted_by(|a, b| a.path.cmp(&b.path))
        .collect_vec();
    debug!(path = %path.display(), entries = entries.len(), ?format, "listing scan results");

    match format {
        OutputFormat::Text => {
            for entry in &entries {
                if entry.is_dir() {
                    println!("{}/", entry.path.display());
                } else {
                    println!("{}", entry.path.display());
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }

    Ok(())
}

/// Materialize a blueprint file.
fn run_build(blueprint: &Path, into: &Path) -> Result<()> {
    let text = std::fs::read_to_string(blueprint)
        .with_context(|| format!("Failed to read {}", blueprint.display()))?;
    let tree: Blueprint = serde_json::from_str(&text).context("Invalid blueprint")?;
    debug!(blueprint = %blueprint.display(), items = tree.item_count(), "parsed blueprint");

    let dir = almanac_ops::create_directory(into).context("Failed to prepare target")?;
    let root = tree.write_to(&dir).context("Failed to write blueprint")?;
    debug!(root = %root.display(), "blueprint written");
    eprintln!("Wrote {} item(s)", tree.item_count());
    println!("{}", root.display());

    Ok(())
}

/// RFC 3339 rendering in the calendar's own offset.
fn display_local(calendar: &Calendar, instant: Instant) -> String {
    instant
        .as_datetime()
        .with_timezone(&calendar.utc_offset())
        .to_rfc3339()
}

/// Parse a fixed offset like `+05:30`, `-0800`, `+02` or `Z`.
fn parse_offset(s: &str) -> Result<FixedOffset, String> {
    if s.eq_ignore_ascii_case("z") || s.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).ok_or_else(|| "invalid offset".to_string());
    }

    let (sign, rest) = match s.split_at_checked(1) {
        Some(("+", rest)) => (1, rest),
        Some(("-", rest)) => (-1, rest),
        _ => return Err(format!("offset '{s}' must start with + or -")),
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("offset '{s}' must look like +HH:MM"));
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits.as_str(), "0"),
        4 => digits.split_at(2),
        _ => return Err(format!("offset '{s}' must look like +HH:MM")),
    };
    let hours: i32 = hours.parse().map_err(|_| format!("bad hours in '{s}'"))?;
    let minutes: i32 = minutes.parse().map_err(|_| format!("bad minutes in '{s}'"))?;
    if minutes >= 60 {
        return Err(format!("bad minutes in '{s}'"));
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .ok_or_else(|| format!("offset '{s}' is out of range"))
}

/// Parse a component edit like `day=1` or `week_of_year=10`.
fn parse_edit(s: &str) -> Result<(CalendarUnit, i32), String> {
    let (unit, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected UNIT=VALUE, got '{s}'"))?;
    let unit = unit
        .trim()
        .parse::<CalendarUnit>()
        .map_err(|_| format!("unknown unit '{unit}'"))?;
    let value = value
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("bad value in '{s}': {e}"))?;
    Ok((unit, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_offset() {
        assert_eq!(parse_offset("+05:30").unwrap().local_minus_utc(), 5 * 3600 + 1800);
        assert_eq!(parse_offset("-0800").unwrap().local_minus_utc(), -8 * 3600);
        assert_eq!(parse_offset("+02").unwrap().local_minus_utc(), 2 * 3600);
        assert_eq!(parse_offset("Z").unwrap().local_minus_utc(), 0);
        assert!(parse_offset("05:30").is_err());
        assert!(parse_offset("+5:3").is_err());
        assert!(parse_offset("+05:75").is_err());
        // Multi-byte input must not split inside a character.
        assert!(parse_offset("+€1").is_err());
        assert!(parse_offset("+0€").is_err());
        assert!(parse_offset("+١٢").is_err());
    }

    #[test]
    fn test_run_build_and_scan() {
        let temp = tempfile::TempDir::new().unwrap();
        let blueprint = temp.path().join("tree.json");
        std::fs::write(
            &blueprint,
            r#"{"type":"folder","name":"site","children":[{"type":"file","name":"a.txt"}]}"#,
        )
        .unwrap();
        let out = temp.path().join("out");

        run_build(&blueprint, &out).unwrap();
        assert!(out.join("site/a.txt").is_file());
        run_scan(&out, &ScanOptions::deep(), OutputFormat::Json).unwrap();
        assert!(run_build(&temp.path().join("missing.json"), &out).is_err());
    }

    #[test]
    fn test_parse_edit() {
        assert_eq!(parse_edit("day=1").unwrap(), (CalendarUnit::Day, 1));
        assert_eq!(
            parse_edit("week_of_year = 10").unwrap(),
            (CalendarUnit::WeekOfYear, 10)
        );
        assert!(parse_edit("day").is_err());
        assert!(parse_edit("fortnight=2").is_err());
        assert!(parse_edit("day=x").is_err());
    }

    #[test]
    fn test_calendar_args() {
        let args = CalendarArgs {
            calendar: Preset::Gregorian,
            utc_offset: parse_offset("+01:00").ok(),
            week_start: Some(Weekday::Mon),
            min_days: None,
        };
        let calendar = args.build();
        assert_eq!(calendar.first_weekday(), Weekday::Mon);
        assert_eq!(calendar.minimum_days_in_first_week(), 1);
        assert_eq!(calendar.utc_offset().local_minus_utc(), 3600);
    }

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();

        let cli = Cli::try_parse_from([
            "almanac",
            "change",
            "--at",
            "2024-05-17T10:00:00Z",
            "--set",
            "day=1",
            "--set",
            "hour=0",
        ])
        .unwrap();
        match cli.command {
            Command::Change { edits, .. } => {
                assert_eq!(edits, vec![(CalendarUnit::Day, 1), (CalendarUnit::Hour, 0)]);
            }
            _ => panic!("expected change"),
        }
    }
}

//! nicprobe-ethtool: query network device capabilities.
//!
//! A read-only subset of `ethtool` built on the nicprobe ioctl queries.

use std::io::{self, Write};

use clap::{Parser, Subcommand, ValueEnum};
use nicprobe::ethtool::{StringSet, StringSetId};
use nicprobe::output::{OutputFormat, OutputOptions, Printable};
use nicprobe::{CapabilityReport, Ethtool, Query, QuerySet};

#[derive(Parser)]
#[command(name = "nicprobe-ethtool", version)]
#[command(about = "Query network device settings")]
struct Cli {
    /// Output JSON.
    #[arg(short = 'j', long, global = true)]
    json: bool,

    /// Pretty print JSON.
    #[arg(short = 'p', long, global = true)]
    pretty: bool,

    /// Show details.
    #[arg(short = 'd', long, global = true)]
    details: bool,

    #[command(subcommand)]
    command: Option<Commands>,

    /// Device name (when no subcommand is given)
    device: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show link settings, Wake-on-LAN and link state (default action)
    Show {
        /// Device name
        device: String,
    },
    /// Show link speed, duplex and link modes
    Link {
        /// Device name
        device: String,
    },
    /// Show device features (offloads)
    #[command(short_flag = 'k')]
    Features {
        /// Device name
        device: String,
    },
    /// Show coalesce parameters
    #[command(short_flag = 'c')]
    Coalesce {
        /// Device name
        device: String,
    },
    /// Show Wake-on-LAN settings
    Wol {
        /// Device name
        device: String,
    },
    /// Show the names in a string set
    Strings {
        /// Device name
        device: String,
        /// String set
        #[arg(value_enum)]
        set: SetArg,
    },
    /// Run every query and report each outcome
    Report {
        /// Device name
        device: String,
        /// Run only these queries
        #[arg(long, value_enum, conflicts_with = "skip")]
        only: Vec<QueryArg>,
        /// Skip these queries
        #[arg(long, value_enum)]
        skip: Vec<QueryArg>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum QueryArg {
    LinkUp,
    Coalesce,
    Features,
    LinkSettings,
    Wol,
}

impl From<QueryArg> for Query {
    fn from(arg: QueryArg) -> Self {
        match arg {
            QueryArg::LinkUp => Query::LinkUp,
            QueryArg::Coalesce => Query::Coalesce,
            QueryArg::Features => Query::Features,
            QueryArg::LinkSettings => Query::LinkSettings,
            QueryArg::Wol => Query::Wol,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SetArg {
    Test,
    Stats,
    PrivFlags,
    Features,
    Tunables,
    PhyStats,
}

impl From<SetArg> for StringSetId {
    fn from(arg: SetArg) -> Self {
        match arg {
            SetArg::Test => StringSetId::Test,
            SetArg::Stats => StringSetId::Stats,
            SetArg::PrivFlags => StringSetId::PrivFlags,
            SetArg::Features => StringSetId::Features,
            SetArg::Tunables => StringSetId::Tunables,
            SetArg::PhyStats => StringSetId::PhyStats,
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let opts = OutputOptions {
        details: cli.details,
        pretty: cli.pretty,
    };

    let command = match cli.command {
        Some(cmd) => cmd,
        None => match cli.device {
            Some(device) => Commands::Show { device },
            None => {
                eprintln!("Usage: nicprobe-ethtool <device> or nicprobe-ethtool <subcommand>");
                std::process::exit(1);
            }
        },
    };

    if let Err(e) = run(command, format, &opts) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn run(command: Commands, format: OutputFormat, opts: &OutputOptions) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Commands::Show { device } => {
            let queries = QuerySet::new()
                .with(Query::LinkSettings)
                .with(Query::Wol)
                .with(Query::LinkUp);
            show_report(&device, &queries, format, opts, &mut out)?;
        }
        Commands::Report { device, only, skip } => {
            let queries = if only.is_empty() {
                skip.into_iter()
                    .fold(QuerySet::all(), |set, q| set.without(q.into()))
            } else {
                only.into_iter().map(Query::from).collect()
            };
            show_report(&device, &queries, format, opts, &mut out)?;
        }
        Commands::Link { device } => {
            let settings = Ethtool::open(&device)?.link_settings()?;
            if format == OutputFormat::Text {
                writeln!(out, "Settings for {}:", device)?;
            }
            settings.print(&mut out, format, opts)?;
        }
        Commands::Features { device } => {
            let features = Ethtool::open(&device)?.features()?;
            if format == OutputFormat::Text {
                writeln!(out, "Features for {}:", device)?;
            }
            features.print(&mut out, format, opts)?;
        }
        Commands::Coalesce { device } => {
            let coalesce = Ethtool::open(&device)?.coalesce()?;
            if format == OutputFormat::Text {
                writeln!(out, "Coalesce parameters for {}:", device)?;
            }
            coalesce.print(&mut out, format, opts)?;
        }
        Commands::Wol { device } => {
            let wol = Ethtool::open(&device)?.wol()?;
            if format == OutputFormat::Text {
                writeln!(out, "Settings for {}:", device)?;
            }
            wol.print(&mut out, format, opts)?;
        }
        Commands::Strings { device, set } => {
            let set = Ethtool::open(&device)?.string_set(set.into())?;
            print_strings(&set, format, opts, &mut out)?;
        }
    }

    Ok(())
}

fn show_report<W: Write>(
    device: &str,
    queries: &QuerySet,
    format: OutputFormat,
    opts: &OutputOptions,
    out: &mut W,
) -> anyhow::Result<()> {
    let report = Ethtool::open(device)?.report(queries);
    if nothing_answered(&report) {
        report.into_result()?;
        return Ok(());
    }
    report.print(out, format, opts)?;
    Ok(())
}

/// A report in which every query failed is treated as a failure of the run.
fn nothing_answered(report: &CapabilityReport) -> bool {
    !report.is_empty() && report.successes().next().is_none()
}

fn print_strings<W: Write>(
    set: &StringSet,
    format: OutputFormat,
    opts: &OutputOptions,
    out: &mut W,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::json!(set.strings);
            if opts.pretty {
                serde_json::to_writer_pretty(&mut *out, &json)?;
            } else {
                serde_json::to_writer(&mut *out, &json)?;
            }
            writeln!(out)?;
        }
        OutputFormat::Text => {
            writeln!(out, "Strings in set {:?} ({}):", set.id, set.len())?;
            for (i, name) in set.strings.iter().enumerate() {
                writeln!(out, "\t{}: {}", i, name)?;
            }
        }
    }
    Ok(())
}

//! Convite CLI
//!
//! Command-line interface for the invite directory:
//! - Register attendees
//! - List and search participants
//! - Show turnout statistics
//! - Export the participant list and charts

use anyhow::{bail, Context};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use convite::chart::{self, GlyphEstimate, Surface};
use convite::config::{generate_default_config, Config, LoggingConfig};
use convite::directory::{load_store, register, HttpDirectory, RegisterError};
use convite::export::{self, ExportFormat, COLUMNS};
use convite::registration::{FormAction, FormField, RegistrationForm, SUBMIT_FAILED_MESSAGE};
use convite::stats::{summarize, top_locations, Summary, TOP_LOCATIONS};
use convite::view::{SortDirection, SortKey, ViewState};
use convite::{AttendeeRecord, EVENT};

#[derive(Parser)]
#[command(name = "convite")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Registration and participant dashboard for the Mega Evento MCB")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Invite directory URL (overrides the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: ~/.config/convite/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ChartKind {
    /// Target vs. actual registrations
    Comparison,
    /// Most common locations
    Ranking,
}

/// Search and ordering shared by `list` and `export`
#[derive(clap::Args)]
pub struct ViewArgs {
    /// Case-insensitive search on the name
    #[arg(short, long, default_value = "")]
    pub search: String,
    /// Sort key (name, date)
    #[arg(long, default_value = "date")]
    pub sort: SortKey,
    /// Sort descending
    #[arg(long)]
    pub desc: bool,
}

impl ViewArgs {
    fn state(&self) -> ViewState {
        ViewState {
            query: self.search.clone(),
            sort_key: self.sort,
            direction: if self.desc {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            },
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register an attendee
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        location: String,
        /// Phone number, digits only (max 9)
        #[arg(long)]
        contact: String,
        #[arg(long, default_value = "")]
        business: String,
    },

    /// List participants
    List {
        #[command(flatten)]
        view: ViewArgs,
    },

    /// Show turnout statistics
    Stats,

    /// Export the participant list
    Export {
        /// File type
        #[arg(long = "to", default_value = "xlsx")]
        to: ExportFormat,
        #[command(flatten)]
        view: ViewArgs,
        /// Output file (default from config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render a chart as SVG
    Chart {
        #[arg(value_enum)]
        kind: ChartKind,
        #[arg(long, default_value = "600")]
        width: f64,
        #[arg(long, default_value = "300")]
        height: f64,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (mut config, source) = match &cli.config {
        Some(path) => (Config::load_with_env(path)?, None),
        None => {
            let (config, source) = Config::discover();
            (config, Some(source))
        }
    };
    if let Some(url) = &cli.api_url {
        config.directory.api_base = url.clone();
    }
    config.validate()?;

    init_logging(&config.logging);
    if let Some(source) = source {
        source.log();
    }

    match cli.command {
        Commands::Register {
            name,
            location,
            contact,
            business,
        } => {
            let directory = HttpDirectory::from_config(&config.directory)?;
            let mut form = RegistrationForm::new()
                .apply(FormAction::Edit(FormField::Name, name))
                .apply(FormAction::Edit(FormField::Location, location))
                .apply(FormAction::Edit(FormField::Contact, contact))
                .apply(FormAction::Edit(FormField::Business, business));

            match register(&directory, &mut form).await {
                Ok(()) => {
                    println!("Participação Confirmada!");
                    println!("{} ({})", form.name, form.location);
                    println!("{}", EVENT.farewell());
                }
                Err(RegisterError::Invalid(e)) => bail!(e),
                Err(RegisterError::Directory(e)) => {
                    eprintln!("{}", SUBMIT_FAILED_MESSAGE);
                    return Err(e).context("registration was not saved");
                }
            }
        }

        Commands::List { view } => {
            let directory = HttpDirectory::from_config(&config.directory)?;
            let store = load_store(&directory).await;
            let state = view.state();
            let records = state.project(store.records());

            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
                OutputFormat::Csv => print_csv(&records)?,
                OutputFormat::Table => {
                    println!("{}", state.caption(records.len(), store.len()));
                    println!();
                    print_table(&records);
                }
            }
        }

        Commands::Stats => {
            let directory = HttpDirectory::from_config(&config.directory)?;
            let store = load_store(&directory).await;
            let summary = summarize(store.records(), config.event.target, Utc::now());
            let top = top_locations(store.records(), TOP_LOCATIONS);

            match cli.format {
                OutputFormat::Json => {
                    let body = serde_json::json!({
                        "event": config.event.name,
                        "summary": summary,
                        "top_locations": top,
                    });
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
                OutputFormat::Csv => {
                    let mut writer = csv::Writer::from_writer(std::io::stdout());
                    writer.write_record(["location", "count"])?;
                    for location in &top {
                        let count = location.count.to_string();
                        writer.write_record([location.location.as_str(), count.as_str()])?;
                    }
                    writer.flush()?;
                }
                OutputFormat::Table => {
                    println!("{}", config.event.name);
                    println!();
                    for line in summary_lines(&summary) {
                        println!("  {}", line);
                    }

                    if !top.is_empty() {
                        println!();
                        println!("{:<24} {}", "Localização", "Participantes");
                        println!("{}", "-".repeat(40));
                        for location in &top {
                            println!("{:<24} {}", location.location, location.count);
                        }
                    }
                }
            }
        }

        Commands::Export { to, view, output } => {
            let directory = HttpDirectory::from_config(&config.directory)?;
            let store = load_store(&directory).await;
            let records = view.state().project(store.records());

            let path = output.unwrap_or_else(|| PathBuf::from(config.export.file_name(to)));
            let written = export::write_file(
                to,
                &records,
                &config.export.options(),
                Utc::now().date_naive(),
                &path,
            )
            .with_context(|| format!("failed to export to {:?}", path))?;

            println!("Exported {} participants to {:?} ({} bytes)", records.len(), path, written);
        }

        Commands::Chart {
            kind,
            width,
            height,
            output,
        } => {
            if width <= 0.0 || height <= 0.0 {
                bail!("chart size must be positive");
            }

            let directory = HttpDirectory::from_config(&config.directory)?;
            let store = load_store(&directory).await;
            let surface = Surface::new(width, height);

            let commands = match kind {
                ChartKind::Comparison => chart::comparison_chart(
                    store.len() as u64,
                    config.event.target as u64,
                    surface,
                ),
                ChartKind::Ranking => chart::ranking_chart(
                    &top_locations(store.records(), TOP_LOCATIONS),
                    surface,
                    &GlyphEstimate::default(),
                ),
            };
            let svg = chart::render_svg(&commands, surface)?;

            match output {
                Some(path) => {
                    std::fs::write(&path, &svg)?;
                    println!("Chart written to {:?}", path);
                }
                None => print!("{}", svg),
            }
        }

        Commands::Config { output } => {
            let config = generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// Install the tracing subscriber; logs go to stderr so stdout stays parseable
fn init_logging(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("convite={}", logging.level)));

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn summary_lines(summary: &Summary) -> Vec<String> {
    vec![
        format!("Total de Participantes: {}", summary.count),
        format!(
            "Meta de Participantes:  {:.1}% de {}",
            summary.percentage_reached, summary.target
        ),
        format!(
            "Faltam:                 {} {}",
            summary.remaining,
            summary.remaining_label()
        ),
        format!("Taxa de Crescimento:    {} por dia", summary.growth_rate),
    ]
}

fn print_table(records: &[AttendeeRecord]) {
    if records.is_empty() {
        println!("Nenhum participante encontrado");
        return;
    }

    println!(
        "{:<28} {:<16} {:<11} {:<20} {}",
        COLUMNS[0], COLUMNS[1], COLUMNS[2], COLUMNS[3], COLUMNS[4]
    );
    println!("{}", "-".repeat(90));

    for cells in export::rows(records) {
        println!(
            "{:<28} {:<16} {:<11} {:<20} {}",
            truncate(&cells[0], 28),
            truncate(&cells[1], 16),
            cells[2],
            truncate(&cells[3], 20),
            cells[4]
        );
    }
}

fn print_csv(records: &[AttendeeRecord]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(std::io::stdout());
    writer.write_record(COLUMNS)?;
    for cells in export::rows(records) {
        writer.write_record(&cells)?;
    }
    writer.flush()?;
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let kept: String = s.chars().take(max - 3).collect();
        format!("{}...", kept)
    } else {
        s.to_string()
    }
}

//! Attendance CLI
//!
//! Command-line interface to the attendance backend:
//! - Show the attendance summary
//! - Upload a timetable
//! - Parse a timetable image locally
//! - Generate a default config file

use anyhow::Context;
use attendance::backend::BackendClient;
use attendance::config::Config;
use attendance::dashboard::{DashboardPage, DashboardView, PageRender};
use attendance::logging;
use attendance::ocr::{LineTimetableParser, TesseractExtractor, TextExtractor, TimetableParser};
use attendance::session::{Navigator, SessionProvider};
use attendance::upload::{DateField, SelectedFile, UploadForm, UploadServices};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "attendance-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Student attendance from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Attendance backend URL (overrides config)
    #[arg(long, global = true)]
    pub backend_url: Option<String>,

    /// Session cookie sent to the backend, e.g. "next-auth.session-token=..."
    #[arg(long, global = true)]
    pub cookie: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the attendance summary
    Summary {
        /// Print the raw summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Upload a timetable file
    Upload {
        /// Semester start date (YYYY-MM-DD)
        #[arg(long)]
        start_date: String,
        /// Semester end date (YYYY-MM-DD)
        #[arg(long)]
        end_date: String,
        /// Timetable image, PDF or spreadsheet
        file: PathBuf,
    },

    /// Extract and parse a timetable image without uploading it
    Parse {
        /// Timetable image
        file: PathBuf,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Navigator for the terminal: a redirect means the user has to sign in
struct LoginHint;

impl Navigator for LoginHint {
    fn push(&self, route: &str) {
        eprintln!("Not signed in. Sign in at {} and pass the session with --cookie.", route);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::resolve(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(url) = cli.backend_url {
        config.backend.url = url;
    }
    if cli.cookie.is_some() {
        config.backend.session_cookie = cli.cookie;
    }
    logging::init_tracing(&config.logging);

    match cli.command {
        Commands::Summary { json } => {
            let client = BackendClient::new(&config.backend)?;
            let session = client.session().await;

            let mut page = DashboardPage::new(client, LoginHint, config.server.login_route.clone());
            page.on_session_status(session.status).await;

            match page.render() {
                PageRender::Loading => {
                    eprintln!("Cannot reach the attendance backend at {}", config.backend.url);
                    std::process::exit(1);
                }
                PageRender::Redirecting => std::process::exit(1),
                PageRender::Ready(view) => {
                    if json {
                        let summary = page.summary().cloned().unwrap_or_default();
                        println!("{}", serde_json::to_string_pretty(&summary)?);
                    } else {
                        print_summary(&view);
                    }
                }
            }
        }

        Commands::Upload {
            start_date,
            end_date,
            file,
        } => {
            let client = BackendClient::new(&config.backend)?;
            let extractor = TesseractExtractor::new(&config.ocr);
            let parser = LineTimetableParser::new()?;

            let selected = SelectedFile::from_path(&file)
                .with_context(|| format!("Failed to read {:?}", file))?;

            let mut form = UploadForm::new();
            form.select_file(Some(selected));
            form.set_date(DateField::Start, start_date);
            form.set_date(DateField::End, end_date);

            let services = UploadServices {
                extractor: &extractor,
                parser: &parser,
                store: &client,
            };

            if form.submit(services).await.is_ok() {
                println!("{}", form.success());
            } else {
                eprintln!("{}", form.error());
                std::process::exit(1);
            }
        }

        Commands::Parse { file } => {
            let extractor = TesseractExtractor::new(&config.ocr);
            let parser = LineTimetableParser::new()?;

            let selected = SelectedFile::from_path(&file)
                .with_context(|| format!("Failed to read {:?}", file))?;

            let text = match extractor.extract_text(&selected).await {
                Ok(text) => text,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(1);
                }
            };

            match parser.parse(&text) {
                Ok(data) => println!("{}", serde_json::to_string_pretty(&data)?),
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Config { output } => {
            let config = attendance::config::generate_default_config();

            match output {
                Some(path) => {
                    // Create parent directory if needed
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

fn print_summary(view: &DashboardView) {
    println!("Overall attendance: {}", view.overall_label());
    println!("{}", view.classes_attended_label());
    println!();

    if !view.has_subjects() {
        println!("{}", view.empty_message());
        return;
    }

    println!("{:<24} {:<20} {:>8}  {}", "Subject", "Classes", "Percent", "Status");
    println!("{}", "-".repeat(64));
    for subject in &view.subjects {
        println!(
            "{:<24} {:<20} {:>8}  {}",
            subject.name,
            subject.classes_label(),
            subject.percentage_label(),
            subject.tone.label()
        );
    }
}

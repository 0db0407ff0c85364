//! Pasusat - A terminal dashboard for the Thai livestock census
//!
//! Loads the census CSV once, then lets you flip between the overview,
//! provincial ranking, and scatter views from a sidebar menu.

use anyhow::{Context, Result};
use argh::FromArgs;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pasusat::app::App;
use pasusat::config::{Config, DEFAULT_DATA_PATH, DEFAULT_REGION_COLUMN, DEFAULT_TOP_N};
use pasusat::data::Dataset;
use pasusat::format::SourceEncoding;
use pasusat::report::Report;
use pasusat::tui::Tui;

/// Pasusat - Thai livestock census dashboard
#[derive(FromArgs)]
struct Args {
    /// path to the census CSV (default: ../datasets/1642645053.csv)
    #[argh(positional)]
    file: Option<PathBuf>,

    /// text encoding of the file: tis-620 (default) or utf-8
    #[argh(option, short = 'e', default = "String::from(\"tis-620\")")]
    encoding: String,

    /// header label of the province column
    #[argh(option, short = 'r')]
    region_column: Option<String>,

    /// number of provinces in the top provinces table
    #[argh(option, short = 'n', default = "DEFAULT_TOP_N")]
    top: usize,

    /// print a JSON report to stdout instead of starting the dashboard
    #[argh(switch)]
    report: bool,

    /// write logs to this file while the dashboard is running
    #[argh(option)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn config(&self) -> Result<Config> {
        let encoding = SourceEncoding::parse(&self.encoding)
            .with_context(|| format!("Unknown encoding: {}", self.encoding))?;

        Ok(Config {
            path: self
                .file
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH)),
            encoding,
            region_column: self
                .region_column
                .clone()
                .unwrap_or_else(|| DEFAULT_REGION_COLUMN.to_string()),
            top_n: self.top,
        })
    }
}

/// Logs go to stderr in report mode. The dashboard owns the terminal, so
/// there they go to `--log-file` or nowhere.
fn init_logging(args: &Args) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if let Some(ref path) = args.log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file: {}", path.display()))?;
        builder
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if args.report {
        builder.with_writer(std::io::stderr).init();
    } else {
        builder.with_writer(std::io::sink).init();
    }
    Ok(())
}

fn main() -> Result<()> {
    let args: Args = argh::from_env();
    init_logging(&args)?;
    let config = args.config()?;

    if !args.report {
        eprintln!("📂 Opening {}...", config.path.display());
    }
    let dataset = Dataset::open(&config)
        .with_context(|| format!("Failed to load census data: {}", config.path.display()))?;
    info!(
        "{} rows, {} unmapped catalog entries",
        dataset.row_count(),
        dataset.catalog().missing().len()
    );

    if args.report {
        let report = Report::build(&dataset, config.top_n);
        println!("{}", report.to_json()?);
        return Ok(());
    }

    let mut app = App::new(dataset, config);
    let mut tui = Tui::new()?;

    loop {
        tui.draw(&app)?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,

                    KeyCode::Char('j') | KeyCode::Down => app.next_analysis(),
                    KeyCode::Char('k') | KeyCode::Up => app.prev_analysis(),
                    KeyCode::Char(c @ '1'..='4') => {
                        app.select_analysis(c as usize - '1' as usize)
                    }

                    KeyCode::Char('l') | KeyCode::Right => app.next_species(),
                    KeyCode::Char('h') | KeyCode::Left => app.prev_species(),
                    KeyCode::Tab => app.toggle_focus(),

                    KeyCode::Char('?') => app.show_help = !app.show_help,

                    _ => {}
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    tui.restore()?;
    eprintln!("👋 Goodbye!");

    Ok(())
}

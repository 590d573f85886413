use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use parking_lot::Mutex;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use hguard_watch::ui::{self, Theme};
use hguard_watch::validate::{submit, ValidationClient, ValidationView};
use hguard_watch::{events, run_cycle, App, HttpFetcher, RefreshLoop, Settings, StatusBoard};

#[derive(Parser, Debug)]
#[command(name = "hguard-watch")]
#[command(about = "Status dashboard and account validator for an hguard backend")]
struct Args {
    /// Backend base URL (default http://127.0.0.1:8080)
    #[arg(short, long)]
    base_url: Option<String>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Refresh interval (e.g., "45s", "2m")
    #[arg(short, long)]
    refresh: Option<String>,

    /// Delay before a stuck liveness check is marked unavailable (e.g., "4s")
    #[arg(long)]
    fail_safe: Option<String>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Run one refresh cycle, print the indicators as JSON and exit
    #[arg(long, conflicts_with = "validate")]
    once: bool,

    /// Validate an account ID, print the result and exit
    #[arg(long, value_name = "ACCOUNT")]
    validate: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let interactive = !args.once && args.validate.is_none();
    init_tracing(args.log_file.as_ref(), interactive)?;

    let settings = Settings::load(args.config.as_deref())?.merge(
        args.base_url.clone(),
        args.refresh.as_deref(),
        args.fail_safe.as_deref(),
    )?;
    info!(base_url = %settings.base_url, "settings loaded");

    let rt = tokio::runtime::Runtime::new()?;

    if args.once {
        return rt.block_on(run_once(&settings));
    }

    if let Some(ref account) = args.validate {
        return rt.block_on(run_validate(&settings, account));
    }

    run_tui(&rt, settings)
}

/// Log to a file when given; otherwise to stderr, except in TUI mode where
/// stderr would corrupt the screen.
fn init_tracing(log_file: Option<&PathBuf>, interactive: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            builder.with_writer(Arc::new(file)).with_ansi(false).init();
        }
        None if interactive => {}
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

/// Run a single refresh cycle and print the board.
async fn run_once(settings: &Settings) -> Result<()> {
    let fetcher = HttpFetcher::new(&settings.base_url)?;
    let board = Mutex::new(StatusBoard::standard());

    run_cycle(&fetcher, &board, &settings.endpoints).await;

    let json = serde_json::to_string_pretty(&*board.lock())?;
    println!("{}", json);
    Ok(())
}

/// Validate one account and print the rendered report.
async fn run_validate(settings: &Settings, account: &str) -> Result<()> {
    let client = ValidationClient::new(&settings.base_url, &settings.endpoints)?;
    let view = Mutex::new(ValidationView::new());

    match submit(&client, &view, account).await {
        Ok(report) => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Err(e) => bail!("{}", e),
    }
}

/// Run the interactive TUI.
fn run_tui(rt: &tokio::runtime::Runtime, settings: Settings) -> Result<()> {
    let fetcher = Arc::new(HttpFetcher::new(&settings.base_url)?);
    let validator = Arc::new(ValidationClient::new(&settings.base_url, &settings.endpoints)?);
    let board = Arc::new(Mutex::new(StatusBoard::standard()));

    let refresh = {
        let _guard = rt.enter();
        RefreshLoop::new(fetcher, board, settings.endpoints.clone(), settings.timing).start()
    };

    // Detect before raw mode so the terminal query is not swallowed
    let theme = Theme::auto_detect();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    let mut app = App::new(&settings, refresh, validator, rt.handle().clone(), theme);

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("exiting");
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 16;

    while app.running {
        let board = app.board();
        let view = app.validation();

        terminal.draw(|frame| {
            let area = frame.area();

            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered = ratatui::layout::Rect::new(
                    0,
                    (area.height / 2).saturating_sub(2),
                    area.width,
                    5.min(area.height),
                );
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(3), // Indicators
                Constraint::Length(3), // Account input
                Constraint::Min(6),    // Results
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            ui::common::render_header(frame, app, &board, chunks[0]);
            ui::status::render(frame, app, &board, chunks[1]);
            ui::validate::render_input(frame, app, &view, chunks[2]);
            ui::validate::render_results(frame, app, &view, chunks[3]);
            ui::common::render_status_bar(frame, app, &board, chunks[4]);

            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
            if app.show_disclaimer {
                ui::validate::render_disclaimer(frame, app, area);
            }
            if let Some(message) = view.alert() {
                ui::validate::render_alert(frame, app, message, area);
            }
        })?;

        // Poll for events with a short timeout
        if let Some(Event::Key(key)) = events::poll_event(Duration::from_millis(100))? {
            events::handle_key_event(app, key);
        }
    }

    Ok(())
}

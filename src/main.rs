mod app;
mod config;
mod domain;
mod input;
mod logging;
mod screens;
mod store;
mod ticker;
mod timer;
mod ui;

use anyhow::Result;
use app::AppState;
use clap::{Parser, Subcommand};
use config::Settings;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::SystemClock;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::rc::Rc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "ticktodo")]
#[command(about = "A terminal to-do list with per-task timers", long_about = None)]
struct Cli {
    /// Start with a set of sample tasks
    #[arg(long)]
    demo: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a default config file if none exists
    Init,
    /// Print the config file location
    Path,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config { action: ConfigAction::Init }) => {
            let path = Settings::init_default()?;
            println!("Config file: {}", path.display());
            Ok(())
        }
        Some(Commands::Config { action: ConfigAction::Path }) => {
            match Settings::config_path() {
                Some(path) => println!("{}", path.display()),
                None => println!("No config directory available on this platform"),
            }
            Ok(())
        }
        None => run_tui(cli.demo),
    }
}

fn run_tui(demo: bool) -> Result<()> {
    let settings = Settings::load();

    // Logging is optional; the app runs without a log file
    let log_guard = match logging::init_logging(&settings.log_level) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: logging disabled: {}", e);
            None
        }
    };

    let poll_ms = settings.poll_interval_ms;
    let mut app = AppState::new(settings, Rc::new(SystemClock));
    if demo {
        app.seed_demo()?;
    }
    app.tick();
    info!(demo, poll_ms, "starting");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app, poll_ms);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Flush running timers on exit
    if let Err(e) = app.shutdown() {
        error!("flush on exit failed: {}", e);
        eprintln!("Error flushing timers: {}", e);
    }

    if let Err(err) = result {
        error!("{}", err);
        eprintln!("Error: {}", err);
    }

    // Flush buffered log lines
    drop(log_guard);
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState, poll_ms: u64) -> Result<()> {
    let poll_rate = ticker::poll_duration(poll_ms);

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(poll_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key)? {
                    return Ok(());
                }
            }
        }

        // Tick timers
        app.tick();
    }
}

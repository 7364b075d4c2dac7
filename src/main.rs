mod app;
mod event;
mod screen;

use std::io;
use std::path::Path;

use clap::Parser;
use color_eyre::eyre::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

use curvenav::config::{self, CliArgs};
use curvenav::CurveNavError;

use crate::app::App;
use crate::event::{Event, EventHandler};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = CliArgs::parse();

    if cli.print_default_config {
        print!("{}", config::default_config_toml());
        return Ok(());
    }

    // Initialize color-eyre with custom panic hook that restores terminal
    install_panic_hook();

    let config = config::load(&cli)?;

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = init_logging(cli.log.as_deref(), &config.general.log_level)?;

    info!(
        items = config.items.len(),
        direction = ?config.layout.direction,
        "curvenav-demo starting"
    );

    // Setup terminal
    enable_raw_mode()
        .map_err(|e| CurveNavError::Terminal(format!("Failed to enable raw mode: {}", e)))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut event_handler = EventHandler::new(config.tick_rate());
    let mut app = App::new(&config, event_handler.sender());

    // ── Main event loop ───────────────────────────────────────────────
    let mut dirty = true;
    loop {
        if dirty {
            terminal.draw(|f| screen::draw(f, &mut app))?;
        }

        let Some(event) = event_handler.next().await else {
            break;
        };
        // Idle ticks leave the screen unchanged
        dirty = !matches!(event, Event::Tick) || app.needs_redraw();
        app.handle_event(event);
        if app.should_quit {
            break;
        }
    }
    event_handler.stop();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("curvenav-demo exiting");
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        default_hook(panic_info);
    }));
    color_eyre::install().ok();
}

/// Initialize tracing to a log file through a non-blocking writer.
///
/// `RUST_LOG` wins over the configured level.
fn init_logging(log_path: Option<&Path>, level: &str) -> Result<Option<WorkerGuard>> {
    use tracing_subscriber::EnvFilter;

    let Some(path) = log_path else {
        // No logging if no log path specified (can't log to stdout in a TUI)
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("off"))
            .with_writer(io::sink)
            .init();
        return Ok(None);
    };

    let file = std::fs::File::create(path).map_err(|e| {
        CurveNavError::Config(format!("Failed to create log file {}: {e}", path.display()))
    })?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(Some(guard))
}

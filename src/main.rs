use clap::Parser;
use color_eyre::Result;
use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use std::io::stdout;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

mod app;
mod autocomplete;
mod booking;
mod config;
mod error;
mod geocoding;
mod layout;
mod notification;
mod search;
#[cfg(test)]
mod test_utils;
mod theme;
mod widgets;

use app::App;
use error::LorryError;
use geocoding::{GeocodingClient, NormalizedQuery};
use search::SearchService;

/// Book a lorry from the terminal with live location search
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Book a lorry from the terminal with live location search"
)]
struct Args {
    /// Config file to use instead of ~/.config/lorry/config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Look up a place once, print the suggestions as JSON and exit
    #[arg(long, value_name = "TEXT")]
    lookup: Option<String>,
}

fn main() -> Result<()> {
    // Writes to /tmp/lorry-debug.log at DEBUG level
    #[cfg(debug_assertions)]
    {
        use std::io::Write;

        if let Ok(log_file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/lorry-debug.log")
        {
            env_logger::Builder::new()
                .filter_level(log::LevelFilter::Debug)
                .target(env_logger::Target::Pipe(Box::new(log_file)))
                .format(|buf, record| {
                    use std::time::SystemTime;
                    let datetime: chrono::DateTime<chrono::Local> = SystemTime::now().into();
                    writeln!(
                        buf,
                        "[{}] [{}] {}",
                        datetime.format("%Y-%m-%dT%H:%M:%S%.3f"),
                        record.level(),
                        record.args()
                    )
                })
                .init();
        }

        log::debug!("=== LORRY DEBUG SESSION STARTED ===");
    }

    color_eyre::install()?;

    let args = Args::parse();

    let config_result = match &args.config {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    };

    if let Some(text) = args.lookup {
        if let Some(warning) = &config_result.warning {
            eprintln!("Warning: {}", warning);
        }
        run_lookup(&config_result.config, &text)?;
        return Ok(());
    }

    let client = GeocodingClient::from_config(&config_result.config.geocoding)
        .map_err(LorryError::from)?;
    let cache_ttl = Duration::from_secs(config_result.config.search.cache_ttl_secs);
    let search = SearchService::with_worker(Arc::new(client), cache_ttl)?;
    let app = App::new(&config_result.config, search);

    let terminal = init_terminal()?;
    let result = run(terminal, app, config_result.warning);

    restore_terminal()?;
    let app = result?;

    // Output after terminal restore to prevent corruption
    handle_output(&app)?;

    #[cfg(debug_assertions)]
    log::debug!("=== LORRY DEBUG SESSION ENDED ===");

    Ok(())
}

/// One-shot lookup without the UI
fn run_lookup(config: &config::Config, text: &str) -> Result<(), LorryError> {
    let Some(query) = NormalizedQuery::new(text) else {
        println!("[]");
        return Ok(());
    };

    let client = GeocodingClient::from_config(&config.geocoding)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let results = runtime.block_on(client.lookup(&query, &CancellationToken::new()))?;

    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}

/// Initialize terminal with raw mode, alternate screen, mouse capture and bracketed paste
fn init_terminal() -> Result<DefaultTerminal> {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = execute!(
            stdout(),
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let _ = disable_raw_mode();
        hook(info);
    }));

    enable_raw_mode()?;

    // If any subsequent operations fail, ensure raw mode is disabled
    if let Err(e) = execute!(
        stdout(),
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    ) {
        let _ = disable_raw_mode();
        return Err(e.into());
    }

    match ratatui::Terminal::new(ratatui::backend::CrosstermBackend::new(stdout())) {
        Ok(terminal) => Ok(terminal),
        Err(e) => {
            let _ = restore_terminal();
            Err(e.into())
        }
    }
}

/// Restore terminal to normal state
fn restore_terminal() -> Result<()> {
    let _ = execute!(
        stdout(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    );
    disable_raw_mode()?;
    Ok(())
}

fn run(mut terminal: DefaultTerminal, mut app: App, warning: Option<String>) -> Result<App> {
    if let Some(warning) = warning {
        app.notification.show_warning(&warning);
    }

    let outcome = (|| -> Result<()> {
        loop {
            if app.should_render() {
                terminal.draw(|frame| app.render(frame))?;
                app.clear_dirty();
            }

            app.handle_events()?;

            if app.should_quit() {
                return Ok(());
            }
        }
    })();

    // Leave no timer or lookup behind, whatever ended the loop
    app.teardown();
    outcome.map(|()| app)
}

/// Print the accepted booking after the terminal is restored
fn handle_output(app: &App) -> Result<(), LorryError> {
    if let Some(booking) = app.booking() {
        println!("{}", serde_json::to_string_pretty(booking)?);
    }
    Ok(())
}

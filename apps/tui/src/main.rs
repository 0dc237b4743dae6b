mod app;
mod config;
mod event;
mod logging;
mod terminal;
mod ui;

use std::sync::Arc;

use anyhow::Context;
use tuimarket_core::{symbols_file, visible_rows, RefreshScheduler, Watchlist};
use tuimarket_market_data::YahooQuoteFetcher;

use app::App;
use config::AppConfig;
use event::{Event, EventHandler};
use terminal::TerminalSession;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env();
    let _log_guard = logging::init_tracing(&config);
    for warning in &config.warnings {
        tracing::warn!("{}", warning);
    }

    // Everything that can fail on bad input happens before the terminal
    // switches to raw mode, so errors print normally.
    let symbols = symbols_file::load(config.symbols_path.as_deref())?;
    let watchlist = Arc::new(Watchlist::new(symbols.tickers)?);

    let fetcher = YahooQuoteFetcher::new(config.refresh_period)
        .context("Failed to build the quote HTTP client")?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("tuimarket-refresh")
        .enable_all()
        .build()
        .context("Failed to start the refresh runtime")?;

    let scheduler = RefreshScheduler::new(
        Arc::new(fetcher),
        Arc::clone(&watchlist),
        config.refresh_period,
    );
    runtime.spawn(scheduler.run());

    let result = run_ui(&config, watchlist);

    // The refresh task may be mid-request; don't wait for it.
    runtime.shutdown_background();
    tracing::info!("Exiting");
    result
}

fn run_ui(config: &AppConfig, watchlist: Arc<Watchlist>) -> anyhow::Result<()> {
    let mut session = TerminalSession::start().context("Failed to initialize the terminal")?;
    let events = EventHandler::new(config.tick_rate);
    let mut app = App::new(watchlist);

    while !app.should_quit {
        let terminal = session.terminal();
        let rows = visible_rows(terminal.size()?.height);
        app.fit_to(rows);
        terminal.draw(|frame| ui::draw(frame, &app))?;

        match events.next_event()? {
            Event::Key(key) => app.handle_action(EventHandler::key_to_action(key), rows),
            Event::Resize(_, _) | Event::Tick => {}
        }
    }

    Ok(())
}

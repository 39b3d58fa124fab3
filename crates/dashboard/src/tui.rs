use crate::keys::{self, Action};
use crate::ui;
use anyhow::Context;
use crossterm::event::{Event, EventStream, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use futures_util::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use stockpulse_core::api::MarketDataClient;
use stockpulse_core::config::Settings;
use stockpulse_core::poll::{PollIntervals, PollingController};

const REDRAW_EVERY: Duration = Duration::from_millis(250);

/// Raw mode + alternate screen for as long as it lives.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn enter() -> anyhow::Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err).context("failed to enter alternate screen");
        }
        let terminal = Terminal::new(CrosstermBackend::new(stdout))
            .context("failed to initialise terminal")?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

pub async fn run(client: Arc<dyn MarketDataClient>, settings: &Settings) -> anyhow::Result<()> {
    let mut guard = TerminalGuard::enter()?;

    let mut controller = PollingController::new(
        client,
        settings.default_symbol,
        PollIntervals::from_settings(settings),
    );
    controller.mount();

    let mut events = EventStream::new();
    let mut redraw = tokio::time::interval(REDRAW_EVERY);
    let mut frame: u64 = 0;

    loop {
        guard
            .terminal
            .draw(|f| ui::draw(f, controller.state(), &chrono::Local, frame))
            .context("failed to draw dashboard")?;

        tokio::select! {
            Some(update) = controller.next_update() => {
                controller.apply(update);
            }
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    match keys::action_for(key) {
                        Some(Action::Quit) => break,
                        Some(action) => handle(&mut controller, action),
                        None => {}
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    return Err(err).context("terminal event stream failed");
                }
                None => break,
            },
            _ = redraw.tick() => {
                frame = frame.wrapping_add(1);
                controller.prune_notifications();
            }
        }
    }

    controller.unmount();
    tracing::info!("dashboard closed");
    Ok(())
}

fn handle(controller: &mut PollingController, action: Action) {
    let current = controller.state().symbol();
    match action {
        Action::NextSymbol => controller.select_symbol(current.next()),
        Action::PrevSymbol => controller.select_symbol(current.prev()),
        Action::Select(symbol) => controller.select_symbol(symbol),
        Action::RefreshPrediction => {
            if !controller.refresh_prediction() {
                tracing::debug!(symbol = %current, "prediction refresh ignored; already in flight");
            }
        }
        Action::Quit => {}
    }
}

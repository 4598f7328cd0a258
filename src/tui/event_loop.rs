use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use tracing::{error, info};

use crate::tui::app::TuiApp;

impl TuiApp {
    pub async fn run(&mut self) -> Result<()> {
        struct TuiGuard;
        impl Drop for TuiGuard {
            fn drop(&mut self) {
                ratatui::restore();
            }
        }

        let mut terminal = ratatui::try_init().context("initialize terminal")?;
        let _guard = TuiGuard;

        self.load_trending();
        let mut events = EventStream::new();
        let mut dirty = true; // initial full render
        info!("tui started");

        loop {
            if dirty {
                terminal.draw(|f| self.view(f)).context("draw frame")?;
                dirty = false;
            }

            tokio::select! {
                maybe_event = events.next() => match maybe_event {
                    Some(Ok(Event::Key(k))) if k.kind == KeyEventKind::Press => {
                        self.handle_key(k);
                        dirty = true;
                    }
                    Some(Ok(Event::Resize(_, _))) => dirty = true,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        error!(err = %e, "terminal event error");
                        return Err(e).context("read terminal event");
                    }
                    None => break,
                },
                Some(msg) = self.inbox_rx.recv() => {
                    self.handle_event(msg);
                    // coalesce whatever else is queued into one redraw
                    while let Ok(msg) = self.inbox_rx.try_recv() {
                        self.handle_event(msg);
                    }
                    dirty = true;
                }
            }

            if self.should_quit {
                break;
            }
        }
        info!("tui stopped");
        Ok(())
    }
}

use std::collections::HashMap;

use anyhow::Result;
use tokio::select;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::mpsc::{Receiver, Sender};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::control;
use crate::events::{RegionCommand, RegionEvent, RegionEventKind};

/// What happened to one control line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Sent,
    Unparsable,
    UnknownRegion,
    /// The region's command queue is full; the command was dropped.
    Busy,
    /// The region has stopped.
    Closed,
}

/// Command senders for every live region, keyed by region name.
#[derive(Debug, Default)]
pub struct Routes {
    senders: HashMap<String, Sender<RegionCommand>>,
}

impl Routes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, region: impl Into<String>, commands: Sender<RegionCommand>) {
        self.senders.insert(region.into(), commands);
    }

    pub fn remove(&mut self, region: &str) {
        self.senders.remove(region);
    }

    /// Parses `line` and hands the command to its region without waiting.
    pub fn dispatch(&self, line: &str) -> Dispatch {
        let parsed = match control::parse_line(line) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!(line, "ignoring command: {err:#}");
                return Dispatch::Unparsable;
            }
        };
        let Some(route) = self.senders.get(&parsed.region) else {
            warn!(region = %parsed.region, "no such region");
            return Dispatch::UnknownRegion;
        };
        match route.try_send(parsed.command) {
            Ok(()) => Dispatch::Sent,
            Err(TrySendError::Full(command)) => {
                warn!(region = %parsed.region, ?command, "region busy; command dropped");
                Dispatch::Busy
            }
            Err(TrySendError::Closed(_)) => {
                warn!(region = %parsed.region, "region no longer accepts commands");
                Dispatch::Closed
            }
        }
    }
}

/// Feeds control lines to regions and region events to `on_event` until
/// cancelled, the line source ends, or every region has stopped.
///
/// Rules:
/// - Dispatch never waits on a region, so the event channel is always drained.
/// - A dismissed region is removed from the routes.
pub async fn run<F>(
    mut lines: Receiver<String>,
    mut events: Receiver<RegionEvent>,
    mut routes: Routes,
    cancel: CancellationToken,
    mut on_event: F,
) -> Result<()>
where
    F: FnMut(&RegionEvent) -> Result<()>,
{
    loop {
        select! {
            _ = cancel.cancelled() => break,

            maybe_line = lines.recv() => {
                let Some(line) = maybe_line else {
                    info!("stdin closed; initiating shutdown");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                let outcome = routes.dispatch(&line);
                debug!(line, ?outcome, "control line dispatched");
            }

            maybe_event = events.recv() => {
                let Some(event) = maybe_event else {
                    info!("all regions stopped");
                    break;
                };
                if let RegionEventKind::Dismissed = event.kind {
                    routes.remove(&event.region);
                }
                on_event(&event)?;
            }
        }
    }
    Ok(())
}

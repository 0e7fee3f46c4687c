use anyhow::Result;
use tokio::select;
use tokio::sync::mpsc::{Receiver, Sender};
use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::events::{RegionCommand, RegionEvent, RegionEventKind};
use crate::region::Region;

/// Drives one region until cancelled, dismissed, or the event consumer goes away.
///
/// Rules:
/// - The region owns its engine; nothing else touches its index or timer.
/// - The only live timer is the sleep derived from the engine's deadline on
///   each iteration, so a stopped engine cannot be advanced by a stale tick.
/// - Navigation errors are logged and the loop keeps running.
/// - Once the command sender is dropped, autoplay keeps running.
/// - A late wake-up advances once; missed deadlines are not replayed.
/// - Waiting on a full event channel still honours cancellation.
pub async fn run<T: Send>(
    mut region: Region<T>,
    mut commands: Receiver<RegionCommand>,
    events: Sender<RegionEvent>,
    cancel: CancellationToken,
) -> Result<()> {
    let name = region.name().to_string();
    info!(
        region = %name,
        kind = %region.kind(),
        items = region.carousel().len(),
        autoplay = region.carousel().is_autoplay_armed(),
        "region ready"
    );
    let mut commands_open = true;

    loop {
        let deadline = region.next_deadline().map(Instant::from_std);
        select! {
            _ = cancel.cancelled() => break,

            maybe_cmd = commands.recv(), if commands_open => {
                let Some(cmd) = maybe_cmd else {
                    debug!(region = %name, "command channel closed");
                    commands_open = false;
                    continue;
                };
                let now = Instant::now().into_std();
                match region.handle(&cmd, now) {
                    Ok(Some(kind)) => {
                        let dismissed = matches!(kind, RegionEventKind::Dismissed);
                        if !emit(&events, &name, kind, &cancel).await || dismissed {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(err) => {
                        warn!(region = %name, command = ?cmd, error = %err, "command rejected");
                    }
                }
            }

            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                let now = Instant::now().into_std();
                if let Some(kind) = region.tick(now) {
                    if !emit(&events, &name, kind, &cancel).await {
                        break;
                    }
                }
            }
        }
    }

    region.shutdown();
    debug!(region = %name, "region stopped");
    Ok(())
}

/// Returns `false` when the region should stop: the consumer is gone or
/// shutdown was requested while waiting for room in the channel.
async fn emit(
    events: &Sender<RegionEvent>,
    region: &str,
    kind: RegionEventKind,
    cancel: &CancellationToken,
) -> bool {
    let event = RegionEvent {
        region: region.to_string(),
        kind,
    };
    select! {
        _ = cancel.cancelled() => {
            debug!(region, "cancelled while delivering event");
            false
        }
        sent = events.send(event) => {
            if sent.is_err() {
                warn!(region, "event channel closed");
            }
            sent.is_ok()
        }
    }
}

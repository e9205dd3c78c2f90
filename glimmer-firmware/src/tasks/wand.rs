//! Wand task
//!
//! Runs the frame scheduler back to back, yielding to the executor between
//! ticks. A blocking blast holds the task for its whole duration.

use defmt::*;
use embassy_futures::yield_now;

use glimmer_core::scheduler::BlastOutcome;

use crate::board::Wand;

/// Ticks between loop statistics
const STATS_INTERVAL_TICKS: u32 = 4096;

/// Wand task - samples touch and renders forever
#[embassy_executor::task]
pub async fn wand_task(mut wand: Wand) {
    info!("Wand task started");

    loop {
        let report = wand.tick();

        if let Some(held_ms) = report.released_after {
            debug!("Released after {} ms", held_ms);
        }

        match report.blast {
            BlastOutcome::Played { held_ms, summary } => {
                info!(
                    "Blast after {} ms hold ({} frames, {} ms)",
                    held_ms, summary.frames, summary.paused_ms
                );
            }
            BlastOutcome::Started { held_ms } => {
                info!("Blast started after {} ms hold", held_ms);
            }
            BlastOutcome::Dropped { held_ms } => {
                warn!("Blast still playing, dropped a {} ms hold", held_ms);
            }
            BlastOutcome::Finished => debug!("Blast finished"),
            BlastOutcome::Idle | BlastOutcome::InProgress => {}
        }

        let stats = wand.stats();
        if stats.ticks % STATS_INTERVAL_TICKS == 0 {
            let strip = &wand.board().output;
            trace!(
                "Loop stats: {}, hue={}, brightness={}",
                stats,
                wand.hue(),
                strip.applied_brightness()
            );
            if strip.is_limiting() {
                debug!("Strip current limited to {} mA", strip.max_milliamps());
            }
        }

        yield_now().await;
    }
}

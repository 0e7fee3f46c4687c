//! Dry run of every region's autoplay timeline on a simulated clock.

use std::time::{Duration, Instant};

use anyhow::{Result, anyhow, ensure};

use crate::config::Configuration;
use crate::events::{IndexChange, RegionEventKind};
use crate::region::Region;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedAdvance {
    pub region: String,
    /// Offset from the moment every region became interactive.
    pub at: Duration,
    pub change: IndexChange,
    pub item: String,
}

/// Longest span a dry run will plan.
pub const MAX_SPAN: Duration = Duration::from_secs(24 * 60 * 60);

/// Automatic advances, across all regions in time order, that happen within
/// `span` when nobody interacts with the page.
///
/// # Errors
/// When `span` exceeds [`MAX_SPAN`].
pub fn simulate_autoplay(cfg: &Configuration, span: Duration) -> Result<Vec<PlannedAdvance>> {
    ensure!(
        span <= MAX_SPAN,
        "simulation span {} exceeds the maximum of {}",
        humantime::format_duration(span),
        humantime::format_duration(MAX_SPAN)
    );
    let start = Instant::now();
    let end = start
        .checked_add(span)
        .ok_or_else(|| anyhow!("simulation span is out of range"))?;
    let mut regions: Vec<Region<String>> = cfg
        .regions
        .iter()
        .map(|region| Region::from_config(region, start))
        .collect();

    let mut plan = Vec::new();
    loop {
        let due = regions
            .iter_mut()
            .filter_map(|region| region.next_deadline().map(|at| (at, region)))
            .filter(|(at, _)| *at <= end)
            .min_by_key(|(at, _)| *at);
        let Some((at, region)) = due else {
            break;
        };
        for kind in region.advance_to(at) {
            if let RegionEventKind::IndexChanged(change) = kind {
                let item = region
                    .carousel()
                    .items()
                    .get(change.current)
                    .cloned()
                    .unwrap_or_default();
                plan.push(PlannedAdvance {
                    region: region.name().to_string(),
                    at: at.duration_since(start),
                    change,
                    item,
                });
            }
        }
    }
    Ok(plan)
}

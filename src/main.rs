use std::collections::HashMap;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use seva_carousel::config::Configuration;
use seva_carousel::events::{RegionCommand, RegionEvent, RegionEventKind};
use seva_carousel::region::Region;
use seva_carousel::simulate::simulate_autoplay;
use seva_carousel::tasks;
use seva_carousel::tasks::router::Routes;

#[derive(Debug, Parser)]
#[command(
    name = "seva-carousel",
    version,
    about = "gallery, donor-project and promotion carousels driven from stdin"
)]
struct Args {
    /// Path to YAML config
    #[arg(value_name = "CONFIG")]
    config: PathBuf,
    /// Print every region's autoplay timeline over this span (e.g. "12s") and exit
    #[arg(long = "simulate", value_name = "DURATION", value_parser = humantime::parse_duration)]
    simulate: Option<Duration>,
    /// Emit region events as JSON lines instead of plain text
    #[arg(long = "json")]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // init tracing (RUST_LOG controls level, default = info); stdout carries events
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();

    let Args {
        config,
        simulate,
        json,
    } = Args::parse();

    let cfg = Configuration::from_yaml_file(&config)
        .with_context(|| format!("failed to load configuration from {}", config.display()))?
        .validated()
        .context("invalid configuration values")?;
    tracing::info!(
        regions = cfg.regions.len(),
        "loaded configuration from {}",
        config.display()
    );

    if let Some(span) = simulate {
        return run_simulation(&cfg, span);
    }

    let (events_tx, mut events_rx) = mpsc::channel::<RegionEvent>(cfg.event_buffer); // Regions -> view
    let (lines_tx, mut lines_rx) = mpsc::channel::<String>(cfg.command_buffer); // stdin -> router
    let cancel = CancellationToken::new();

    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::warn!("ctrl-c handler failed: {err}");
                return;
            }
            tracing::info!("ctrl-c received; initiating shutdown");
            cancel.cancel();
        });
    }

    // A plain thread so a pending read never holds up runtime shutdown.
    std::thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if lines_tx.blocking_send(line).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    tracing::warn!("stdin reader failed: {err}");
                    break;
                }
            }
        }
    });

    let mut routes = Routes::new();
    let mut items: HashMap<String, Vec<String>> = HashMap::new();
    let mut tasks = JoinSet::new();
    let now = tokio::time::Instant::now().into_std();
    for region_cfg in &cfg.regions {
        let (cmd_tx, cmd_rx) = mpsc::channel::<RegionCommand>(cfg.command_buffer);
        routes.insert(region_cfg.name.clone(), cmd_tx);
        items.insert(region_cfg.name.clone(), region_cfg.items.clone());
        let region = Region::from_config(region_cfg, now);
        let events_tx = events_tx.clone();
        let cancel = cancel.clone();
        let name = region_cfg.name.clone();
        tasks.spawn(async move {
            tasks::region::run(region, cmd_rx, events_tx, cancel)
                .await
                .with_context(|| format!("region '{name}' failed"))
        });
    }
    drop(events_tx);

    let routed = tasks::router::run(lines_rx, events_rx, routes, cancel.clone(), |event| {
        print_event(event, &items, json)
    })
    .await;

    // Ensure every region is asked to stop
    cancel.cancel();

    while let Some(res) = tasks.join_next().await {
        match res {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!("task error: {e:?}"),
            Err(e) => tracing::error!("join error: {e}"),
        }
    }

    routed
}

fn print_event(event: &RegionEvent, items: &HashMap<String, Vec<String>>, json: bool) -> Result<()> {
    if json {
        let line = serde_json::to_string(event).context("failed to encode region event")?;
        println!("{line}");
        return Ok(());
    }
    match &event.kind {
        RegionEventKind::IndexChanged(change) => {
            let item = items
                .get(&event.region)
                .and_then(|list| list.get(change.current))
                .map_or("", String::as_str);
            println!(
                "{:<16} -> {:>3}  {}  ({})",
                event.region,
                change.current,
                item,
                change.cause.as_str()
            );
        }
        RegionEventKind::Opened { index } => println!("{:<16} opened at {index}", event.region),
        RegionEventKind::Closed => println!("{:<16} closed", event.region),
        RegionEventKind::Dismissed => println!("{:<16} dismissed", event.region),
    }
    Ok(())
}

fn run_simulation(cfg: &Configuration, span: Duration) -> Result<()> {
    println!(
        "# autoplay simulation\n# regions: {}\n# span: {}\n",
        cfg.regions.len(),
        humantime::format_duration(span)
    );

    println!("# regions:");
    for region in &cfg.regions {
        let autoplay = if region.autoplay_armed() {
            format!("every {}", humantime::format_duration(region.effective_interval()))
        } else {
            "off".to_string()
        };
        println!(
            "  {} ({}): {} items, autoplay {}",
            region.name,
            region.kind,
            region.items.len(),
            autoplay
        );
    }

    let plan = simulate_autoplay(cfg, span)?;
    println!("\n# planned advances:");
    if plan.is_empty() {
        println!("(no automatic advances)");
    } else {
        for step in &plan {
            println!(
                "  {:>8}  {:<16} -> {:>3}  {}",
                humantime::format_duration(step.at).to_string(),
                step.region,
                step.change.current,
                step.item
            );
        }
    }
    Ok(())
}

//! skip_demo — a small colony where long walks are replaced by portal pairs.
//!
//! Three colonists get walk orders across a walled map.  Ada carries the
//! portal device and a load of steel, so her long trip east is replaced by
//! a portal pair; she lands in the fogged storage yard, reveals it, flags
//! her cargo for unloading, and walks the last stretch.  Bo has no device
//! and walks straight into the wall.  Cat's trip is short enough to walk.

mod map;

use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sg_agent::AgentBuilder;
use sg_core::{AgentId, Cell, SkipgateConfig};
use sg_output::{CsvTeleportSink, CsvWriter, SimOutputObserver};
use sg_sim::SimBuilder;
use sg_world::{ChebyshevOracle, WorldMap};

use map::build_map;

const DEVICE: &str = "PortalGun_Device";
const YARD: Cell = Cell::flat(60, 20);

#[derive(Parser)]
#[command(name = "skip_demo")]
#[command(about = "Portal pair auto-teleport demo")]
struct Cli {
    /// TOML config with optional [sim] and [portal] tables
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for CSV logs and the portal save
    #[arg(short, long, default_value = "output/skip_demo")]
    out: PathBuf,

    /// Override sim.total_ticks
    #[arg(long)]
    ticks: Option<u64>,

    /// Override sim.seed
    #[arg(long)]
    seed: Option<u64>,

    /// Debug-level logging (same as portal.debug_mode = true)
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SkipgateConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => SkipgateConfig::default(),
    };
    if let Some(t) = cli.ticks {
        config.sim.total_ticks = t;
    }
    if let Some(s) = cli.seed {
        config.sim.seed = s;
    }

    // RUST_LOG wins; otherwise debug_mode picks the level.
    let level = if cli.verbose || config.portal.debug_mode { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!(
        ticks = config.sim.total_ticks,
        threshold = config.portal.min_path_cost_threshold,
        duration_secs = config.portal.portal_duration_secs,
        "skip_demo starting"
    );
    if config.portal.debug_mode {
        info!("effective portal config:\n{}", config.portal.to_toml_string()?);
    }

    // 1. World and agents.
    let map = build_map()?;
    std::fs::create_dir_all(&cli.out).with_context(|| format!("creating {}", cli.out.display()))?;
    let sink = CsvTeleportSink::new(&cli.out)?;

    let mut sim = SimBuilder::new(config, map, ChebyshevOracle::default(), sink)
        .agents([
            AgentBuilder::colonist("Ada", Cell::flat(4, 20))
                .wearing(DEVICE)
                .carrying("Steel")
                .build(),
            AgentBuilder::colonist("Bo", Cell::flat(6, 5)).build(),
            AgentBuilder::colonist("Cat", Cell::flat(10, 30)).carrying(DEVICE).build(),
        ])
        .build()?;

    let orders = [
        (AgentId(0), YARD),
        (AgentId(1), Cell::flat(40, 5)),
        (AgentId(2), Cell::flat(20, 30)),
    ];
    for (agent, dest) in orders {
        sim.order_goto(agent, dest)?;
    }

    // 2. Output.
    let mut obs = SimOutputObserver::new(CsvWriter::new(&cli.out)?);

    // 3. First tick, then snapshot whatever portals are open.
    let t0 = Instant::now();
    sim.run_ticks(1, &mut obs)?;
    for portal in sim.portals.iter() {
        if let Some(text) = sim.inspect_portal(portal.id) {
            println!("{}\n", text);
        }
    }
    let save_path = cli.out.join("portals.json");
    sim.save_portals(File::create(&save_path)?)?;
    info!(portals = sim.portals.len(), path = %save_path.display(), "portals saved");

    // 4. The rest of the run.
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();
    sim.effects.finish()?;

    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }
    if let Some(e) = sim.effects.take_error() {
        eprintln!("teleport log error: {e}");
    }

    // 5. Summary.
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  teleports.csv : {} rows", sim.effects.rows());
    println!();
    println!("{:<6} {:<14} {:<8} {:<8} {:<6}", "Agent", "Position", "Job", "Stunned", "Unload");
    println!("{}", "-".repeat(46));
    for (id, a) in sim.agents.iter() {
        println!(
            "{:<6} {:<14} {:<8} {:<8} {:<6}",
            format!("{}:{}", id.0, a.name),
            a.position.to_string(),
            if a.job.is_some() { "goto" } else { "idle" },
            if a.is_stunned() { "yes" } else { "no" },
            if a.unload_everything { "yes" } else { "no" },
        );
    }
    let yard_fogged = sim.map.is_fogged(YARD);
    println!("\nStorage yard still fogged: {}", if yard_fogged { "yes" } else { "no" });

    Ok(())
}

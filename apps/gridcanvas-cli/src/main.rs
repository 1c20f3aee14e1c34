use clap::{Parser, Subcommand};
use gridcanvas_grid::DenseGrid;
use gridcanvas_render::{CanvasGrid, PortrayalSpec};
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gridcanvas-cli", about = "CLI demo for gridcanvas snapshot rendering")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate info
    Info,
    /// Build a demo grid, render one snapshot, print the wire JSON
    Render {
        /// Grid width in cells
        #[arg(long, default_value = "10")]
        width: u32,
        /// Grid height in cells
        #[arg(long, default_value = "10")]
        height: u32,
        /// Number of demo agents to scatter
        #[arg(short, long, default_value = "20")]
        agents: u64,
        /// Seed for deterministic agent placement
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },
}

/// Demo agent scattered on the grid.
struct DemoAgent {
    id: u64,
    wealthy: bool,
    hidden: bool,
}

fn portray(agent: &DemoAgent) -> Option<PortrayalSpec> {
    if agent.hidden {
        return None;
    }
    let spec = if agent.wealthy {
        PortrayalSpec::rect(0.8, 0.8, "#2b8cbe", true).layer(1)
    } else {
        PortrayalSpec::circle(0.5, "Red", true).layer(0)
    };
    Some(spec.with("id", json!(agent.id)))
}

/// Splitmix64: deterministic stream of placements from one seed.
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

fn make_demo_grid(width: u32, height: u32, agents: u64, seed: u64) -> DenseGrid<DemoAgent> {
    let mut grid = DenseGrid::new(width, height);
    let mut state = seed;
    for id in 0..agents {
        let x = (splitmix64(&mut state) % u64::from(width)) as u32;
        let y = (splitmix64(&mut state) % u64::from(height)) as u32;
        let roll = splitmix64(&mut state);
        let agent = DemoAgent {
            id,
            wealthy: roll % 5 == 0,
            hidden: roll % 7 == 0,
        };
        // Coordinates are generated in range, so placement cannot fail.
        grid.place(x, y, agent).expect("in-bounds placement");
    }
    tracing::debug!(agents, seed, placed = grid.entity_count(), "demo grid built");
    grid
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("gridcanvas-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", gridcanvas_render::crate_info());
        }
        Commands::Render {
            width,
            height,
            agents,
            seed,
        } => {
            let grid = make_demo_grid(width, height, agents, seed);
            let renderer = CanvasGrid::new(portray, width, height)?;

            println!(
                "init: {}",
                serde_json::to_string(&renderer.init_descriptor())?
            );

            let snapshot = renderer.render(&grid)?;
            println!(
                "snapshot: {} portrayals across layers {:?}",
                snapshot.len(),
                snapshot.layers_sorted()
            );
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
    }

    Ok(())
}

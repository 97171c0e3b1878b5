use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use wpgm_editor::config::load_settings;
use wpgm_editor::visualization::encode_png;
use wpgm_editor::{load_map, load_waypoints, render_waypoints, server, waypoints_to_csv};

#[derive(Parser, Debug)]
#[command(name = "wpgm-editor", version, about = "Visualize and edit waypoints on ROS occupancy-grid maps")]
struct Cli {
    /// Settings file (TOML). Defaults to ./wpgm-editor.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the web editor (default).
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Render waypoints onto a map and write a PNG.
    Render {
        /// Map metadata; its `image` key names the PGM.
        #[arg(long)]
        map: PathBuf,
        #[arg(long)]
        waypoints: PathBuf,
        #[arg(long, default_value = "waypoints.png")]
        output: PathBuf,
    },
    /// Renumber a waypoint CSV and write it in export format.
    Export {
        #[arg(long)]
        waypoints: PathBuf,
        #[arg(long, default_value = "new_waypoints.csv")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut settings = load_settings(cli.config.as_deref()).context("loading settings")?;

    match cli.command.unwrap_or(Command::Serve {
        host: None,
        port: None,
    }) {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                settings.server.host = host;
            }
            if let Some(port) = port {
                settings.server.port = port;
            }
            info!("Starting wPGM Editor...");
            server::serve(settings).await.context("server failed")?;
        }
        Command::Render {
            map,
            waypoints,
            output,
        } => {
            let grid = load_map(&map).with_context(|| format!("loading map {}", map.display()))?;
            let waypoints = load_waypoints(&waypoints)
                .with_context(|| format!("loading waypoints {}", waypoints.display()))?;
            if waypoints.is_empty() {
                warn!("No waypoints found, rendering the bare map");
            }
            let image = render_waypoints(&grid, &waypoints, &settings.render);
            std::fs::write(&output, encode_png(&image)?)
                .with_context(|| format!("writing {}", output.display()))?;
            info!("Wrote {} ({} waypoints)", output.display(), waypoints.len());
        }
        Command::Export { waypoints, output } => {
            let list = load_waypoints(&waypoints)
                .with_context(|| format!("loading waypoints {}", waypoints.display()))?;
            let csv = waypoints_to_csv(&list)?;
            std::fs::write(&output, csv).with_context(|| format!("writing {}", output.display()))?;
            info!("Wrote {} ({} waypoints)", output.display(), list.len());
        }
    }

    Ok(())
}

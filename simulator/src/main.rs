use anyhow::Context;
use clap::{Parser, ValueEnum};
use gui_bridge::bridge::{gui_bind_address, GuiBridge};
use lmpcore::matching::{CenterMode, MatchSession, DEFAULT_RADIUS_KM};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::WorkflowConfig;
use workflow::dataset::Roster;
use workflow::runner::Runner;

mod generator;
mod gui_bridge;
mod workflow;

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    User,
    Assistant,
}

impl From<ModeArg> for CenterMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::User => CenterMode::User,
            ModeArg::Assistant => CenterMode::Assistant,
        }
    }
}

#[derive(Parser)]
#[command(author, version, about = "LmpLink proximity matching driver")]
struct Args {
    /// Run one matching pass and append a summary to the report log
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    #[arg(long, default_value_t = DEFAULT_RADIUS_KM)]
    radius: f64,
    #[arg(long, value_enum, default_value_t = ModeArg::User)]
    center_mode: ModeArg,
    #[arg(long)]
    center_id: Option<u32>,
    /// Restore the roster from a JSON backup
    #[arg(long)]
    dataset: Option<PathBuf>,
    /// Use a seeded synthetic roster instead of the Dobong fixture
    #[arg(long)]
    synthetic: Option<u64>,
    /// Write the active roster to a JSON backup
    #[arg(long)]
    export: Option<PathBuf>,
    /// Keep the map bridge alive for incoming selections
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut workflow_config = if let Some(path) = args.workflow {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::from_args(args.radius, args.center_mode.into(), args.center_id)
    };
    if args.dataset.is_some() {
        workflow_config.dataset = args.dataset;
    }
    if let Some(seed) = args.synthetic {
        workflow_config.synthetic = Some(generator::scatter::GeneratorConfig {
            seed,
            ..Default::default()
        });
    }

    let runner = Runner::new(workflow_config.clone());
    let directory = runner.roster()?.into_directory()?;
    let roster = Roster::from_directory(&directory);

    if let Some(path) = &args.export {
        roster
            .save(path)
            .with_context(|| format!("exporting roster to {}", path.display()))?;
    }

    if args.offline {
        let result = runner.execute(&roster)?;
        let center = result
            .center
            .as_ref()
            .map(|person| format!("{} {} ({})", person.kind.label(), person.name, person.id))
            .unwrap_or_else(|| "none".to_string());

        println!(
            "Offline run -> center {}, {}, users {}, assistants {}",
            center, result.status, result.users_in_radius, result.assistants_in_radius
        );
        for entry in &result.matches {
            println!(
                "  {:>3} {:<8} {:>6.2} km  {}",
                entry.person.id,
                entry.person.name,
                entry.display_distance(),
                entry.person.address
            );
        }

        let report = format!(
            "center={} radius={} matches={} evaluated={} ids={:?}\n",
            center,
            workflow_config.radius_km,
            result.matches.len(),
            result.metrics.candidates_evaluated,
            result
                .matches
                .iter()
                .map(|entry| entry.person.id)
                .collect::<Vec<_>>()
        );
        let report_path = PathBuf::from("tools/data/offline_matching.log");
        if let Some(parent) = report_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(report_path)?;
        file.write_all(report.as_bytes())?;
    }

    if args.serve {
        let gui_bridge = GuiBridge::new(MatchSession::new(), workflow_config.style.clone());
        gui_bridge.publish(runner.session(&roster)?)?;
        let address = gui_bridge.serve(gui_bind_address())?;
        gui_bridge.publish_status(&format!(
            "HTTP bridge running on http://{} (Ctrl+C to stop)...",
            address
        ));
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}

//! `planner <mission-file> <org-model-file> [<min-solutions>]` (§6).
//!
//! Mission files are the XML schema [`missioncore::mission::parse_mission_xml`]
//! reads; org-model files are a small JSON document (subclasses, saturation
//! bounds, coalition domains) loaded straight into an
//! [`missioncore::organization::InMemoryOrganizationModel`] — the ontology
//! itself is an external collaborator per §6, so this loader is a minimal
//! stand-in for whatever real RDF/XML store a deployment would point at.

use std::fs;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use missioncore::driver;
use missioncore::error::PlanOutcome;
use missioncore::mission::parse_mission_xml;
use missioncore::model::ModelPool;
use missioncore::organization::InMemoryOrganizationModel;
use missioncore::session::Session;

/// Computes a consistent agent-to-requirement assignment plus feasible
/// transport routes for a mission.
#[derive(Parser, Debug)]
#[command(name = "planner", version, about)]
struct Cli {
    /// Path to the mission XML file.
    mission_file: String,

    /// Path to the organization-model JSON file.
    org_model_file: String,

    /// Stop once this many solutions have been found (currently the
    /// planner only ever reports the best one found before stopping).
    min_solutions: Option<u32>,

    #[arg(long)]
    time_limit_secs: Option<u64>,

    #[arg(long)]
    node_limit: Option<u64>,

    #[arg(long)]
    fail_limit: Option<u64>,
}

fn load_organization(path: &str) -> Result<InMemoryOrganizationModel, String> {
    let text = fs::read_to_string(path).map_err(|e| format!("reading {path}: {e}"))?;
    let doc: serde_json::Value =
        serde_json::from_str(&text).map_err(|e| format!("parsing {path}: {e}"))?;

    let mut model = InMemoryOrganizationModel::new();

    for (iri, parents) in doc.get("subclasses").and_then(|v| v.as_object()).into_iter().flatten() {
        for parent in parents.as_array().into_iter().flatten().filter_map(|v| v.as_str()) {
            model = model.with_super_class(iri.clone(), parent.to_string());
        }
    }

    for (resource, bound) in doc.get("saturation_bounds").and_then(|v| v.as_object()).into_iter().flatten() {
        model = model.with_saturation_bound(resource.clone(), pool_from_json(bound));
    }

    for entry in doc.get("coalitions").and_then(|v| v.as_array()).into_iter().flatten() {
        let resources: Vec<String> = entry
            .get("resources")
            .and_then(|v| v.as_array())
            .into_iter()
            .flatten()
            .filter_map(|v| v.as_str())
            .map(str::to_string)
            .collect();
        let domain: Vec<ModelPool> = entry
            .get("domain")
            .and_then(|v| v.as_array())
            .into_iter()
            .flatten()
            .map(pool_from_json)
            .collect();
        model = model.with_coalition_domain(resources, domain);
    }

    Ok(model)
}

fn pool_from_json(value: &serde_json::Value) -> ModelPool {
    let mut pool = ModelPool::new();
    for (model, count) in value.as_object().into_iter().flatten() {
        pool.set(model.clone(), count.as_u64().unwrap_or(0) as u32);
    }
    pool
}

fn run(cli: &Cli) -> Result<bool, String> {
    if let Some(n) = cli.min_solutions {
        tracing::debug!(min_solutions = n, "multi-solution enumeration is not implemented; returning the best single solution found");
    }

    let organization = load_organization(&cli.org_model_file)?;
    let xml = fs::read_to_string(&cli.mission_file)
        .map_err(|e| format!("reading {}: {e}", cli.mission_file))?;
    let mut mission = parse_mission_xml(&xml, &organization).map_err(|e| e.to_string())?;
    mission.validate().map_err(|e| e.to_string())?;

    let template = missioncore::csp::TransportNetwork::new(&mission, &organization)
        .map_err(|e| e.to_string())?;

    let mut session = Session::new(
        cli.time_limit_secs.map(Duration::from_secs),
        cli.node_limit,
        cli.fail_limit,
    );

    let outcome = driver::plan(&mission, &template, &mut session);
    match outcome {
        PlanOutcome::Solved(_) => {
            tracing::info!("solution found after {} restart(s)", session.restarts);
            Ok(true)
        }
        PlanOutcome::Stopped(Some(_)) => {
            tracing::warn!("stopped with a best-known solution after {} restart(s)", session.restarts);
            Ok(true)
        }
        PlanOutcome::Stopped(None) | PlanOutcome::Exhausted => {
            tracing::warn!("search exhausted without a feasible solution");
            Ok(false)
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(message) => {
            tracing::error!("{message}");
            ExitCode::FAILURE
        }
    }
}

use crate::cli::AssignArgs;
use crate::error::Result;
use crate::input;
use crate::report::ParameterReport;
use crosslink::core::parameters::PotentialHandler;
use crosslink::engine::TabulatedEngine;
use crosslink::workflows::assign::assign_parameters;
use tracing::info;

pub fn run(args: AssignArgs) -> Result<()> {
    info!("Loading force-field tables from {:?}", &args.forcefield);
    let engine = match &args.type_overrides {
        Some(overrides) => TabulatedEngine::load_with_overrides(&args.forcefield, overrides)?,
        None => TabulatedEngine::load(&args.forcefield)?,
    };

    info!("Loading topology from {:?}", &args.topology);
    let mut topology = input::load_topology(&args.topology)?;

    println!(
        "Assigning parameters to {} atoms / {} bonds...",
        topology.atom_count(),
        topology.bonds().len()
    );
    let result = assign_parameters(&engine, &mut topology)?;

    let report = ParameterReport::new(&result, &topology, &args.topology, &args.forcefield);
    std::fs::write(&args.output, report.to_toml_string()?)?;

    println!(
        "Wrote parameter report to {} ({} charges, {} bond slots, {} angle slots).",
        args.output.display(),
        result.electrostatics.charges().len(),
        result.bonds.slot_map().len(),
        result.angles.slot_map().len(),
    );
    Ok(())
}

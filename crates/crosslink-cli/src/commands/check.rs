use crate::cli::CheckArgs;
use crate::error::Result;
use crate::input;
use crosslink::core::parameters::PotentialHandler;
use crosslink::engine::TabulatedEngine;
use crosslink::workflows::assign::{HANDLER_NAMES, assign_parameters};
use tracing::info;

pub fn run(args: CheckArgs) -> Result<()> {
    info!("Loading force-field tables from {:?}", &args.forcefield);
    let engine = match &args.type_overrides {
        Some(overrides) => TabulatedEngine::load_with_overrides(&args.forcefield, overrides)?,
        None => TabulatedEngine::load(&args.forcefield)?,
    };

    info!("Loading topology from {:?}", &args.topology);
    let mut topology = input::load_topology(&args.topology)?;

    // A topology with any untypable atom fails here, which is the point of
    // the check.
    let result = assign_parameters(&engine, &mut topology)?;

    println!(
        "All {} atoms typed against {}.",
        topology.atom_count(),
        args.forcefield.display()
    );
    println!();
    println!("{:<18} {:>6} {:>12}", "handler", "slots", "potentials");
    for name in HANDLER_NAMES {
        let handler = result.handler(name).expect("canonical handler name");
        println!(
            "{:<18} {:>6} {:>12}",
            name,
            handler.slot_map().len(),
            handler.potentials().len()
        );
    }
    println!(
        "{:<18} {:>6} {:>12}",
        "Electrostatics",
        result.electrostatics.charges().len(),
        "-"
    );
    println!();
    println!("Total charge: {:+.4} e", result.electrostatics.total_charge());

    let connected: [(&str, &dyn UnresolvedKeys); 6] = [
        ("Bonds", &result.bonds),
        ("Angles", &result.angles),
        ("RBTorsions", &result.rb_propers),
        ("RBImpropers", &result.rb_impropers),
        ("ProperTorsions", &result.periodic_propers),
        ("ImproperTorsions", &result.periodic_impropers),
    ];
    let unresolved: Vec<(&str, Vec<String>)> = connected
        .into_iter()
        .map(|(name, handler)| (name, handler.unresolved_key_ids()))
        .filter(|(_, keys)| !keys.is_empty())
        .collect();

    if unresolved.is_empty() {
        println!("Every matched connection resolved to parameters.");
    } else {
        println!("Connections without parameters:");
        for (name, keys) in unresolved {
            for key in keys {
                println!("  {}: {}", name, key);
            }
        }
    }

    Ok(())
}

/// Object-safe view over the unresolved keys of a connected-atoms handler.
trait UnresolvedKeys {
    fn unresolved_key_ids(&self) -> Vec<String>;
}

impl<K: crosslink::core::parameters::bonded::ConnectionKind> UnresolvedKeys
    for crosslink::core::parameters::bonded::ConnectedAtomsHandler<K>
{
    fn unresolved_key_ids(&self) -> Vec<String> {
        self.unresolved_keys()
            .into_iter()
            .map(|key| key.id().to_string())
            .collect()
    }
}

//! Packaging an edited circuit into a reusable chip.

use gatesmith_circuit::{ChipDefinition, Circuit};
use gatesmith_common::Colour;
use gatesmith_diagnostics::DiagnosticSink;

use crate::error::LoadError;
use crate::loader::{load_one, LoadOptions};
use crate::registry::ChipRegistry;

/// Packages `circuit` as a new chip called `name` and registers it.
///
/// The chip gets the registry's next creation index. Its definition is
/// built through [`load_one`], so the registered template is exactly what a
/// later reload of the returned definition will produce. The returned
/// definition is what the caller hands to storage.
pub fn package_circuit(
    circuit: &Circuit,
    name: &str,
    colour: Colour,
    name_colour: Colour,
    registry: &mut ChipRegistry,
    options: LoadOptions,
    sink: &DiagnosticSink,
) -> Result<ChipDefinition, LoadError> {
    let definition = circuit.to_definition(name, colour, name_colour, registry.next_creation_index());
    let template = load_one(&definition, registry, options, sink)?;
    registry.insert(template)?;
    log::info!(
        "packaged chip `{name}` (creation index {}, {} components)",
        definition.creation_index,
        definition.components.len()
    );
    Ok(definition)
}

//! Turning chip definitions into registered templates, in dependency order.
//!
//! [`load_all`] sorts definitions by creation index, so a chip is always
//! loaded after every chip packaged before it, then loads them one at a time
//! into the registry. A failing definition is reported to the
//! [`DiagnosticSink`] and never registered; later definitions still load
//! unless strict mode is on.

use std::sync::Arc;

use gatesmith_circuit::{ChipDefinition, ChipId, ChipTemplate, Circuit, CustomChip, PinKind};
use gatesmith_config::{Config, CyclePolicy};
use gatesmith_diagnostics::DiagnosticSink;

use crate::codes;
use crate::error::LoadError;
use crate::registry::ChipRegistry;

/// Settings for a load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Stop at the first failing definition.
    pub strict: bool,
    /// How to treat feedback loops with no cyclic pin.
    pub unflagged_cycles: CyclePolicy,
}

impl From<&Config> for LoadOptions {
    fn from(config: &Config) -> Self {
        Self {
            strict: config.loader.strict,
            unflagged_cycles: config.packaging.unflagged_cycles,
        }
    }
}

/// Outcome of a non-strict [`load_all`].
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Names registered, in load order.
    pub loaded: Vec<String>,
    /// Definitions that failed, with the reason.
    pub failed: Vec<(String, LoadError)>,
}

impl LoadReport {
    /// Returns `true` if every definition loaded.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Loads every definition into `registry`, lowest creation index first.
///
/// Each failure is emitted to `sink`. With `options.strict` the first failure
/// is returned and nothing after it is attempted; otherwise the report lists
/// every failure.
pub fn load_all(
    definitions: &[ChipDefinition],
    registry: &mut ChipRegistry,
    options: LoadOptions,
    sink: &DiagnosticSink,
) -> Result<LoadReport, LoadError> {
    let mut ordered: Vec<&ChipDefinition> = definitions.iter().collect();
    ordered.sort_by_key(|def| def.creation_index);

    let mut report = LoadReport::default();
    for def in ordered {
        let result = load_one(def, registry, options, sink).and_then(|template| registry.insert(template));
        match result {
            Ok(()) => {
                log::info!("loaded chip `{}`", def.name);
                report.loaded.push(def.name.clone());
            }
            Err(err) => {
                log::warn!("failed to load chip `{}`: {err}", def.name);
                sink.emit(codes::error_diagnostic(&err));
                if options.strict {
                    return Err(err);
                }
                report.failed.push((def.name.clone(), err));
            }
        }
    }
    Ok(report)
}

/// Builds a template from one definition using the chips in `known`.
///
/// All components are instantiated before any wiring is applied, since a
/// pin may be driven by a component recorded after it. The template is
/// returned, not registered.
pub fn load_one(
    def: &ChipDefinition,
    known: &ChipRegistry,
    options: LoadOptions,
    sink: &DiagnosticSink,
) -> Result<ChipTemplate, LoadError> {
    if known.contains(&def.name) {
        return Err(LoadError::DuplicateChip {
            name: def.name.clone(),
        });
    }

    let mut circuit = Circuit::new();
    let mut placed: Vec<ChipId> = Vec::with_capacity(def.components.len());
    for (index, component) in def.components.iter().enumerate() {
        let template = known
            .get(&component.chip_name)
            .ok_or_else(|| LoadError::MissingDependency {
                chip: def.name.clone(),
                component: index,
                dependency: component.chip_name.clone(),
            })?;
        let mismatch = |kind, expected, found| LoadError::PinCountMismatch {
            chip: def.name.clone(),
            component: index,
            dependency: component.chip_name.clone(),
            kind,
            expected,
            found,
        };
        let (expected_in, expected_out) = (template.input_names().len(), template.output_names().len());
        if component.input_pins.len() != expected_in {
            return Err(mismatch(PinKind::ChipInput, expected_in, component.input_pins.len()));
        }
        if component.output_pin_names.len() != expected_out {
            return Err(mismatch(PinKind::ChipOutput, expected_out, component.output_pin_names.len()));
        }

        let chip = circuit.add_chip(template);
        circuit.set_position(chip, component.position)?;
        for (i, record) in component.input_pins.iter().enumerate() {
            let pin = circuit.input_pin(chip, i)?;
            circuit.rename_pin(pin, record.name.clone())?;
        }
        for (i, name) in component.output_pin_names.iter().enumerate() {
            let pin = circuit.output_pin(chip, i)?;
            circuit.rename_pin(pin, name.clone())?;
        }
        placed.push(chip);
    }
    log::debug!("chip `{}`: placed {} components", def.name, placed.len());

    for (index, component) in def.components.iter().enumerate() {
        for (i, record) in component.input_pins.iter().enumerate() {
            let destination = circuit.input_pin(placed[index], i)?;
            circuit.set_cyclic(destination, record.cyclic)?;
            let Some(source) = record.source else { continue };
            let invalid = |reason: String| LoadError::InvalidSource {
                chip: def.name.clone(),
                component: index,
                pin: i,
                reason,
            };
            let source_pin = circuit
                .chip_at(source.chip_index)
                .and_then(|chip| circuit.output_pin(chip, source.output_index))
                .map_err(|e| invalid(e.to_string()))?;
            circuit.connect(source_pin, destination)?;
        }
    }

    check_feedback_loops(def, &circuit, options.unflagged_cycles, sink)?;

    let chip = CustomChip::new(
        def.name.clone(),
        def.colour,
        def.name_colour,
        def.creation_index,
        circuit,
    );
    Ok(ChipTemplate::Custom(Arc::new(chip)))
}

fn check_feedback_loops(
    def: &ChipDefinition,
    circuit: &Circuit,
    policy: CyclePolicy,
    sink: &DiagnosticSink,
) -> Result<(), LoadError> {
    if policy == CyclePolicy::Allow {
        return Ok(());
    }
    let loops = circuit.unflagged_feedback_loops();
    if loops.is_empty() {
        return Ok(());
    }
    let mut components: Vec<usize> = loops.iter().flatten().map(|id| id.index()).collect();
    components.sort_unstable();
    match policy {
        CyclePolicy::Deny => Err(LoadError::UnflaggedCycle {
            chip: def.name.clone(),
            components,
        }),
        _ => {
            log::warn!("chip `{}` has unflagged feedback through {components:?}", def.name);
            sink.emit(codes::warn_unflagged_cycle(&def.name, &components));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatesmith_circuit::{ComponentRecord, PinRecord, PinSource};
    use gatesmith_common::{Colour, Logic, Point};

    fn pin(name: &str, source: Option<(usize, usize)>) -> PinRecord {
        PinRecord {
            name: name.into(),
            source: source.map(|(chip_index, output_index)| PinSource {
                chip_index,
                output_index,
            }),
            cyclic: false,
        }
    }

    fn component(chip: &str, inputs: Vec<PinRecord>, outputs: &[&str]) -> ComponentRecord {
        ComponentRecord {
            chip_name: chip.into(),
            position: Point::default(),
            input_pins: inputs,
            output_pin_names: outputs.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn definition(name: &str, creation_index: u32, components: Vec<ComponentRecord>) -> ChipDefinition {
        ChipDefinition {
            name: name.into(),
            colour: Colour::WHITE,
            name_colour: Colour::BLACK,
            creation_index,
            components,
        }
    }

    /// IN -> NOT -> OUT, with the NOT recorded last so wiring points forward.
    fn inverter(name: &str, creation_index: u32) -> ChipDefinition {
        definition(
            name,
            creation_index,
            vec![
                component("SIGNAL IN", vec![], &["In"]),
                component("SIGNAL OUT", vec![pin("Out", Some((2, 0)))], &[]),
                component("NOT", vec![pin("In", Some((0, 0)))], &["Out"]),
            ],
        )
    }

    fn using(name: &str, creation_index: u32, dependency: &str) -> ChipDefinition {
        definition(
            name,
            creation_index,
            vec![
                component("SIGNAL IN", vec![], &["A"]),
                component(dependency, vec![pin("In", Some((0, 0)))], &["Out"]),
                component("SIGNAL OUT", vec![pin("Y", Some((1, 0)))], &[]),
            ],
        )
    }

    #[test]
    fn load_one_builds_working_chip() {
        let registry = ChipRegistry::with_builtins();
        let sink = DiagnosticSink::new();
        let template = load_one(&inverter("INV", 0), &registry, LoadOptions::default(), &sink).unwrap();
        assert_eq!(template.input_names(), vec!["In"]);
        assert_eq!(template.output_names(), vec!["Out"]);

        let mut internals = template.as_custom().unwrap().internals.clone();
        assert_eq!(internals.evaluate(&[Logic::Zero], 100).unwrap(), vec![Logic::One]);
        assert_eq!(internals.evaluate(&[Logic::One], 100).unwrap(), vec![Logic::Zero]);
        assert!(!sink.has_errors());
    }

    #[test]
    fn load_one_reports_missing_dependency() {
        let registry = ChipRegistry::with_builtins();
        let sink = DiagnosticSink::new();
        let err = load_one(&using("OUTER", 1, "INV"), &registry, LoadOptions::default(), &sink).unwrap_err();
        match err {
            LoadError::MissingDependency {
                chip,
                component,
                dependency,
            } => {
                assert_eq!(chip, "OUTER");
                assert_eq!(component, 1);
                assert_eq!(dependency, "INV");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn load_one_checks_pin_counts() {
        let registry = ChipRegistry::with_builtins();
        let sink = DiagnosticSink::new();
        let def = definition("BAD", 0, vec![component("AND", vec![pin("A", None)], &["Out"])]);
        let err = load_one(&def, &registry, LoadOptions::default(), &sink).unwrap_err();
        assert!(matches!(
            err,
            LoadError::PinCountMismatch {
                kind: PinKind::ChipInput,
                expected: 2,
                found: 1,
                ..
            }
        ));
    }

    #[test]
    fn load_one_rejects_bad_source() {
        let registry = ChipRegistry::with_builtins();
        let sink = DiagnosticSink::new();
        let def = definition("BAD", 0, vec![component("NOT", vec![pin("In", Some((7, 0)))], &["Out"])]);
        let err = load_one(&def, &registry, LoadOptions::default(), &sink).unwrap_err();
        assert!(matches!(err, LoadError::InvalidSource { component: 0, pin: 0, .. }));
    }

    #[test]
    fn load_one_rejects_source_index_beyond_u32() {
        let registry = ChipRegistry::with_builtins();
        let sink = DiagnosticSink::new();
        let oversized = u32::MAX as usize + 1;
        let def = definition(
            "WIDE",
            0,
            vec![component("NOT", vec![pin("In", Some((oversized, 0)))], &["Out"])],
        );
        let err = load_one(&def, &registry, LoadOptions::default(), &sink).unwrap_err();
        assert!(matches!(err, LoadError::InvalidSource { component: 0, pin: 0, .. }));
    }

    #[test]
    fn load_one_applies_names_and_cyclic_flags() {
        let registry = ChipRegistry::with_builtins();
        let sink = DiagnosticSink::new();
        let mut def = inverter("INV", 0);
        def.components[2].input_pins[0].cyclic = true;
        def.components[2].output_pin_names[0] = "Inverted".into();
        let template = load_one(&def, &registry, LoadOptions::default(), &sink).unwrap();
        let internals = &template.as_custom().unwrap().internals;
        let not = internals.chip_at(2).unwrap();
        let input = internals.pin(internals.input_pin(not, 0).unwrap()).unwrap();
        assert!(input.is_cyclic());
        let output = internals.pin(internals.output_pin(not, 0).unwrap()).unwrap();
        assert_eq!(output.name(), "Inverted");
    }

    #[test]
    fn load_all_sorts_by_creation_index() {
        let mut registry = ChipRegistry::with_builtins();
        let sink = DiagnosticSink::new();
        let defs = vec![using("OUTER", 1, "INV"), inverter("INV", 0)];
        let report = load_all(&defs, &mut registry, LoadOptions::default(), &sink).unwrap();
        assert_eq!(report.loaded, vec!["INV", "OUTER"]);
        assert!(report.is_clean());
        assert!(registry.contains("OUTER"));
    }

    #[test]
    fn load_all_continues_after_failure() {
        let mut registry = ChipRegistry::with_builtins();
        let sink = DiagnosticSink::new();
        let defs = vec![using("BROKEN", 0, "NOPE"), inverter("INV", 1)];
        let report = load_all(&defs, &mut registry, LoadOptions::default(), &sink).unwrap();
        assert_eq!(report.loaded, vec!["INV"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "BROKEN");
        assert!(!registry.contains("BROKEN"));
        assert_eq!(sink.error_count(), 1);
    }

    #[test]
    fn strict_load_stops_at_first_failure() {
        let mut registry = ChipRegistry::with_builtins();
        let sink = DiagnosticSink::new();
        let options = LoadOptions {
            strict: true,
            ..LoadOptions::default()
        };
        let defs = vec![using("BROKEN", 0, "NOPE"), inverter("INV", 1)];
        let err = load_all(&defs, &mut registry, options, &sink).unwrap_err();
        assert!(matches!(err, LoadError::MissingDependency { .. }));
        assert!(!registry.contains("INV"));
    }

    #[test]
    fn duplicate_definition_is_rejected() {
        let mut registry = ChipRegistry::with_builtins();
        let sink = DiagnosticSink::new();
        let defs = vec![inverter("INV", 0), inverter("INV", 1)];
        let report = load_all(&defs, &mut registry, LoadOptions::default(), &sink).unwrap();
        assert_eq!(report.loaded, vec!["INV"]);
        assert!(matches!(report.failed[0].1, LoadError::DuplicateChip { .. }));
    }

    fn self_feeding(cyclic: bool) -> ChipDefinition {
        let mut fb = pin("In", Some((0, 0)));
        fb.cyclic = cyclic;
        definition("OSC", 0, vec![component("NOT", vec![fb], &["Out"])])
    }

    #[test]
    fn cycle_policy_warn_keeps_chip() {
        let registry = ChipRegistry::with_builtins();
        let sink = DiagnosticSink::new();
        load_one(&self_feeding(false), &registry, LoadOptions::default(), &sink).unwrap();
        let diags = sink.diagnostics();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, codes::W201);
    }

    #[test]
    fn cycle_policy_deny_rejects_chip() {
        let registry = ChipRegistry::with_builtins();
        let sink = DiagnosticSink::new();
        let options = LoadOptions {
            unflagged_cycles: CyclePolicy::Deny,
            ..LoadOptions::default()
        };
        let err = load_one(&self_feeding(false), &registry, options, &sink).unwrap_err();
        assert!(matches!(err, LoadError::UnflaggedCycle { ref components, .. } if components == &[0]));
        load_one(&self_feeding(true), &registry, options, &sink).unwrap();
    }

    #[test]
    fn cycle_policy_allow_is_silent() {
        let registry = ChipRegistry::with_builtins();
        let sink = DiagnosticSink::new();
        let options = LoadOptions {
            unflagged_cycles: CyclePolicy::Allow,
            ..LoadOptions::default()
        };
        load_one(&self_feeding(false), &registry, options, &sink).unwrap();
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn options_from_config() {
        let mut config = Config::default();
        config.loader.strict = true;
        config.packaging.unflagged_cycles = CyclePolicy::Deny;
        let options = LoadOptions::from(&config);
        assert!(options.strict);
        assert_eq!(options.unflagged_cycles, CyclePolicy::Deny);
    }
}

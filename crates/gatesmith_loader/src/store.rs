//! The storage collaborator seam.
//!
//! The core does not own a file format. Storage implements [`ChipReader`]
//! and [`ChipWriter`]; [`MemoryStore`] keeps JSON text in memory and serves
//! both as a reference implementation and a test double.

use std::collections::BTreeMap;

use gatesmith_circuit::{ChipDefinition, Circuit, WireLayout};
use gatesmith_diagnostics::DiagnosticSink;

use crate::codes;
use crate::error::LoadError;
use crate::loader::{load_all, LoadOptions, LoadReport};
use crate::registry::ChipRegistry;

/// One saved chip as read from storage.
///
/// Decoding happens per record, so one corrupt record does not hide the rest.
#[derive(Debug)]
pub struct StoredChip {
    /// The key the record was stored under.
    pub name: String,
    /// The decoded definition, or why it could not be decoded.
    pub definition: Result<ChipDefinition, LoadError>,
}

/// Supplies saved chips and wire layouts.
pub trait ChipReader {
    /// Every saved chip record, in any order.
    ///
    /// An `Err` means storage could not be read at all; per-record decoding
    /// failures are reported inside each [`StoredChip`].
    fn read_chips(&self) -> Result<Vec<StoredChip>, LoadError>;

    /// The saved wire layout of the named chip, if one exists.
    fn read_wire_layout(&self, name: &str) -> Result<Option<WireLayout>, LoadError>;
}

/// Accepts packaged chips and wire layouts for persistence.
pub trait ChipWriter {
    /// Stores a chip definition, replacing any previous one with the same name.
    fn write_chip(&mut self, definition: &ChipDefinition) -> Result<(), LoadError>;

    /// Stores the wire layout of the named chip.
    fn write_wire_layout(&mut self, name: &str, layout: &WireLayout) -> Result<(), LoadError>;
}

/// In-memory store holding JSON-encoded definitions and layouts by name.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    chips: BTreeMap<String, String>,
    layouts: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores raw JSON for a chip, bypassing encoding.
    pub fn insert_raw(&mut self, name: impl Into<String>, json: impl Into<String>) {
        self.chips.insert(name.into(), json.into());
    }

    /// The stored JSON for a chip.
    pub fn chip_json(&self, name: &str) -> Option<&str> {
        self.chips.get(name).map(String::as_str)
    }

    /// Number of stored chips.
    pub fn len(&self) -> usize {
        self.chips.len()
    }

    /// Returns `true` if no chips are stored.
    pub fn is_empty(&self) -> bool {
        self.chips.is_empty()
    }
}

impl ChipReader for MemoryStore {
    fn read_chips(&self) -> Result<Vec<StoredChip>, LoadError> {
        Ok(self
            .chips
            .iter()
            .map(|(name, json)| StoredChip {
                name: name.clone(),
                definition: serde_json::from_str::<ChipDefinition>(json).map_err(|source| {
                    LoadError::Undecodable {
                        chip: name.clone(),
                        source,
                    }
                }),
            })
            .collect())
    }

    fn read_wire_layout(&self, name: &str) -> Result<Option<WireLayout>, LoadError> {
        self.layouts
            .get(name)
            .map(|json| serde_json::from_str::<WireLayout>(json))
            .transpose()
            .map_err(LoadError::from)
    }
}

impl ChipWriter for MemoryStore {
    fn write_chip(&mut self, definition: &ChipDefinition) -> Result<(), LoadError> {
        let json = serde_json::to_string_pretty(definition)?;
        self.chips.insert(definition.name.clone(), json);
        Ok(())
    }

    fn write_wire_layout(&mut self, name: &str, layout: &WireLayout) -> Result<(), LoadError> {
        let json = serde_json::to_string_pretty(layout)?;
        self.layouts.insert(name.to_string(), json);
        Ok(())
    }
}

/// Reads every saved chip and loads it into `registry`.
///
/// Records that fail to decode are emitted to `sink` as `E106` and listed in
/// the report; the remaining chips still load unless `options.strict` is set,
/// in which case the first undecodable record is returned before anything
/// is loaded.
pub fn load_from_reader(
    reader: &impl ChipReader,
    registry: &mut ChipRegistry,
    options: LoadOptions,
    sink: &DiagnosticSink,
) -> Result<LoadReport, LoadError> {
    let records = reader.read_chips()?;
    log::debug!("read {} chip records", records.len());

    let mut definitions = Vec::with_capacity(records.len());
    let mut undecodable = Vec::new();
    for record in records {
        match record.definition {
            Ok(def) => definitions.push(def),
            Err(err) => {
                log::warn!("skipping saved chip `{}`: {err}", record.name);
                sink.emit(codes::error_diagnostic(&err));
                if options.strict {
                    return Err(err);
                }
                undecodable.push((record.name, err));
            }
        }
    }

    let mut report = load_all(&definitions, registry, options, sink)?;
    undecodable.append(&mut report.failed);
    report.failed = undecodable;
    Ok(report)
}

/// Opens a registered chip for editing, restoring its saved wire anchors.
///
/// Returns `None` if `name` is not a registered custom chip.
pub fn open_saved(
    reader: &impl ChipReader,
    registry: &ChipRegistry,
    name: &str,
) -> Result<Option<Circuit>, LoadError> {
    let Some(mut circuit) = registry.open_for_editing(name) else {
        return Ok(None);
    };
    if let Some(layout) = reader.read_wire_layout(name)? {
        circuit.apply_wire_layout(&layout)?;
    }
    Ok(Some(circuit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::package_circuit;
    use gatesmith_circuit::{ChipTemplate, Primitive};
    use gatesmith_common::{Colour, Point};

    fn inverter() -> Circuit {
        let mut c = Circuit::new();
        let a = c.add_input("A");
        let n = c.add_chip(&ChipTemplate::BuiltIn(Primitive::Not));
        let y = c.add_output("Y");
        let (a_out, n_in) = (c.output_pin(a, 0).unwrap(), c.input_pin(n, 0).unwrap());
        let (n_out, y_in) = (c.output_pin(n, 0).unwrap(), c.input_pin(y, 0).unwrap());
        c.connect(a_out, n_in).unwrap();
        c.connect(n_out, y_in).unwrap();
        c.set_wire_anchors(y_in, vec![Point::new(5.0, 5.0)]);
        c
    }

    #[test]
    fn write_then_load_into_fresh_registry() {
        let sink = DiagnosticSink::new();
        let mut registry = ChipRegistry::with_builtins();
        let circuit = inverter();
        let def = package_circuit(
            &circuit,
            "INV",
            Colour::WHITE,
            Colour::BLACK,
            &mut registry,
            LoadOptions::default(),
            &sink,
        )
        .unwrap();
        let mut store = MemoryStore::new();
        store.write_chip(&def).unwrap();
        store.write_wire_layout("INV", &circuit.wire_layout()).unwrap();
        assert!(store.chip_json("INV").unwrap().contains("\"creationIndex\""));

        let mut fresh = ChipRegistry::with_builtins();
        let report = load_from_reader(&store, &mut fresh, LoadOptions::default(), &sink).unwrap();
        assert_eq!(report.loaded, vec!["INV"]);

        let opened = open_saved(&store, &fresh, "INV").unwrap().unwrap();
        let y_in = opened.input_pin(opened.chip_at(2).unwrap(), 0).unwrap();
        assert_eq!(opened.wire_anchors(y_in), &[Point::new(5.0, 5.0)]);
        assert!(open_saved(&store, &fresh, "NOT").unwrap().is_none());
    }

    fn store_with_corrupt_record() -> MemoryStore {
        let sink = DiagnosticSink::new();
        let mut scratch = ChipRegistry::with_builtins();
        let def = package_circuit(
            &inverter(),
            "GOOD",
            Colour::WHITE,
            Colour::BLACK,
            &mut scratch,
            LoadOptions::default(),
            &sink,
        )
        .unwrap();
        let mut store = MemoryStore::new();
        store.write_chip(&def).unwrap();
        store.insert_raw("BROKEN", "{ not json");
        store
    }

    #[test]
    fn corrupt_record_does_not_block_the_rest() {
        let store = store_with_corrupt_record();
        let mut registry = ChipRegistry::with_builtins();
        let sink = DiagnosticSink::new();
        let report = load_from_reader(&store, &mut registry, LoadOptions::default(), &sink).unwrap();

        assert_eq!(report.loaded, vec!["GOOD"]);
        assert!(registry.contains("GOOD"));
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "BROKEN");
        assert!(matches!(report.failed[0].1, LoadError::Undecodable { .. }));

        assert_eq!(sink.diagnostics().len(), 1);
        let broken = sink.for_subject("BROKEN");
        assert_eq!(broken.len(), 1);
        assert_eq!(broken[0].code, codes::E106);
    }

    #[test]
    fn strict_load_stops_at_corrupt_record() {
        let store = store_with_corrupt_record();
        let mut registry = ChipRegistry::with_builtins();
        let sink = DiagnosticSink::new();
        let options = LoadOptions {
            strict: true,
            ..LoadOptions::default()
        };
        let err = load_from_reader(&store, &mut registry, options, &sink).unwrap_err();
        assert!(matches!(err, LoadError::Undecodable { ref chip, .. } if chip == "BROKEN"));
        assert!(!registry.contains("GOOD"));
        assert_eq!(sink.error_count(), 1);
    }

    #[test]
    fn missing_layout_is_none() {
        let store = MemoryStore::new();
        assert!(store.read_wire_layout("X").unwrap().is_none());
        assert!(store.is_empty());
    }
}

//! Reference circuits and helpers for gatesmith conformance tests.
//!
//! Builds the small circuits the integration tests share (a two-NOT buffer,
//! a cross-coupled NOR latch and a half adder) and computes truth tables so
//! tests can compare a circuit with the chip packaged from it.

#![warn(missing_docs)]

use gatesmith_circuit::{ChipDefinition, ChipId, ChipTemplate, Circuit, CircuitError, Connection, Primitive};
use gatesmith_common::{Colour, Logic};
use gatesmith_config::DEFAULT_MAX_DEPTH;
use gatesmith_diagnostics::DiagnosticSink;
use gatesmith_loader::{package_circuit, ChipRegistry, LoadError, LoadOptions};

/// One row of a truth table: input values and the resulting output values.
pub type TruthRow = (Vec<Logic>, Vec<Logic>);

/// Connects output `out` of `from` to input `input` of `to`.
pub fn wire(c: &mut Circuit, from: ChipId, out: usize, to: ChipId, input: usize) -> Result<Connection, CircuitError> {
    let source = c.output_pin(from, out)?;
    let destination = c.input_pin(to, input)?;
    c.connect(source, destination)
}

/// Places a built-in gate.
pub fn gate(c: &mut Circuit, p: Primitive) -> ChipId {
    c.add_chip(&ChipTemplate::BuiltIn(p))
}

/// `A -> NOT -> NOT -> Y`: observably a plain wire.
pub fn buffer_circuit() -> Result<Circuit, CircuitError> {
    let mut c = Circuit::new();
    let a = c.add_input("A");
    let n1 = gate(&mut c, Primitive::Not);
    let n2 = gate(&mut c, Primitive::Not);
    let y = c.add_output("Y");
    wire(&mut c, a, 0, n1, 0)?;
    wire(&mut c, n1, 0, n2, 0)?;
    wire(&mut c, n2, 0, y, 0)?;
    Ok(c)
}

/// Handles into an [`sr_latch_circuit`].
#[derive(Debug, Clone, Copy)]
pub struct Latch {
    /// NOR producing `Q` from `R` and the `Q'` feedback.
    pub q_gate: ChipId,
    /// NOR producing `Q'` from `S` and the `Q` feedback.
    pub q_bar_gate: ChipId,
}

/// Cross-coupled NOR latch with inputs `S`, `R` and outputs `Q`, `Q'`.
///
/// With `flag_feedback` the `Q'` feedback input of the `Q` gate is marked
/// cyclic, which is what makes the latch simulate. Without it the loop
/// recurses until the depth guard trips.
pub fn sr_latch_circuit(flag_feedback: bool) -> Result<(Circuit, Latch), CircuitError> {
    let mut c = Circuit::new();
    let s = c.add_input("S");
    let r = c.add_input("R");
    let q_gate = gate(&mut c, Primitive::Nor);
    let q_bar_gate = gate(&mut c, Primitive::Nor);
    let q = c.add_output("Q");
    let q_bar = c.add_output("Q'");
    wire(&mut c, r, 0, q_gate, 0)?;
    wire(&mut c, s, 0, q_bar_gate, 0)?;
    wire(&mut c, q_bar_gate, 0, q_gate, 1)?;
    wire(&mut c, q_gate, 0, q_bar_gate, 1)?;
    wire(&mut c, q_gate, 0, q, 0)?;
    wire(&mut c, q_bar_gate, 0, q_bar, 0)?;
    if flag_feedback {
        let feedback = c.input_pin(q_gate, 1)?;
        c.set_cyclic(feedback, true)?;
    }
    Ok((c, Latch { q_gate, q_bar_gate }))
}

/// Half adder: `Sum = A xor B`, `Carry = A and B`.
pub fn half_adder_circuit() -> Result<Circuit, CircuitError> {
    let mut c = Circuit::new();
    let a = c.add_input("A");
    let b = c.add_input("B");
    let xor = gate(&mut c, Primitive::Xor);
    let and = gate(&mut c, Primitive::And);
    let sum = c.add_output("Sum");
    let carry = c.add_output("Carry");
    for g in [xor, and] {
        wire(&mut c, a, 0, g, 0)?;
        wire(&mut c, b, 0, g, 1)?;
    }
    wire(&mut c, xor, 0, sum, 0)?;
    wire(&mut c, and, 0, carry, 0)?;
    Ok(c)
}

/// All input combinations of `width` bits, first input most significant.
pub fn input_combinations(width: usize) -> Vec<Vec<Logic>> {
    (0..1u32 << width)
        .map(|row| {
            (0..width)
                .map(|bit| Logic::from_bool(row >> (width - 1 - bit) & 1 == 1))
                .collect()
        })
        .collect()
}

/// Evaluates `c` for every input combination.
pub fn truth_table(c: &mut Circuit) -> Result<Vec<TruthRow>, CircuitError> {
    input_combinations(c.input_chips().len())
        .into_iter()
        .map(|inputs| {
            let outputs = c.evaluate(&inputs, DEFAULT_MAX_DEPTH)?;
            Ok((inputs, outputs))
        })
        .collect()
}

/// Places one instance of `template` between fresh `SIGNAL IN`/`SIGNAL OUT`
/// proxies so it can be evaluated on its own.
pub fn harness(template: &ChipTemplate) -> Result<Circuit, CircuitError> {
    let mut c = Circuit::new();
    let ins: Vec<ChipId> = template.input_names().iter().map(|n| c.add_input(n)).collect();
    let chip = c.add_chip(template);
    let outs: Vec<ChipId> = template.output_names().iter().map(|n| c.add_output(n)).collect();
    for (i, &proxy) in ins.iter().enumerate() {
        wire(&mut c, proxy, 0, chip, i)?;
    }
    for (i, &proxy) in outs.iter().enumerate() {
        wire(&mut c, chip, i, proxy, 0)?;
    }
    Ok(c)
}

/// Packages `circuit` under `name` with default options and colours.
pub fn package(registry: &mut ChipRegistry, circuit: &Circuit, name: &str) -> Result<ChipDefinition, LoadError> {
    let sink = DiagnosticSink::new();
    package_circuit(
        circuit,
        name,
        Colour::rgb(0.3, 0.3, 0.3),
        Colour::WHITE,
        registry,
        LoadOptions::default(),
        &sink,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combinations_are_ordered() {
        let rows = input_combinations(2);
        let bits: Vec<Vec<u8>> = rows.iter().map(|r| r.iter().map(|&l| u8::from(l)).collect()).collect();
        assert_eq!(bits, vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]);
        assert_eq!(input_combinations(0), vec![Vec::<Logic>::new()]);
    }

    #[test]
    fn half_adder_table() {
        let mut c = half_adder_circuit().unwrap();
        let outputs: Vec<Vec<Logic>> = truth_table(&mut c).unwrap().into_iter().map(|(_, o)| o).collect();
        use Logic::{One, Zero};
        assert_eq!(
            outputs,
            vec![vec![Zero, Zero], vec![One, Zero], vec![One, Zero], vec![Zero, One]]
        );
    }
}

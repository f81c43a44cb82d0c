//! Pin and chip propagation behaviour: exact instantaneous propagation,
//! single-driver inputs, gate truth tables, composition transparency and the
//! cyclic-pin contract.

use gatesmith_circuit::{ChipTemplate, Circuit, CircuitError, Depth, PinKind, Primitive};
use gatesmith_common::Logic::{self, One, Zero};
use gatesmith_conformance::{buffer_circuit, gate, harness, package, sr_latch_circuit, truth_table, wire};
use gatesmith_loader::ChipRegistry;

const MAX: usize = 1000;

#[test]
fn every_output_input_pair_propagates_exactly() {
    let mut c = Circuit::new();
    let chips: Vec<_> = [Primitive::Not, Primitive::And, Primitive::Xor, Primitive::SignalOut]
        .into_iter()
        .map(|p| gate(&mut c, p))
        .collect();
    let src = c.add_input("A");
    let source = c.output_pin(src, 0).unwrap();

    let inputs: Vec<_> = chips
        .iter()
        .flat_map(|&chip| c.chip(chip).unwrap().inputs().to_vec())
        .collect();
    for destination in inputs {
        c.connect(source, destination).unwrap();
        for value in [One, Zero, One] {
            c.receive_signal(source, value, Depth::root(MAX)).unwrap();
            assert_eq!(c.pin(destination).unwrap().state(), c.pin(source).unwrap().state());
        }
    }
}

#[test]
fn reconnecting_an_input_leaves_exactly_one_driver() {
    let mut c = Circuit::new();
    let a = c.add_input("A");
    let b = c.add_input("B");
    let n = gate(&mut c, Primitive::Not);
    wire(&mut c, a, 0, n, 0).unwrap();
    let conn = wire(&mut c, b, 0, n, 0).unwrap();

    let a_out = c.output_pin(a, 0).unwrap();
    let b_out = c.output_pin(b, 0).unwrap();
    let n_in = c.input_pin(n, 0).unwrap();
    assert_eq!(conn.superseded, Some(a_out));
    assert_eq!(c.pin(n_in).unwrap().parent(), Some(b_out));
    assert!(!c.pin(a_out).unwrap().children().contains(&n_in));
    assert_eq!(c.pin(b_out).unwrap().children(), &[n_in]);

    // The old driver no longer reaches the input.
    c.receive_signal(a_out, One, Depth::root(MAX)).unwrap();
    assert_eq!(c.pin(n_in).unwrap().state(), Zero);
}

#[test]
fn same_kind_connections_are_refused() {
    let mut c = Circuit::new();
    let n1 = gate(&mut c, Primitive::Not);
    let n2 = gate(&mut c, Primitive::Not);
    let err = wire(&mut c, n1, 0, n2, 0).and_then(|_| {
        let a = c.output_pin(n1, 0)?;
        let b = c.output_pin(n2, 0)?;
        c.connect(a, b)
    });
    assert!(matches!(err, Err(CircuitError::InvalidConnection { .. })));
}

#[test]
fn not_chip_inverts_and_nothing_else() {
    let mut c = harness(&ChipTemplate::BuiltIn(Primitive::Not)).unwrap();
    let table = truth_table(&mut c).unwrap();
    assert_eq!(table, vec![(vec![Zero], vec![One]), (vec![One], vec![Zero])]);
    let not = c.chip_at(1).unwrap();
    assert_eq!(c.chip(not).unwrap().evaluations(), 1);
}

#[test]
fn two_nots_packaged_behave_like_a_wire() {
    let mut registry = ChipRegistry::with_builtins();
    package(&mut registry, &buffer_circuit().unwrap(), "BUFFER").unwrap();
    let template = registry.get("BUFFER").unwrap().clone();
    let mut c = harness(&template).unwrap();
    for value in [Zero, One] {
        assert_eq!(c.evaluate(&[value], MAX).unwrap(), vec![value]);
    }
}

#[test]
fn cyclic_pin_does_not_recompute_but_plain_pin_does() {
    let (mut c, latch) = sr_latch_circuit(true).unwrap();
    let cyclic = c.input_pin(latch.q_gate, 1).unwrap();
    let plain = c.input_pin(latch.q_bar_gate, 1).unwrap();
    assert!(c.pin(cyclic).unwrap().is_cyclic());
    assert!(!c.pin(plain).unwrap().is_cyclic());

    c.receive_signal(cyclic, One, Depth::root(MAX)).unwrap();
    assert_eq!(c.chip(latch.q_gate).unwrap().evaluations(), 0);
    assert_eq!(c.pin(cyclic).unwrap().state(), One);

    c.receive_signal(plain, One, Depth::root(MAX)).unwrap();
    assert_eq!(c.chip(latch.q_bar_gate).unwrap().evaluations(), 1);
}

#[test]
fn unflagged_latch_trips_the_depth_guard() {
    let (mut c, _) = sr_latch_circuit(false).unwrap();
    let err = c.evaluate(&[One, Zero], 200).unwrap_err();
    assert!(matches!(err, CircuitError::UnboundedRecursion { max_depth: 200, .. }));
}

#[test]
fn missing_pins_are_reported_not_panicked() {
    let c = buffer_circuit().unwrap();
    let n = c.chip_at(1).unwrap();
    let err = c.input_pin(n, 4).unwrap_err();
    assert_eq!(
        err,
        CircuitError::NoSuchPin {
            chip: n,
            kind: PinKind::ChipInput,
            index: 4
        }
    );
}

#[test]
fn outputs_fan_out_in_connection_order() {
    let mut c = Circuit::new();
    let a = c.add_input("A");
    let outs: Vec<_> = (0..3).map(|i| c.add_output(&format!("Y{i}"))).collect();
    for &y in outs.iter().rev() {
        wire(&mut c, a, 0, y, 0).unwrap();
    }
    let source = c.output_pin(a, 0).unwrap();
    let order: Vec<_> = c
        .pin(source)
        .unwrap()
        .children()
        .iter()
        .map(|&p| c.pin(p).unwrap().chip())
        .collect();
    let expected: Vec<_> = outs.iter().rev().copied().collect();
    assert_eq!(order, expected);
    assert_eq!(c.evaluate(&[One], MAX).unwrap(), vec![One; 3]);
}

#[test]
fn logic_values_are_binary() {
    let values: Vec<u8> = [Zero, One].into_iter().map(u8::from).collect();
    assert_eq!(values, vec![0, 1]);
    assert_eq!(!Logic::Zero, Logic::One);
}

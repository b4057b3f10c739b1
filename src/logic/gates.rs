//! Gate truth functions.

use crate::components::{LogicKind, LogicValue};

/// Evaluate one component from its input values.
///
/// Undefined inputs are dropped before folding rather than propagated: an
/// unconnected input counts as absent, not unknown. A two-input AND with one
/// input at 0 and the other undefined is therefore 0, and with one input at 1
/// and the other undefined it is 1. Only when no input is defined at all is
/// the result undefined (fixed inputs excepted).
pub fn evaluate_gate(kind: LogicKind, inputs: &[LogicValue]) -> LogicValue {
    let defined: Vec<bool> = inputs.iter().filter_map(LogicValue::as_bool).collect();

    match kind {
        LogicKind::Input0 => LogicValue::Low,
        LogicKind::Input1 => LogicValue::High,
        _ if defined.is_empty() => LogicValue::Undefined,
        LogicKind::Wire | LogicKind::Output => LogicValue::from_bool(defined[0]),
        LogicKind::Not => LogicValue::from_bool(!defined[0]),
        LogicKind::And => LogicValue::from_bool(all(&defined)),
        LogicKind::Or => LogicValue::from_bool(any(&defined)),
        LogicKind::Nand => LogicValue::from_bool(!all(&defined)),
        LogicKind::Nor => LogicValue::from_bool(!any(&defined)),
        LogicKind::Xor => LogicValue::from_bool(parity(&defined)),
        LogicKind::Xnor => LogicValue::from_bool(!parity(&defined)),
    }
}

fn all(values: &[bool]) -> bool {
    values.iter().all(|&v| v)
}

fn any(values: &[bool]) -> bool {
    values.iter().any(|&v| v)
}

fn parity(values: &[bool]) -> bool {
    values.iter().fold(false, |acc, &v| acc ^ v)
}

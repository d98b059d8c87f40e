//! QASM emitter for serializing circuits.

use std::collections::BTreeMap;

use treenet_ir::{Circuit, ClbitId, Instruction, InstructionKind, ParameterExpression, QubitId};

use crate::error::{EmitError, EmitResult};

/// Emit a circuit as QASM3 source code.
///
/// Free parameters become `input` declarations. Symbols of the form
/// `name[i]` are grouped into one `input array[float[64], n] name;`.
pub fn emit(circuit: &Circuit) -> EmitResult<String> {
    Emitter::new(Dialect::Qasm3).emit_circuit(circuit)
}

/// Emit a circuit as QASM 2.0 source code.
///
/// QASM 2.0 cannot declare free parameters, so every parameter must be
/// bound first; otherwise this returns [`EmitError::UnboundParameter`].
pub fn emit_qasm2(circuit: &Circuit) -> EmitResult<String> {
    Emitter::new(Dialect::Qasm2).emit_circuit(circuit)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dialect {
    Qasm3,
    Qasm2,
}

/// Declared shape of a free parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Scalar,
    Array(usize),
}

struct Emitter {
    dialect: Dialect,
    output: String,
    current_label: Option<String>,
}

impl Emitter {
    fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            output: String::new(),
            current_label: None,
        }
    }

    fn emit_circuit(mut self, circuit: &Circuit) -> EmitResult<String> {
        let parameters = circuit.parameters();

        match self.dialect {
            Dialect::Qasm3 => {
                self.writeln("OPENQASM 3.0;");
                self.writeln("include \"stdgates.inc\";");
            }
            Dialect::Qasm2 => {
                if let Some(name) = parameters.first() {
                    return Err(EmitError::UnboundParameter(name.clone()));
                }
                self.writeln("OPENQASM 2.0;");
                self.writeln("include \"qelib1.inc\";");
            }
        }
        self.writeln("");

        if !parameters.is_empty() {
            for (name, input) in group_inputs(parameters.iter().map(String::as_str)) {
                match input {
                    Input::Scalar => self.writeln(&format!("input float[64] {name};")),
                    Input::Array(len) => {
                        self.writeln(&format!("input array[float[64], {len}] {name};"));
                    }
                }
            }
            self.writeln("");
        }

        let num_qubits = circuit.num_qubits();
        let num_clbits = circuit.num_clbits();
        match self.dialect {
            Dialect::Qasm3 => {
                if num_qubits > 0 {
                    self.writeln(&format!("qubit[{num_qubits}] q;"));
                }
                if num_clbits > 0 {
                    self.writeln(&format!("bit[{num_clbits}] c;"));
                }
            }
            Dialect::Qasm2 => {
                if num_qubits > 0 {
                    self.writeln(&format!("qreg q[{num_qubits}];"));
                }
                if num_clbits > 0 {
                    self.writeln(&format!("creg c[{num_clbits}];"));
                }
            }
        }
        if num_qubits > 0 || num_clbits > 0 {
            self.writeln("");
        }

        for instruction in circuit.instructions() {
            self.emit_instruction(instruction)?;
        }

        Ok(self.output)
    }

    fn emit_instruction(&mut self, instruction: &Instruction) -> EmitResult<()> {
        let qubits = emit_qubits(&instruction.qubits);
        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                if gate.label != self.current_label {
                    if let Some(label) = &gate.label {
                        self.writeln(&format!("// {label}"));
                    }
                    self.current_label.clone_from(&gate.label);
                }
                let name = gate.name();
                match gate.kind.parameter() {
                    Some(param) => {
                        self.writeln(&format!("{name}({}) {qubits};", emit_param(param)?));
                    }
                    None => self.writeln(&format!("{name} {qubits};")),
                }
            }

            InstructionKind::Measure => {
                self.current_label = None;
                for (q, c) in instruction.qubits.iter().zip(&instruction.clbits) {
                    self.emit_measure(*q, *c);
                }
            }

            InstructionKind::Barrier => {
                self.current_label = None;
                if qubits.is_empty() {
                    self.writeln("barrier;");
                } else {
                    self.writeln(&format!("barrier {qubits};"));
                }
            }
        }
        Ok(())
    }

    fn emit_measure(&mut self, qubit: QubitId, clbit: ClbitId) {
        match self.dialect {
            Dialect::Qasm3 => self.writeln(&format!("c[{}] = measure q[{}];", clbit.0, qubit.0)),
            Dialect::Qasm2 => self.writeln(&format!("measure q[{}] -> c[{}];", qubit.0, clbit.0)),
        }
    }

    fn writeln(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }
}

/// Group symbol names into input declarations. `name[i]` symbols share an
/// array sized by their largest index; anything else is a scalar.
fn group_inputs<'a>(names: impl Iterator<Item = &'a str>) -> BTreeMap<&'a str, Input> {
    let mut inputs = BTreeMap::new();
    for name in names {
        match split_indexed(name) {
            Some((base, index)) => {
                let entry = inputs.entry(base).or_insert(Input::Array(0));
                if let Input::Array(len) = entry {
                    *len = (*len).max(index + 1);
                }
            }
            None => {
                inputs.insert(name, Input::Scalar);
            }
        }
    }
    inputs
}

fn split_indexed(name: &str) -> Option<(&str, usize)> {
    let (base, rest) = name.split_once('[')?;
    let index = rest.strip_suffix(']')?.parse().ok()?;
    Some((base, index))
}

fn emit_param(param: &ParameterExpression) -> EmitResult<String> {
    Ok(match param {
        ParameterExpression::Constant(v) => emit_constant(*v)?,
        ParameterExpression::Symbol(name) => name.clone(),
        ParameterExpression::Neg(e) => format!("-({})", emit_param(e)?),
        ParameterExpression::Add(a, b) => format!("({} + {})", emit_param(a)?, emit_param(b)?),
        ParameterExpression::Mul(a, b) => format!("({} * {})", emit_param(a)?, emit_param(b)?),
    })
}

fn emit_constant(v: f64) -> EmitResult<String> {
    if !v.is_finite() {
        return Err(EmitError::NonFiniteAngle(v));
    }
    const TOLERANCE: f64 = 1e-12;
    let pi = std::f64::consts::PI;
    for (value, text) in [
        (pi, "pi"),
        (pi / 2.0, "pi/2"),
        (pi / 4.0, "pi/4"),
        (-pi, "-pi"),
        (-pi / 2.0, "-pi/2"),
        (-pi / 4.0, "-pi/4"),
    ] {
        if (v - value).abs() < TOLERANCE {
            return Ok(text.into());
        }
    }
    // Debug formatting is the shortest round-trip form and always carries a
    // decimal point or exponent.
    Ok(format!("{v:?}"))
}

fn emit_qubits(qubits: &[QubitId]) -> String {
    qubits
        .iter()
        .map(|q| format!("q[{}]", q.0))
        .collect::<Vec<_>>()
        .join(", ")
}

//! Rotation-angle parameters.
//!
//! Trainable circuits carry [`ParameterExpression::Symbol`] angles that are
//! bound to numbers later; data-embedding circuits carry literal angles.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A symbolic or concrete rotation angle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParameterExpression {
    /// A literal angle.
    Constant(f64),
    /// A named trainable angle.
    Symbol(String),
    /// Negation.
    Neg(Box<ParameterExpression>),
    /// Addition.
    Add(Box<ParameterExpression>, Box<ParameterExpression>),
    /// Multiplication.
    Mul(Box<ParameterExpression>, Box<ParameterExpression>),
}

impl ParameterExpression {
    /// Create a literal angle.
    pub fn constant(value: f64) -> Self {
        ParameterExpression::Constant(value)
    }

    /// Create a named angle.
    pub fn symbol(name: impl Into<String>) -> Self {
        ParameterExpression::Symbol(name.into())
    }

    /// Check if this expression contains any symbols.
    pub fn is_symbolic(&self) -> bool {
        match self {
            ParameterExpression::Symbol(_) => true,
            ParameterExpression::Constant(_) => false,
            ParameterExpression::Neg(e) => e.is_symbolic(),
            ParameterExpression::Add(a, b) | ParameterExpression::Mul(a, b) => {
                a.is_symbolic() || b.is_symbolic()
            }
        }
    }

    /// Try to evaluate as a concrete value.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParameterExpression::Constant(v) => Some(*v),
            ParameterExpression::Symbol(_) => None,
            ParameterExpression::Neg(e) => e.as_f64().map(|v| -v),
            ParameterExpression::Add(a, b) => Some(a.as_f64()? + b.as_f64()?),
            ParameterExpression::Mul(a, b) => Some(a.as_f64()? * b.as_f64()?),
        }
    }

    /// All symbol names in this expression, sorted.
    pub fn symbols(&self) -> BTreeSet<String> {
        let mut set = BTreeSet::new();
        self.collect_symbols(&mut set);
        set
    }

    pub(crate) fn collect_symbols(&self, set: &mut BTreeSet<String>) {
        match self {
            ParameterExpression::Constant(_) => {}
            ParameterExpression::Symbol(name) => {
                set.insert(name.clone());
            }
            ParameterExpression::Neg(e) => e.collect_symbols(set),
            ParameterExpression::Add(a, b) | ParameterExpression::Mul(a, b) => {
                a.collect_symbols(set);
                b.collect_symbols(set);
            }
        }
    }

    /// Bind a single symbol to a value, returning a new expression.
    pub fn bind(&self, name: &str, value: f64) -> Self {
        match self {
            ParameterExpression::Symbol(n) if n == name => ParameterExpression::Constant(value),
            ParameterExpression::Constant(_) | ParameterExpression::Symbol(_) => self.clone(),
            ParameterExpression::Neg(e) => ParameterExpression::Neg(Box::new(e.bind(name, value))),
            ParameterExpression::Add(a, b) => ParameterExpression::Add(
                Box::new(a.bind(name, value)),
                Box::new(b.bind(name, value)),
            ),
            ParameterExpression::Mul(a, b) => ParameterExpression::Mul(
                Box::new(a.bind(name, value)),
                Box::new(b.bind(name, value)),
            ),
        }
    }

    /// Bind every symbol found in `values`, folding fully bound
    /// subexpressions into constants.
    pub fn bind_all(&self, values: &FxHashMap<String, f64>) -> Self {
        let bound = match self {
            ParameterExpression::Symbol(n) => match values.get(n) {
                Some(v) => ParameterExpression::Constant(*v),
                None => self.clone(),
            },
            ParameterExpression::Constant(_) => self.clone(),
            ParameterExpression::Neg(e) => ParameterExpression::Neg(Box::new(e.bind_all(values))),
            ParameterExpression::Add(a, b) => ParameterExpression::Add(
                Box::new(a.bind_all(values)),
                Box::new(b.bind_all(values)),
            ),
            ParameterExpression::Mul(a, b) => ParameterExpression::Mul(
                Box::new(a.bind_all(values)),
                Box::new(b.bind_all(values)),
            ),
        };
        match bound.as_f64() {
            Some(v) => ParameterExpression::Constant(v),
            None => bound,
        }
    }
}

impl fmt::Display for ParameterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterExpression::Constant(v) => write!(f, "{v}"),
            ParameterExpression::Symbol(name) => write!(f, "{name}"),
            ParameterExpression::Neg(e) => write!(f, "-({e})"),
            ParameterExpression::Add(a, b) => write!(f, "({a} + {b})"),
            ParameterExpression::Mul(a, b) => write!(f, "({a} * {b})"),
        }
    }
}

impl From<f64> for ParameterExpression {
    fn from(value: f64) -> Self {
        ParameterExpression::Constant(value)
    }
}

impl std::ops::Add for ParameterExpression {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        ParameterExpression::Add(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Mul for ParameterExpression {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        ParameterExpression::Mul(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Neg for ParameterExpression {
    type Output = Self;

    fn neg(self) -> Self::Output {
        ParameterExpression::Neg(Box::new(self))
    }
}

/// A fixed-length, named family of symbols: `prefix[0]`, `prefix[1]`, ...
///
/// The vector itself is immutable; consumers walk it with a cursor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterVector {
    prefix: String,
    elements: Vec<ParameterExpression>,
}

impl ParameterVector {
    /// Create `len` symbols named `prefix[i]`.
    pub fn new(prefix: impl Into<String>, len: usize) -> Self {
        let prefix = prefix.into();
        let elements = (0..len)
            .map(|i| ParameterExpression::symbol(format!("{prefix}[{i}]")))
            .collect();
        Self { prefix, elements }
    }

    /// The shared name of the symbols.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the vector holds no symbols.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The symbols in order.
    pub fn as_slice(&self) -> &[ParameterExpression] {
        &self.elements
    }

    /// Symbol at `index`.
    pub fn get(&self, index: usize) -> Option<&ParameterExpression> {
        self.elements.get(index)
    }

    /// Symbol names in order.
    pub fn names(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.elements.len()).map(|i| format!("{}[{i}]", self.prefix))
    }
}

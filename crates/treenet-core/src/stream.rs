//! Consumable supply of trainable rotation angles.
//!
//! The stream is a cursor over an immutable [`ParameterVector`]. Every
//! consumer takes a prefix, which advances the cursor; nothing is ever put
//! back. A stream built for an `N`-qubit tree holds exactly `2N - 1`
//! symbols: two per pairwise block (`N - 1` blocks) and one for the final
//! rotation.

use treenet_ir::{ParameterExpression, ParameterVector};

use crate::error::{TtnError, TtnResult};

/// Number of parameters an `n_qubits` tree consumes.
///
/// Returns `None` for zero qubits, which has no valid tree.
pub fn required_parameters(n_qubits: u32) -> Option<usize> {
    (n_qubits >= 1).then(|| 2 * n_qubits as usize - 1)
}

/// Ordered, consumable parameter supply.
#[derive(Debug, Clone)]
pub struct ParameterStream {
    params: ParameterVector,
    cursor: usize,
}

impl ParameterStream {
    /// Wrap an arbitrary parameter vector.
    pub fn new(params: ParameterVector) -> Self {
        Self { params, cursor: 0 }
    }

    /// Stream sized for an `n_qubits` tree: `2 * n_qubits - 1` symbols
    /// named `prefix[i]`.
    pub fn for_qubits(n_qubits: u32, prefix: &str) -> TtnResult<Self> {
        let len = required_parameters(n_qubits).ok_or(TtnError::InvalidSize(n_qubits))?;
        Ok(Self::new(ParameterVector::new(prefix, len)))
    }

    /// Take the next `k` parameters.
    ///
    /// On failure the stream is left untouched.
    pub fn take(&mut self, k: usize) -> TtnResult<&[ParameterExpression]> {
        let remaining = self.remaining();
        if k > remaining {
            return Err(TtnError::ExhaustedStream {
                requested: k,
                remaining,
            });
        }
        let start = self.cursor;
        self.cursor += k;
        Ok(&self.params.as_slice()[start..self.cursor])
    }

    /// Take the next two parameters as owned values.
    pub fn take_pair(&mut self) -> TtnResult<(ParameterExpression, ParameterExpression)> {
        match self.take(2)? {
            [a, b] => Ok((a.clone(), b.clone())),
            taken => Err(TtnError::ExhaustedStream {
                requested: 2,
                remaining: taken.len(),
            }),
        }
    }

    /// Take the next parameter as an owned value.
    pub fn take_one(&mut self) -> TtnResult<ParameterExpression> {
        match self.take(1)? {
            [a] => Ok(a.clone()),
            taken => Err(TtnError::ExhaustedStream {
                requested: 1,
                remaining: taken.len(),
            }),
        }
    }

    /// Number of parameters not yet taken.
    pub fn remaining(&self) -> usize {
        self.params.len() - self.cursor
    }

    /// Number of parameters taken so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }

    /// Total size the stream was created with.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether the stream was created empty.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Whether every parameter has been taken.
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// The underlying parameter vector.
    pub fn vector(&self) -> &ParameterVector {
        &self.params
    }

    /// Give back the underlying parameter vector.
    pub fn into_vector(self) -> ParameterVector {
        self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sized_for_qubits() {
        for n in 1..=9 {
            let stream = ParameterStream::for_qubits(n, "theta").unwrap();
            assert_eq!(stream.len(), 2 * n as usize - 1);
            assert_eq!(stream.remaining(), stream.len());
        }
        assert_eq!(required_parameters(4), Some(7));
        assert_eq!(required_parameters(0), None);
    }

    #[test]
    fn test_zero_qubits_rejected() {
        assert!(matches!(
            ParameterStream::for_qubits(0, "theta"),
            Err(TtnError::InvalidSize(0))
        ));
    }

    #[test]
    fn test_take_advances_in_order() {
        let mut stream = ParameterStream::for_qubits(2, "theta").unwrap();
        let first = stream.take(2).unwrap().to_vec();
        assert_eq!(
            first,
            vec![
                ParameterExpression::symbol("theta[0]"),
                ParameterExpression::symbol("theta[1]"),
            ]
        );
        assert_eq!(stream.consumed(), 2);
        assert_eq!(stream.remaining(), 1);
        assert_eq!(
            stream.take_one().unwrap(),
            ParameterExpression::symbol("theta[2]")
        );
        assert!(stream.is_exhausted());
    }

    #[test]
    fn test_take_more_than_remaining() {
        let mut stream = ParameterStream::new(ParameterVector::new("theta", 2));
        assert!(matches!(
            stream.take(3),
            Err(TtnError::ExhaustedStream {
                requested: 3,
                remaining: 2
            })
        ));
        // A failed take leaves the cursor in place.
        assert_eq!(stream.remaining(), 2);
        assert!(stream.take_pair().is_ok());
        assert!(matches!(
            stream.take_one(),
            Err(TtnError::ExhaustedStream {
                requested: 1,
                remaining: 0
            })
        ));
    }

    #[test]
    fn test_take_zero_is_noop() {
        let mut stream = ParameterStream::for_qubits(1, "w").unwrap();
        assert!(stream.take(0).unwrap().is_empty());
        assert_eq!(stream.remaining(), 1);
    }
}

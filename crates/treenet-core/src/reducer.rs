//! Binary tree reduction over qubit indices.
//!
//! The reduction runs in two stages:
//!
//! 1. **Pair scan.** Walk the active qubits with stride 2. Each adjacent
//!    pair `(a, b)` gets a block and `b` is carried forward; a trailing odd
//!    qubit is carried forward with no block.
//! 2. **Representative chain.** Walk the carried-forward representatives in
//!    order, pairing the current one with the next. The next one (the
//!    pair's second member) becomes the current representative.
//!
//! The last representative is the output qubit. Every merge removes exactly
//! one qubit, so an `N`-qubit reduction builds `N - 1` blocks.
//!
//! ```text
//! N = 4:  [0 1 2 3] ──scan──▶ [1 3] ──chain──▶ [3]
//!         blocks (0,1) (2,3)         (1,3)
//! ```

use tracing::trace;
use treenet_ir::{QubitId, qubit_range};

use crate::block::PairwiseBlock;
use crate::error::{TtnError, TtnResult};
use crate::stream::ParameterStream;

/// Ordered qubits still eligible for pairing at one level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveQubitSet(Vec<QubitId>);

impl ActiveQubitSet {
    /// All qubits `0..n_qubits`.
    pub fn all(n_qubits: u32) -> Self {
        Self(qubit_range(n_qubits).collect())
    }

    /// An explicit ordered set.
    pub fn from_qubits(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self(qubits.into_iter().collect())
    }

    /// Number of active qubits.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no qubit is active.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The active qubits in order.
    pub fn as_slice(&self) -> &[QubitId] {
        &self.0
    }

    /// The sole qubit, if exactly one remains.
    pub fn single(&self) -> Option<QubitId> {
        match self.0.as_slice() {
            [q] => Some(*q),
            _ => None,
        }
    }

    /// One stride-2 pass: pair `(active[i], active[i+1])` for even `i`,
    /// carrying the second member forward; an unpaired trailing qubit is
    /// carried forward as is.
    pub fn pair_scan(
        &self,
        n_qubits: u32,
        stream: &mut ParameterStream,
    ) -> TtnResult<(Vec<PairwiseBlock>, ActiveQubitSet)> {
        let mut blocks = Vec::with_capacity(self.len() / 2);
        let mut next = Vec::with_capacity(self.len().div_ceil(2));

        let mut pairs = self.0.chunks_exact(2);
        for pair in &mut pairs {
            let (a, b) = (pair[0], pair[1]);
            trace!(control = a.0, target = b.0, stage = "scan", "building block");
            blocks.push(PairwiseBlock::build(a, b, n_qubits, stream)?);
            next.push(b);
        }
        if let [odd] = *pairs.remainder() {
            next.push(odd);
        }

        Ok((blocks, ActiveQubitSet(next)))
    }

    /// Pair consecutive representatives until one remains, returning the
    /// blocks and the surviving qubit. A single-qubit set survives as is.
    pub fn chain_reduce(
        &self,
        n_qubits: u32,
        stream: &mut ParameterStream,
    ) -> TtnResult<(Vec<PairwiseBlock>, QubitId)> {
        let Some((&first, rest)) = self.0.split_first() else {
            return Err(TtnError::InvalidSize(0));
        };

        let mut blocks = Vec::with_capacity(rest.len());
        let mut current = first;
        for &next in rest {
            trace!(control = current.0, target = next.0, stage = "chain", "building block");
            let block = PairwiseBlock::build(current, next, n_qubits, stream)?;
            current = block.winner();
            blocks.push(block);
        }

        Ok((blocks, current))
    }
}

/// Result of a full reduction.
#[derive(Debug, Clone, PartialEq)]
pub struct Reduction {
    /// Blocks in the order they were built.
    pub blocks: Vec<PairwiseBlock>,
    /// Active set at every level, starting with all qubits and ending with
    /// the output qubit alone.
    pub levels: Vec<ActiveQubitSet>,
    /// The qubit left standing.
    pub output: QubitId,
}

impl Reduction {
    /// Representatives `qubit` is merged into, in order, starting with
    /// `qubit` itself and ending at the output qubit.
    pub fn representative_path(&self, qubit: QubitId) -> Vec<QubitId> {
        let mut path = vec![qubit];
        let mut current = qubit;
        for block in &self.blocks {
            if block.control() == current {
                current = block.winner();
                path.push(current);
            }
        }
        path
    }
}

/// Drives the reduction for a fixed circuit width.
#[derive(Debug, Clone, Copy)]
pub struct TreeReducer {
    n_qubits: u32,
}

impl TreeReducer {
    /// Reducer over `n_qubits` qubits. Zero qubits is rejected.
    pub fn new(n_qubits: u32) -> TtnResult<Self> {
        if n_qubits == 0 {
            return Err(TtnError::InvalidSize(n_qubits));
        }
        Ok(Self { n_qubits })
    }

    /// Width of the circuit being reduced.
    pub fn n_qubits(&self) -> u32 {
        self.n_qubits
    }

    /// Reduce all qubits to one, taking two parameters per block from
    /// `stream`.
    pub fn reduce(&self, stream: &mut ParameterStream) -> TtnResult<Reduction> {
        let initial = ActiveQubitSet::all(self.n_qubits);
        let mut levels = vec![initial.clone()];
        let mut blocks = Vec::with_capacity(self.n_qubits as usize - 1);

        let mut active = initial;
        if active.len() > 1 {
            let (scan_blocks, representatives) = active.pair_scan(self.n_qubits, stream)?;
            blocks.extend(scan_blocks);
            levels.push(representatives.clone());
            active = representatives;
        }

        let (chain_blocks, output) = active.chain_reduce(self.n_qubits, stream)?;
        if !chain_blocks.is_empty() {
            levels.push(ActiveQubitSet(vec![output]));
        }
        blocks.extend(chain_blocks);

        Ok(Reduction {
            blocks,
            levels,
            output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(blocks: &[PairwiseBlock]) -> Vec<(u32, u32)> {
        blocks
            .iter()
            .map(|b| (b.control().0, b.target().0))
            .collect()
    }

    #[test]
    fn test_pair_scan_even() {
        let mut stream = ParameterStream::for_qubits(4, "theta").unwrap();
        let (blocks, next) = ActiveQubitSet::all(4).pair_scan(4, &mut stream).unwrap();
        assert_eq!(pairs(&blocks), vec![(0, 1), (2, 3)]);
        assert_eq!(next.as_slice(), &[QubitId(1), QubitId(3)]);
        assert_eq!(stream.consumed(), 4);
    }

    #[test]
    fn test_pair_scan_odd_carries_last() {
        let mut stream = ParameterStream::for_qubits(5, "theta").unwrap();
        let (blocks, next) = ActiveQubitSet::all(5).pair_scan(5, &mut stream).unwrap();
        assert_eq!(pairs(&blocks), vec![(0, 1), (2, 3)]);
        assert_eq!(next.as_slice(), &[QubitId(1), QubitId(3), QubitId(4)]);
    }

    #[test]
    fn test_chain_reduce() {
        let mut stream = ParameterStream::for_qubits(5, "theta").unwrap();
        let reps = ActiveQubitSet::from_qubits([QubitId(1), QubitId(3), QubitId(4)]);
        let (blocks, last) = reps.chain_reduce(5, &mut stream).unwrap();
        assert_eq!(pairs(&blocks), vec![(1, 3), (3, 4)]);
        assert_eq!(last, QubitId(4));
    }

    #[test]
    fn test_chain_reduce_empty_set() {
        let mut stream = ParameterStream::for_qubits(1, "theta").unwrap();
        let empty = ActiveQubitSet::from_qubits([]);
        assert!(matches!(
            empty.chain_reduce(1, &mut stream),
            Err(TtnError::InvalidSize(0))
        ));
    }

    #[test]
    fn test_reduce_four() {
        let mut stream = ParameterStream::for_qubits(4, "theta").unwrap();
        let reduction = TreeReducer::new(4).unwrap().reduce(&mut stream).unwrap();
        assert_eq!(pairs(&reduction.blocks), vec![(0, 1), (2, 3), (1, 3)]);
        assert_eq!(reduction.output, QubitId(3));
        assert_eq!(reduction.levels.len(), 3);
        assert_eq!(reduction.levels[1].as_slice(), &[QubitId(1), QubitId(3)]);
        assert_eq!(stream.remaining(), 1);
        assert_eq!(
            reduction.representative_path(QubitId(0)),
            vec![QubitId(0), QubitId(1), QubitId(3)]
        );
    }

    #[test]
    fn test_reduce_single_qubit() {
        let mut stream = ParameterStream::for_qubits(1, "theta").unwrap();
        let reduction = TreeReducer::new(1).unwrap().reduce(&mut stream).unwrap();
        assert!(reduction.blocks.is_empty());
        assert_eq!(reduction.output, QubitId(0));
        assert_eq!(reduction.levels, vec![ActiveQubitSet::all(1)]);
        assert_eq!(stream.remaining(), 1);
    }

    #[test]
    fn test_reduce_two_qubits() {
        let mut stream = ParameterStream::for_qubits(2, "theta").unwrap();
        let reduction = TreeReducer::new(2).unwrap().reduce(&mut stream).unwrap();
        assert_eq!(pairs(&reduction.blocks), vec![(0, 1)]);
        assert_eq!(reduction.output, QubitId(1));
        assert_eq!(reduction.levels.len(), 2);
    }

    #[test]
    fn test_reducer_rejects_zero() {
        assert!(matches!(TreeReducer::new(0), Err(TtnError::InvalidSize(0))));
    }

    #[test]
    fn test_reduce_short_stream() {
        let mut stream = ParameterStream::for_qubits(2, "theta").unwrap();
        let err = TreeReducer::new(4).unwrap().reduce(&mut stream).unwrap_err();
        assert!(matches!(err, TtnError::ExhaustedStream { requested: 2, .. }));
    }
}

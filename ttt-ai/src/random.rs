//! Uniform random move selection (Easy tier)

use protocol::Board;
use rand::seq::SliceRandom;
use rand::Rng;

/// Picks any empty cell with equal probability
pub struct RandomSelector;

impl RandomSelector {
    pub fn select<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<usize> {
        board.empty_cells().choose(rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protocol::Mark;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    #[test]
    fn test_only_empty_cells() {
        let board: Board = "XO_ _X_ O__".parse().unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut seen = HashSet::new();

        for _ in 0..200 {
            let index = RandomSelector::select(&board, &mut rng).unwrap();
            assert!(board.is_empty_cell(index));
            seen.insert(index);
        }

        assert_eq!(seen.len(), board.empty_cells().len());
    }

    #[test]
    fn test_single_empty_cell() {
        let board = Board::replay(&[0, 1, 2, 4, 3, 5, 7, 6]).unwrap();
        assert_eq!(board.get(8), None);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(RandomSelector::select(&board, &mut rng), Some(8));
    }

    #[test]
    fn test_full_board() {
        let board: Board = "XOX XOO OXX".parse().unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(RandomSelector::select(&board, &mut rng), None);
        assert_eq!(board.get(0), Some(Mark::X));
    }
}

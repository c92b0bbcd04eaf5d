//! Move enumeration under the simplified rules.
//!
//! Lists every move `ChessGame::attempt_move` would accept for the side to
//! move, and picks random ones for the `go` command and self-play.

use rand::Rng;

use crate::board::{all_positions, Position};
use crate::game::ChessGame;

/// A from/to pair.
pub type Move = (Position, Position);

/// Returns every move the side to move may make.
///
/// Empty once the game is over.
pub fn candidate_moves(game: &ChessGame) -> Vec<Move> {
    if game.is_game_over() {
        return Vec::new();
    }

    let board = game.board();
    let turn = game.current_turn();
    let mut moves = Vec::new();

    for (from, piece) in board.pieces() {
        if piece.color != turn {
            continue;
        }
        for to in all_positions() {
            match board.get(to) {
                Some(target) if target.color == turn => {}
                _ => moves.push((from, to)),
            }
        }
    }

    moves
}

/// Picks one accepted move uniformly at random.
pub fn random_move(game: &ChessGame, rng: &mut impl Rng) -> Option<Move> {
    let moves = candidate_moves(game);
    if moves.is_empty() {
        return None;
    }
    let idx = rng.gen_range(0..moves.len());
    Some(moves[idx])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Color, Piece, PieceKind};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn start_position_has_768_candidates() {
        let game = ChessGame::new();
        assert_eq!(candidate_moves(&game).len(), 16 * 48);
    }

    #[test]
    fn every_candidate_is_accepted() {
        let game = ChessGame::new();
        for (from, to) in candidate_moves(&game) {
            assert!(game.validate_move(from, to).is_ok(), "{} -> {}", from, to);
        }
    }

    #[test]
    fn lone_king_has_63_moves() {
        let mut board = Board::empty();
        board.place(Position::new(4, 4), Piece::new(PieceKind::King, Color::Black));
        let game = ChessGame::from_board(board, Color::Black);
        assert_eq!(candidate_moves(&game).len(), 63);
    }

    #[test]
    fn no_moves_without_own_pieces_or_after_game_over() {
        let mut board = Board::empty();
        board.place(Position::new(0, 0), Piece::new(PieceKind::Rook, Color::White));
        board.place(Position::new(7, 7), Piece::new(PieceKind::King, Color::Black));
        let mut game = ChessGame::from_board(board, Color::White);
        assert!(game.attempt_move(Position::new(0, 0), Position::new(7, 7)));
        assert!(candidate_moves(&game).is_empty());

        let empty = ChessGame::from_board(Board::empty(), Color::White);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(random_move(&empty, &mut rng), None);
    }

    #[test]
    fn random_move_is_deterministic_for_a_seed() {
        let game = ChessGame::new();
        let a = random_move(&game, &mut StdRng::seed_from_u64(42));
        let b = random_move(&game, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
        let (from, to) = a.unwrap();
        assert!(game.validate_move(from, to).is_ok());
    }
}

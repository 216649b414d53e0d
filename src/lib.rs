pub mod board;
pub mod game;
pub mod geometry;
#[cfg(feature = "cli")]
pub mod logger;
pub mod moves;
pub mod notation;
pub mod square;
pub mod status;

pub use board::{Board, Color, ColoredPiece, Piece};
pub use game::{Game, GameError, MoveResult};
pub use moves::{Move, MoveError, MoveKind, PromotionChoice};
pub use square::Square;
pub use status::GameStatus;

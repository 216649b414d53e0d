pub mod castle;
pub mod execute;
pub mod movegen;
pub mod perft;
pub mod square_control;
pub mod types;
pub mod validate;

pub use castle::{CastleError, can_castle};
pub use execute::{leaves_king_in_check, make_move};
pub use movegen::{generate_legal, generate_moves};
pub use square_control::{current_player_in_check, in_check, is_threatened_by, is_threatened_by_square};
pub use types::{Move, MoveBuffer, MoveKind, MoveList, PromotionChoice};
pub use validate::{MoveError, validate_move};

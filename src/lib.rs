//! slide-2048: a 4x4 sliding-tile merge puzzle engine.
//!
//! This crate provides:
//! - A `Board` type with pure helpers and whole-board shifts (`engine` module)
//! - A `GameSession` holding score, undo history and game-over state (`session` module)
//! - Best-score persistence behind the `BestScoreStore` trait (`store` module)
//! - Key and swipe translation for hosts (`input` module)
//!
//! Quick start:
//! ```
//! use slide_2048::engine::Direction;
//! use slide_2048::session::GameSession;
//! use slide_2048::store::MemoryBestScore;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // Deterministic session with a seeded RNG
//! let mut game = GameSession::with_rng(MemoryBestScore::default(), StdRng::seed_from_u64(42));
//! game.new_game();
//! let before = game.score();
//! let outcome = game.make_move(Direction::Left);
//! assert!(game.score() >= before);
//! if outcome.board_changed {
//!     assert!(game.undo());
//!     assert_eq!(game.score(), before);
//! }
//! ```
//!
//! The engine never renders, plays sounds or persists anything itself: hosts
//! consume [`session::MoveOutcome::events`] and the session's getters.
//!
pub mod config;
pub mod engine;
pub mod input;
pub mod session;
pub mod store;

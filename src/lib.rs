//! holdem-equity: Texas Hold'em hand evaluation and Monte-Carlo equity.
//!
//! Goals:
//! - Deterministic, fast evaluation of 5–7 card Hold'em hands
//! - Seeded, reproducible equity estimation against random opponents
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! ## Quick start: evaluate a hand
//! ```
//! use holdem_equity::cards::parse_cards;
//! use holdem_equity::evaluator::{evaluate, Category};
//!
//! let cards = parse_cards("As Ah Kc Qd Jh 3s 2c").unwrap();
//! let eval = evaluate(&cards).unwrap();
//! assert_eq!(eval.category, Category::Pair);
//! ```
//!
//! ## Quick start: estimate equity
//! ```
//! use holdem_equity::hand::{Board, HoleCards};
//! use holdem_equity::simulator::{estimate_equity_seeded, Snapshot};
//!
//! let hole: HoleCards = "As Ah".parse().unwrap();
//! let snapshot = Snapshot::new(hole, Board::default(), 1).unwrap();
//! let equity = estimate_equity_seeded(&snapshot, 2000, 42).unwrap();
//! assert!(equity.win_pct > 50.0);
//! ```

pub mod cards;
pub mod deck;
pub mod evaluator;
pub mod hand;
pub mod simulator;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

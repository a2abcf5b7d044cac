//! Kalah (six pits a side, four stones a pit) rules and a game-tree search
//! engine.
//!
//! `logic` owns the board and the sowing rules, `engine` the evaluators and
//! alpha-beta search, `arena` plays engines against each other and `worker`
//! runs searches off the calling thread.

pub mod arena;
pub mod engine;
pub mod logic;
pub mod worker;

//! Plain-text rendering for the terminal driver.

pub mod board;
pub mod panels;

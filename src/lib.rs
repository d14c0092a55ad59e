//! A terminal stopwatch with a persisted leaderboard.
//!
//! The user starts and stops the stopwatch, and can then accept the time,
//! which submits it to the leaderboard under their username, or decline it.
//! After accepting, the user's rank among all submissions is displayed.

pub mod action;
pub mod clock;
pub mod config;
pub mod controller;
pub mod database;
pub mod session;
pub mod timer;
pub mod view;

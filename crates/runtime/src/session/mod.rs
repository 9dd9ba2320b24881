//! Session Manager: one live encounter per player.

mod entry;
mod manager;

pub use manager::{RngFactory, SessionManager};

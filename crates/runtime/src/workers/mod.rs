//! Worker tasks that back the runtime orchestration.

mod sweeper;

pub use sweeper::SweeperWorker;

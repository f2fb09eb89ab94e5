pub mod broadcast_monitor;
pub mod scheduler;

pub use broadcast_monitor::BroadcastMonitor;
pub use scheduler::PollScheduler;

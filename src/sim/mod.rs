/// Session state and the time-driven activities that mutate it.

pub mod event;
pub mod session;
pub mod step;
pub mod timer;

pub mod effect;
pub mod event;
pub mod reactor;
pub mod recognition;
pub mod round;
pub mod speech;
pub mod telemetry;
pub mod time;

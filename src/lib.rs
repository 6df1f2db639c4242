pub mod config;
pub mod input;
pub mod kernel;
pub mod outputs;
pub mod services;

pub use kernel::reactor::Reactor;

pub mod context;
pub mod controller;
pub mod events;
pub mod logging;
pub mod once;
pub mod state;

pub use context::PipelineContext;
pub use controller::{AppController, ChannelSet};

#[cfg(test)]
mod tests;

//! Command handlers for the splitkit CLI.

pub mod separators;
pub mod split;

pub use separators::SeparatorsCommand;
pub use split::SplitCommand;

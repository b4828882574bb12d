//! Command implementations.

pub mod actions;
pub mod resolve;
pub mod simulate;

pub use self::actions::execute_actions;
pub use self::resolve::execute_resolve;
pub use self::simulate::execute_simulate;

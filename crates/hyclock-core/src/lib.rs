pub mod config;
pub mod event_bus;
pub mod module_context;
pub mod modules;
pub mod recurring;
pub mod time_source;

pub use module_context::{ModuleContext, ModuleEventSender};

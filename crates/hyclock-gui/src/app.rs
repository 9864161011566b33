mod bus;
mod micro_ticker;
mod state;
mod update;
mod view;

pub use state::{App, Message};

pub mod bus;
pub mod id;
pub mod schedule;

pub use bus::{Bus, BusEvent, BusEventDef};
pub use schedule::TaskRegistry;

pub mod menu;

pub use menu::{run, MenuChoice};

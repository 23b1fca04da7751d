pub mod block;
pub mod macros;
pub mod metadata;
pub mod season;
pub mod show;
pub mod term;
pub mod time;
pub mod timeslot;

pub use block::*;
pub use metadata::*;
pub use season::*;
pub use show::*;
pub use term::*;
pub use timeslot::*;

pub mod clock;
pub mod controller;
pub mod game_events;
pub mod outcome;
pub mod roster;
pub mod turns;
pub mod word_bag;
pub mod word_catalog;

// Re-export main components
pub use clock::*;
pub use controller::*;
pub use game_events::*;
pub use outcome::*;
pub use roster::*;
pub use turns::*;
pub use word_bag::*;
pub use word_catalog::*;

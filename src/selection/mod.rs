//! Catalogue optimization.
//!
//! Chooses which catalogue entries actually go on the hike:
//!
//! - [`select_equipment`]: fewest entries per mandatory category covering
//!   every participant (and the group's water need for water containers)
//! - [`select_food`]: lightest set of whole food entries reaching the
//!   group's daily calories

mod equipment;
mod food;

pub use equipment::{select_cover, select_equipment};
pub use food::{select_food, select_food_for};

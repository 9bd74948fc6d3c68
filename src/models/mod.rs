mod feedback;
mod item;
mod profile;

pub use feedback::{FeedbackEvent, FeedbackType};
pub use item::Item;
pub use profile::{BodyShape, Outfit, Recommendation, ScoredItem, StyleProfile};

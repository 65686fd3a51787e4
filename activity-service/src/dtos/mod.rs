pub mod activities;

pub use activities::{ActivitySuggestionQuery, ImageMatchQuery};

pub mod catalog;
pub mod errors;
pub mod mastery;
pub mod models;
pub mod tasks;

pub use catalog::Catalog;
pub use errors::OboeruError;
pub use mastery::MasteryStore;
pub use models::{Category, Grammar, Kanji, StudyItem, Vocabulary};

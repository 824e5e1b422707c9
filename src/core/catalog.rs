use std::collections::HashSet;

use serde::Deserialize;

use super::{
    errors::OboeruError,
    models::{Grammar, Kanji, Vocabulary},
};

const N4_DATA: &str = include_str!("../../assets/data/n4.json");

/// Immutable study content, embedded at compile time.
#[derive(Debug, Deserialize)]
pub struct Catalog {
    pub kanji: Vec<Kanji>,
    pub vocabulary: Vec<Vocabulary>,
    pub grammar: Vec<Grammar>,
}

impl Catalog {
    pub fn load_embedded() -> Result<Self, OboeruError> {
        Self::from_json(N4_DATA)
    }

    fn from_json(data: &str) -> Result<Self, OboeruError> {
        let catalog: Catalog = serde_json::from_str(data)?;
        catalog.check_unique_ids()?;
        Ok(catalog)
    }

    // Mastery state is keyed by id across all three kinds, so ids must be
    // unique over the whole catalog, not just within a kind.
    fn check_unique_ids(&self) -> Result<(), OboeruError> {
        let mut seen = HashSet::new();

        let ids = self
            .kanji
            .iter()
            .map(|kanji| kanji.id.as_str())
            .chain(self.vocabulary.iter().map(|vocab| vocab.id.as_str()))
            .chain(self.grammar.iter().map(|grammar| grammar.id.as_str()));

        for id in ids {
            if !seen.insert(id) {
                return Err(OboeruError::Custom(format!("Duplicate catalog id: {}", id)));
            }
        }

        Ok(())
    }

    pub fn total_items(&self) -> usize {
        self.kanji.len() + self.vocabulary.len() + self.grammar.len()
    }

    pub fn kanji_by_id(&self, id: &str) -> Option<&Kanji> {
        self.kanji.iter().find(|kanji| kanji.id == id)
    }

    pub fn grammar_by_id(&self, id: &str) -> Option<&Grammar> {
        self.grammar.iter().find(|grammar| grammar.id == id)
    }
}

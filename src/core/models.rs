use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Kanji,
    Vocabulary,
    Grammar,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Kanji => "Канжи",
            Category::Vocabulary => "Үгс",
            Category::Grammar => "Дүрэм",
        }
    }
}

/// Common surface over the three catalog item kinds, so filtering,
/// searching and grouping can be written once.
pub trait StudyItem {
    fn id(&self) -> &str;
    fn set(&self) -> u32;

    /// Terms matched against the search query. Meanings are lowercased,
    /// Japanese text is kept as written.
    fn search_terms(&self) -> Vec<String>;
}

#[derive(Debug, Clone, Deserialize)]
pub struct Kanji {
    pub id: String,
    pub glyph: String,
    pub on: Vec<String>,     // on-readings in katakana
    pub kun: Vec<String>,    // kun-readings in hiragana, okurigana after "-"
    pub meaning: String,
    pub strokes: u32,
    pub set: u32,
}

impl Kanji {
    pub fn on_readings(&self) -> String {
        self.on.join("、")
    }

    pub fn kun_readings(&self) -> String {
        self.kun.join("、")
    }
}

impl StudyItem for Kanji {
    fn id(&self) -> &str {
        &self.id
    }

    fn set(&self) -> u32 {
        self.set
    }

    fn search_terms(&self) -> Vec<String> {
        vec![self.glyph.clone(), self.meaning.to_lowercase()]
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Vocabulary {
    pub id: String,
    pub written: String,
    pub reading: String,
    pub meaning: String,
    pub set: u32,
}

impl StudyItem for Vocabulary {
    fn id(&self) -> &str {
        &self.id
    }

    fn set(&self) -> u32 {
        self.set
    }

    fn search_terms(&self) -> Vec<String> {
        vec![self.written.clone(), self.reading.clone(), self.meaning.to_lowercase()]
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Grammar {
    pub id: String,
    pub pattern: String,
    pub meaning: String,
    pub example: String,
    pub example_mn: String,
    pub set: u32,
}

impl StudyItem for Grammar {
    fn id(&self) -> &str {
        &self.id
    }

    fn set(&self) -> u32 {
        self.set
    }

    fn search_terms(&self) -> Vec<String> {
        vec![self.pattern.clone(), self.meaning.to_lowercase()]
    }
}

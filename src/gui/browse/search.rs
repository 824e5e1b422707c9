use crate::core::StudyItem;

/// Case-insensitive substring match over the item's search terms. The
/// empty query matches everything.
pub fn matches_search<T: StudyItem>(item: &T, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let needle = query.to_lowercase();
    item.search_terms().iter().any(|term| term.contains(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Grammar, Kanji, Vocabulary};

    fn kanji() -> Kanji {
        Kanji {
            id: "k1".to_string(),
            glyph: "会".to_string(),
            on: vec!["カイ".to_string()],
            kun: vec!["あ-う".to_string()],
            meaning: "Уулзах".to_string(),
            strokes: 6,
            set: 1,
        }
    }

    fn vocabulary() -> Vocabulary {
        Vocabulary {
            id: "v1".to_string(),
            written: "勉強".to_string(),
            reading: "べんきょう".to_string(),
            meaning: "Хичээл, суралцахуй".to_string(),
            set: 1,
        }
    }

    fn grammar() -> Grammar {
        Grammar {
            id: "g1".to_string(),
            pattern: "〜そうです".to_string(),
            meaning: "Бололтой (таамаглал)".to_string(),
            example: "雨が降りそうです。".to_string(),
            example_mn: "Бороо орох нь бололтой.".to_string(),
            set: 1,
        }
    }

    #[test]
    fn test_empty_query_matches_everything() {
        assert!(matches_search(&kanji(), ""));
        assert!(matches_search(&vocabulary(), ""));
        assert!(matches_search(&grammar(), ""));
    }

    #[test]
    fn test_kanji_matches_glyph_and_meaning_only() {
        let item = kanji();

        assert!(matches_search(&item, "会"));
        assert!(matches_search(&item, "уулз"));
        // Readings are not part of the kanji search surface.
        assert!(!matches_search(&item, "カイ"));
    }

    #[test]
    fn test_meaning_match_ignores_case() {
        assert!(matches_search(&kanji(), "УУЛЗ"));
        assert!(matches_search(&vocabulary(), "хичээл"));
        assert!(matches_search(&vocabulary(), "Хичээл"));
    }

    #[test]
    fn test_vocabulary_matches_written_and_reading() {
        let item = vocabulary();

        assert!(matches_search(&item, "勉"));
        assert!(matches_search(&item, "べんきょう"));
        assert!(!matches_search(&item, "散歩"));
    }

    #[test]
    fn test_grammar_matches_pattern_substring() {
        let item = grammar();

        assert!(matches_search(&item, "そうです"));
        assert!(matches_search(&item, "таамаглал"));
        // Example sentences are display-only.
        assert!(!matches_search(&item, "雨"));
    }
}

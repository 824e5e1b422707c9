/// Mastery filter applied to every browse tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MasteryFilter {
    #[default]
    All,
    Learning,
    Mastered,
}

impl MasteryFilter {
    pub const ALL: [MasteryFilter; 3] =
        [MasteryFilter::All, MasteryFilter::Learning, MasteryFilter::Mastered];

    pub fn label(&self) -> &'static str {
        match self {
            MasteryFilter::All => "Бүгд",
            MasteryFilter::Learning => "Сураагүй",
            MasteryFilter::Mastered => "Цээжилсэн",
        }
    }

    pub fn allows(&self, mastered: bool) -> bool {
        match self {
            MasteryFilter::All => true,
            MasteryFilter::Learning => !mastered,
            MasteryFilter::Mastered => mastered,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_partition_items() {
        for mastered in [false, true] {
            assert!(MasteryFilter::All.allows(mastered));
            // Learning and Mastered split every item between them.
            assert_ne!(
                MasteryFilter::Learning.allows(mastered),
                MasteryFilter::Mastered.allows(mastered)
            );
        }

        assert!(MasteryFilter::Mastered.allows(true));
        assert!(!MasteryFilter::Mastered.allows(false));
        assert!(MasteryFilter::Learning.allows(false));
    }
}

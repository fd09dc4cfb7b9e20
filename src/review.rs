use crate::model::ReviewItem;

/// How an option is shown in the post-quiz review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    Correct,
    WrongSelected,
    Neutral,
}

pub fn mark_option(option: usize, selected: usize, correct: usize) -> OptionMark {
    if option == correct {
        OptionMark::Correct
    } else if option == selected && selected != correct {
        OptionMark::WrongSelected
    } else {
        OptionMark::Neutral
    }
}

impl ReviewItem {
    pub fn marks(&self) -> Vec<OptionMark> {
        (0..self.options.len())
            .map(|i| mark_option(i, self.selected, self.correct))
            .collect()
    }
}

/// Score as a whole percentage, rounded half up.
pub fn percentage(score: u32, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((score as f64 / total as f64) * 100.0).round() as u32
}

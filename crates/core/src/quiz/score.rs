/// Tally of correct answers over a quiz's question sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    correct: usize,
    total: usize,
}

impl Score {
    /// `correct` is clamped to `total`.
    #[must_use]
    pub fn new(correct: usize, total: usize) -> Self {
        Self {
            correct: correct.min(total),
            total,
        }
    }

    #[must_use]
    pub fn correct(&self) -> usize {
        self.correct
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Percentage of correct answers, rounded half up. An empty quiz scores 0.
    #[must_use]
    pub fn percentage(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let rounded = (self.correct * 200 + self.total) / (2 * self.total);
        u8::try_from(rounded).unwrap_or(100)
    }

    #[must_use]
    pub fn is_passing(&self, threshold: u8) -> bool {
        self.percentage() >= threshold
    }
}

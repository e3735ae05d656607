use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use crate::model::{
    DifficultyFilter, LanguageId, OPTION_COUNT, Question, QuestionId, QuizSettings,
};
use crate::quiz::Score;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Precondition violations. The session is left untouched whenever one is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no questions available for this difficulty")]
    Empty,

    #[error("quiz has not been started")]
    NotStarted,

    #[error("quiz is already in progress")]
    AlreadyStarted,

    #[error("quiz already completed")]
    Completed,

    #[error("answer option {0} is out of range")]
    InvalidOption(usize),
}

//
// ─── STATES & OUTCOMES ─────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    NotStarted,
    InProgress,
    Completed,
}

/// How a completed quiz ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionReason {
    /// The last question was passed with `advance`.
    Finished,
    /// The countdown reached zero.
    TimedOut,
}

/// Result of a navigation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Moved { position: usize },
    Completed,
    Unchanged,
}

/// Result of a single timer tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Running { remaining_secs: u32 },
    Expired,
    /// The quiz is not in progress; nothing changed.
    Idle,
}

/// One row of the post-quiz review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionReview<'a> {
    /// 1-based position in the quiz.
    pub number: usize,
    pub question: &'a Question,
    pub selected: Option<usize>,
    pub is_correct: bool,
}

impl QuestionReview<'_> {
    #[must_use]
    pub fn selected_text(&self) -> Option<&str> {
        self.selected.and_then(|index| self.question.option(index))
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One quiz attempt over the questions of a language, filtered by difficulty.
///
/// The session is a synchronous state machine; the countdown is driven by
/// whoever hosts it calling [`QuizSession::tick`] once per second.
#[derive(Clone)]
pub struct QuizSession {
    language: LanguageId,
    catalog: Vec<Question>,
    filter: DifficultyFilter,
    questions: Vec<Question>,
    position: usize,
    answers: HashMap<QuestionId, usize>,
    duration_secs: u32,
    remaining_secs: u32,
    started: bool,
    completion: Option<CompletionReason>,
}

impl QuizSession {
    /// Create a not-yet-started session from a language's full question list.
    #[must_use]
    pub fn new(
        language: LanguageId,
        catalog: Vec<Question>,
        filter: DifficultyFilter,
        settings: &QuizSettings,
    ) -> Self {
        let questions = filter.apply(&catalog);
        Self {
            language,
            catalog,
            filter,
            questions,
            position: 0,
            answers: HashMap::new(),
            duration_secs: settings.duration_secs(),
            remaining_secs: settings.duration_secs(),
            started: false,
            completion: None,
        }
    }

    #[must_use]
    pub fn language(&self) -> &LanguageId {
        &self.language
    }

    #[must_use]
    pub fn filter(&self) -> DifficultyFilter {
        self.filter
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.position)
    }

    #[must_use]
    pub fn state(&self) -> QuizState {
        match (self.started, self.completion) {
            (_, Some(_)) => QuizState::Completed,
            (true, None) => QuizState::InProgress,
            (false, None) => QuizState::NotStarted,
        }
    }

    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        self.state() == QuizState::InProgress
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completion.is_some()
    }

    #[must_use]
    pub fn completion_reason(&self) -> Option<CompletionReason> {
        self.completion
    }

    #[must_use]
    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> u32 {
        self.duration_secs - self.remaining_secs
    }

    #[must_use]
    pub fn selected_for(&self, id: &QuestionId) -> Option<usize> {
        self.answers.get(id).copied()
    }

    #[must_use]
    pub fn selected_for_current(&self) -> Option<usize> {
        self.current_question()
            .and_then(|question| self.selected_for(question.id()))
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Whether `start` would succeed.
    #[must_use]
    pub fn can_start(&self) -> bool {
        self.state() == QuizState::NotStarted && !self.is_empty()
    }

    /// Whether the current question has a selection and the quiz is running.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.is_in_progress() && self.selected_for_current().is_some()
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.position + 1 >= self.questions.len()
    }

    /// Share of the quiz reached by the current position, in percent.
    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        Score::new(self.position + 1, self.questions.len()).percentage()
    }

    /// Begin the quiz from the first question with a full countdown.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Empty` when the filtered sequence has no questions,
    /// `QuizError::AlreadyStarted` while an attempt is running and
    /// `QuizError::Completed` once it has ended. Use `restart` to begin again.
    /// The session is not modified in any of these cases.
    pub fn start(&mut self) -> Result<(), QuizError> {
        match self.state() {
            QuizState::InProgress => return Err(QuizError::AlreadyStarted),
            QuizState::Completed => return Err(QuizError::Completed),
            QuizState::NotStarted if self.is_empty() => return Err(QuizError::Empty),
            QuizState::NotStarted => {}
        }
        self.reset();
        self.started = true;
        Ok(())
    }

    /// Record (or overwrite) the selection for the current question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidOption` for an index outside the options,
    /// `QuizError::NotStarted` before `start`, and `QuizError::Completed` once
    /// the quiz has ended.
    pub fn select_answer(&mut self, option: usize) -> Result<(), QuizError> {
        match self.state() {
            QuizState::NotStarted => return Err(QuizError::NotStarted),
            QuizState::Completed => return Err(QuizError::Completed),
            QuizState::InProgress => {}
        }
        if option >= OPTION_COUNT {
            return Err(QuizError::InvalidOption(option));
        }
        let Some(question) = self.questions.get(self.position) else {
            return Err(QuizError::Empty);
        };
        self.answers.insert(question.id().clone(), option);
        Ok(())
    }

    /// Move to the next question, or complete the quiz from the last one.
    pub fn advance(&mut self) -> Step {
        if !self.is_in_progress() {
            return Step::Unchanged;
        }
        if self.is_last() {
            self.completion = Some(CompletionReason::Finished);
            return Step::Completed;
        }
        self.position += 1;
        Step::Moved {
            position: self.position,
        }
    }

    /// Move back one question. A no-op on the first question.
    pub fn retreat(&mut self) -> Step {
        if !self.is_in_progress() || self.position == 0 {
            return Step::Unchanged;
        }
        self.position -= 1;
        Step::Moved {
            position: self.position,
        }
    }

    /// Count down one second; reaching zero completes the quiz wherever it is.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_in_progress() {
            return TickOutcome::Idle;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.completion = Some(CompletionReason::TimedOut);
            return TickOutcome::Expired;
        }
        TickOutcome::Running {
            remaining_secs: self.remaining_secs,
        }
    }

    /// Correct answers over the filtered sequence. Uses the latest selection
    /// per question and may be read at any point of the quiz.
    #[must_use]
    pub fn score(&self) -> Score {
        let correct = self
            .questions
            .iter()
            .filter(|question| {
                self.selected_for(question.id())
                    .is_some_and(|selected| question.is_correct(selected))
            })
            .count();
        Score::new(correct, self.questions.len())
    }

    /// Per-question outcome in quiz order.
    #[must_use]
    pub fn review(&self) -> Vec<QuestionReview<'_>> {
        self.questions
            .iter()
            .enumerate()
            .map(|(index, question)| {
                let selected = self.selected_for(question.id());
                QuestionReview {
                    number: index + 1,
                    question,
                    selected,
                    is_correct: selected.is_some_and(|s| question.is_correct(s)),
                }
            })
            .collect()
    }

    /// Re-filter the language's questions and return to `NotStarted`.
    pub fn set_filter(&mut self, filter: DifficultyFilter) {
        self.filter = filter;
        self.questions = filter.apply(&self.catalog);
        self.restart();
    }

    /// Discard the attempt and return to `NotStarted`.
    pub fn restart(&mut self) {
        self.reset();
        self.started = false;
    }

    fn reset(&mut self) {
        self.position = 0;
        self.answers.clear();
        self.remaining_secs = self.duration_secs;
        self.completion = None;
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("language", &self.language)
            .field("filter", &self.filter)
            .field("questions_len", &self.questions.len())
            .field("position", &self.position)
            .field("answers_len", &self.answers.len())
            .field("remaining_secs", &self.remaining_secs)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Difficulty, QuizSettingsDraft};

    fn question(id: &str, correct: usize, difficulty: Difficulty) -> Question {
        Question::new(
            id,
            format!("Prompt {id}"),
            ["a", "b", "c", "d"],
            correct,
            difficulty,
            "because",
        )
        .unwrap()
    }

    fn catalog() -> Vec<Question> {
        vec![
            question("q1", 1, Difficulty::Beginner),
            question("q2", 1, Difficulty::Beginner),
            question("q3", 1, Difficulty::Intermediate),
            question("q4", 2, Difficulty::Oop),
            question("q5", 1, Difficulty::Oop),
        ]
    }

    fn session(filter: DifficultyFilter) -> QuizSession {
        QuizSession::new(
            LanguageId::new("python").unwrap(),
            catalog(),
            filter,
            &QuizSettings::default(),
        )
    }

    #[test]
    fn new_session_is_not_started() {
        let s = session(DifficultyFilter::All);
        assert_eq!(s.state(), QuizState::NotStarted);
        assert_eq!(s.len(), 5);
        assert_eq!(s.remaining_secs(), 1200);
        assert!(s.can_start());
    }

    #[test]
    fn start_is_rejected_while_running() {
        let mut s = session(DifficultyFilter::All);
        s.start().unwrap();
        s.select_answer(1).unwrap();
        s.advance();
        s.tick();

        assert!(!s.can_start());
        assert_eq!(s.start(), Err(QuizError::AlreadyStarted));
        assert_eq!(s.state(), QuizState::InProgress);
        assert_eq!(s.position(), 1);
        assert_eq!(s.answered_count(), 1);
        assert_eq!(s.remaining_secs(), 1199);

        s.restart();
        s.start().unwrap();
        assert_eq!(s.position(), 0);
        assert_eq!(s.answered_count(), 0);
        assert_eq!(s.remaining_secs(), 1200);
    }

    #[test]
    fn start_on_empty_sequence_changes_nothing() {
        let mut s = QuizSession::new(
            LanguageId::new("rust").unwrap(),
            Vec::new(),
            DifficultyFilter::All,
            &QuizSettings::default(),
        );
        assert!(!s.can_start());
        assert_eq!(s.start(), Err(QuizError::Empty));
        assert_eq!(s.state(), QuizState::NotStarted);
        assert_eq!(s.remaining_secs(), 1200);
        assert_eq!(s.tick(), TickOutcome::Idle);
        assert_eq!(s.score().percentage(), 0);
    }

    #[test]
    fn select_requires_running_quiz() {
        let mut s = session(DifficultyFilter::All);
        assert_eq!(s.select_answer(0), Err(QuizError::NotStarted));

        s.start().unwrap();
        assert_eq!(s.select_answer(4), Err(QuizError::InvalidOption(4)));
        assert_eq!(s.answered_count(), 0);

        for _ in 0..5 {
            s.select_answer(1).unwrap();
            s.advance();
        }
        assert!(s.is_completed());
        assert_eq!(s.select_answer(0), Err(QuizError::Completed));
    }

    #[test]
    fn advance_completes_on_nth_call() {
        let mut s = session(DifficultyFilter::All);
        s.start().unwrap();
        for expected in 1..5 {
            assert_eq!(s.advance(), Step::Moved { position: expected });
            assert!(!s.is_completed());
        }
        assert_eq!(s.position(), 4);
        assert_eq!(s.advance(), Step::Completed);
        assert_eq!(s.position(), 4);
        assert_eq!(s.completion_reason(), Some(CompletionReason::Finished));
        assert_eq!(s.advance(), Step::Unchanged);
    }

    #[test]
    fn retreat_at_first_question_is_noop() {
        let mut s = session(DifficultyFilter::All);
        s.start().unwrap();
        assert_eq!(s.retreat(), Step::Unchanged);
        assert_eq!(s.position(), 0);

        s.advance();
        s.advance();
        assert_eq!(s.retreat(), Step::Moved { position: 1 });
    }

    #[test]
    fn navigation_is_ignored_before_start() {
        let mut s = session(DifficultyFilter::All);
        assert_eq!(s.advance(), Step::Unchanged);
        assert_eq!(s.retreat(), Step::Unchanged);
        assert_eq!(s.state(), QuizState::NotStarted);
    }

    #[test]
    fn full_countdown_forces_completion() {
        let mut s = session(DifficultyFilter::All);
        s.start().unwrap();
        s.advance();
        s.select_answer(1).unwrap();

        for _ in 0..1199 {
            assert!(matches!(s.tick(), TickOutcome::Running { .. }));
        }
        assert_eq!(s.remaining_secs(), 1);
        assert_eq!(s.tick(), TickOutcome::Expired);
        assert_eq!(s.remaining_secs(), 0);
        assert_eq!(s.state(), QuizState::Completed);
        assert_eq!(s.completion_reason(), Some(CompletionReason::TimedOut));
        assert_eq!(s.position(), 1);

        assert_eq!(s.tick(), TickOutcome::Idle);
        assert_eq!(s.remaining_secs(), 0);
        assert_eq!(s.elapsed_secs(), 1200);
    }

    #[test]
    fn short_duration_from_settings() {
        let settings = QuizSettingsDraft {
            duration_secs: Some(2),
            ..QuizSettingsDraft::default()
        }
        .validate()
        .unwrap();
        let mut s = QuizSession::new(
            LanguageId::new("python").unwrap(),
            catalog(),
            DifficultyFilter::All,
            &settings,
        );
        s.start().unwrap();
        assert_eq!(s.tick(), TickOutcome::Running { remaining_secs: 1 });
        assert_eq!(s.tick(), TickOutcome::Expired);
    }

    #[test]
    fn four_of_five_scores_eighty() {
        let mut s = session(DifficultyFilter::All);
        s.start().unwrap();
        // q1..q5 correct answers are 1, 1, 1, 2, 1; miss q4.
        for choice in [1, 1, 1, 0, 1] {
            s.select_answer(choice).unwrap();
            s.advance();
        }
        assert!(s.is_completed());
        let score = s.score();
        assert_eq!(score.correct(), 4);
        assert_eq!(score.total(), 5);
        assert_eq!(score.percentage(), 80);
        assert!(score.is_passing(70));
    }

    #[test]
    fn score_is_available_mid_quiz() {
        let mut s = session(DifficultyFilter::All);
        s.start().unwrap();
        s.select_answer(1).unwrap();
        assert_eq!(s.score().percentage(), 20);
    }

    #[test]
    fn latest_selection_counts_after_going_back() {
        let mut s = session(DifficultyFilter::All);
        s.start().unwrap();
        s.select_answer(1).unwrap();
        s.advance();
        s.retreat();
        s.select_answer(3).unwrap();
        assert_eq!(s.answered_count(), 1);
        assert_eq!(s.selected_for_current(), Some(3));
        assert_eq!(s.score().correct(), 0);
    }

    #[test]
    fn filter_change_resets_to_not_started() {
        let mut s = session(DifficultyFilter::All);
        s.start().unwrap();
        s.select_answer(1).unwrap();
        s.advance();
        s.tick();

        s.set_filter(DifficultyFilter::Only(Difficulty::Oop));
        assert_eq!(s.state(), QuizState::NotStarted);
        assert_eq!(s.position(), 0);
        assert_eq!(s.answered_count(), 0);
        assert_eq!(s.remaining_secs(), 1200);
        let ids: Vec<_> = s.questions().iter().map(|q| q.id().as_str()).collect();
        assert_eq!(ids, vec!["q4", "q5"]);
    }

    #[test]
    fn filter_with_no_matches_disables_start() {
        let mut s = QuizSession::new(
            LanguageId::new("python").unwrap(),
            vec![question("q1", 0, Difficulty::Beginner)],
            DifficultyFilter::All,
            &QuizSettings::default(),
        );
        s.set_filter(DifficultyFilter::Only(Difficulty::Oop));
        assert!(s.is_empty());
        assert!(s.current_question().is_none());
        assert_eq!(s.start(), Err(QuizError::Empty));
        assert_eq!(s.progress_percent(), 0);
    }

    #[test]
    fn restart_after_completion() {
        let mut s = session(DifficultyFilter::Only(Difficulty::Intermediate));
        s.start().unwrap();
        s.select_answer(1).unwrap();
        assert_eq!(s.advance(), Step::Completed);

        assert!(!s.can_start());
        assert_eq!(s.start(), Err(QuizError::Completed));
        assert_eq!(s.answered_count(), 1);

        s.restart();
        assert_eq!(s.state(), QuizState::NotStarted);
        assert_eq!(s.answered_count(), 0);
        assert!(s.completion_reason().is_none());
        assert!(s.start().is_ok());
    }

    #[test]
    fn can_advance_needs_selection() {
        let mut s = session(DifficultyFilter::All);
        s.start().unwrap();
        assert!(!s.can_advance());
        s.select_answer(2).unwrap();
        assert!(s.can_advance());
    }

    #[test]
    fn progress_tracks_position() {
        let mut s = session(DifficultyFilter::All);
        s.start().unwrap();
        assert_eq!(s.progress_percent(), 20);
        s.advance();
        s.advance();
        assert_eq!(s.progress_percent(), 60);
    }

    #[test]
    fn review_lists_each_question() {
        let mut s = session(DifficultyFilter::Only(Difficulty::Beginner));
        s.start().unwrap();
        s.select_answer(1).unwrap();
        s.advance();
        s.select_answer(0).unwrap();
        s.advance();

        let review = s.review();
        assert_eq!(review.len(), 2);
        assert_eq!(review[0].number, 1);
        assert!(review[0].is_correct);
        assert_eq!(review[0].selected_text(), Some("b"));
        assert!(!review[1].is_correct);
        assert_eq!(review[1].selected, Some(0));
    }

    #[test]
    fn answers_only_cover_current_sequence() {
        let mut s = session(DifficultyFilter::All);
        s.start().unwrap();
        for _ in 0..5 {
            s.select_answer(0).unwrap();
            s.advance();
        }
        let ids: Vec<_> = s.questions().iter().map(|q| q.id().clone()).collect();
        assert!(s.answers.keys().all(|id| ids.contains(id)));
    }
}

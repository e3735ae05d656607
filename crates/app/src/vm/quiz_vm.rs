use quiz_core::model::{DifficultyFilter, QuizSettings};
use quiz_core::quiz::{CompletionReason, QuizSession};

use super::time_fmt::format_countdown;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterPillVm {
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizIntroVm {
    pub title: String,
    pub question_count: usize,
    pub minutes: u32,
    pub pass_label: String,
    pub filters: Vec<FilterPillVm>,
    pub can_start: bool,
    pub empty_message: Option<&'static str>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub letter: char,
    pub text: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub header: String,
    pub difficulty: &'static str,
    pub prompt: String,
    pub options: Vec<OptionVm>,
    pub timer_label: String,
    pub timer_urgent: bool,
    pub progress_percent: u8,
    pub answered_label: String,
    pub can_go_back: bool,
    pub can_advance: bool,
    pub next_label: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewRowVm {
    pub number: usize,
    pub prompt: String,
    pub is_correct: bool,
    pub your_answer: String,
    /// Only shown when the selection was wrong or missing.
    pub correct_answer: Option<String>,
    pub explanation: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizResultsVm {
    pub passed: bool,
    pub headline: &'static str,
    pub message: String,
    pub timed_out: bool,
    pub percentage_label: String,
    pub correct: usize,
    pub total: usize,
    pub rows: Vec<ReviewRowVm>,
}

#[must_use]
pub fn map_intro(session: &QuizSession, language_name: &str, settings: &QuizSettings) -> QuizIntroVm {
    let filters = DifficultyFilter::CHOICES
        .iter()
        .map(|filter| FilterPillVm {
            label: filter.label(),
            selected: *filter == session.filter(),
        })
        .collect();

    QuizIntroVm {
        title: format!("{language_name} Quiz Challenge"),
        question_count: session.len(),
        minutes: settings.duration_minutes(),
        pass_label: format!("{}%", settings.pass_threshold()),
        filters,
        can_start: session.can_start(),
        empty_message: session
            .is_empty()
            .then_some("No questions available for this difficulty level."),
    }
}

/// Maps the current question; `None` when there is nothing to show.
#[must_use]
pub fn map_question(session: &QuizSession, settings: &QuizSettings) -> Option<QuestionVm> {
    let question = session.current_question()?;
    let selected = session.selected_for_current();

    let options = question
        .options()
        .iter()
        .zip('A'..)
        .enumerate()
        .map(|(index, (text, letter))| OptionVm {
            letter,
            text: text.clone(),
            selected: selected == Some(index),
        })
        .collect();

    let remaining = session.remaining_secs();
    Some(QuestionVm {
        header: format!("Question {} of {}", session.position() + 1, session.len()),
        difficulty: question.difficulty().label(),
        prompt: question.prompt().to_string(),
        options,
        timer_label: format_countdown(remaining),
        timer_urgent: remaining < settings.urgent_secs(),
        progress_percent: session.progress_percent(),
        answered_label: format!("{} of {} answered", session.answered_count(), session.len()),
        can_go_back: session.is_in_progress() && session.position() > 0,
        can_advance: session.can_advance(),
        next_label: if session.is_last() { "Finish Quiz" } else { "Next" },
    })
}

#[must_use]
pub fn map_results(session: &QuizSession, settings: &QuizSettings) -> QuizResultsVm {
    let score = session.score();
    let passed = score.is_passing(settings.pass_threshold());

    let rows = session
        .review()
        .into_iter()
        .map(|review| ReviewRowVm {
            number: review.number,
            prompt: review.question.prompt().to_string(),
            is_correct: review.is_correct,
            your_answer: review
                .selected_text()
                .map_or_else(|| "Not answered".to_string(), str::to_string),
            correct_answer: (!review.is_correct)
                .then(|| review.question.correct_option().to_string()),
            explanation: review.question.explanation().to_string(),
        })
        .collect();

    let message = if passed {
        "You passed the quiz! Great job on mastering these concepts.".to_string()
    } else {
        format!(
            "You need {}% to pass. Review the material and try again.",
            settings.pass_threshold()
        )
    };

    QuizResultsVm {
        passed,
        headline: if passed { "Congratulations!" } else { "Keep Practicing!" },
        message,
        timed_out: session.completion_reason() == Some(CompletionReason::TimedOut),
        percentage_label: format!("{}%", score.percentage()),
        correct: score.correct(),
        total: score.total(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{Difficulty, LanguageId, Question};

    fn session() -> QuizSession {
        let questions = vec![
            Question::new("q1", "First?", ["w", "x", "y", "z"], 1, Difficulty::Beginner, "x it is")
                .unwrap(),
            Question::new("q2", "Second?", ["w", "x", "y", "z"], 3, Difficulty::Oop, "z it is")
                .unwrap(),
        ];
        QuizSession::new(
            LanguageId::new("python").unwrap(),
            questions,
            DifficultyFilter::All,
            &QuizSettings::default(),
        )
    }

    #[test]
    fn intro_lists_filters_and_counts() {
        let s = session();
        let vm = map_intro(&s, "Python", &QuizSettings::default());
        assert_eq!(vm.title, "Python Quiz Challenge");
        assert_eq!(vm.question_count, 2);
        assert_eq!(vm.minutes, 20);
        assert_eq!(vm.pass_label, "70%");
        assert!(vm.can_start);
        assert!(vm.empty_message.is_none());
        let selected: Vec<_> = vm.filters.iter().filter(|f| f.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].label, "All");
    }

    #[test]
    fn intro_for_empty_filter_disables_start() {
        let mut s = session();
        s.set_filter(DifficultyFilter::Only(Difficulty::Intermediate));
        let vm = map_intro(&s, "Python", &QuizSettings::default());
        assert!(!vm.can_start);
        assert!(vm.empty_message.is_some());
    }

    #[test]
    fn question_marks_selection_and_labels() {
        let mut s = session();
        s.start().unwrap();
        s.select_answer(2).unwrap();
        let vm = map_question(&s, &QuizSettings::default()).unwrap();
        assert_eq!(vm.header, "Question 1 of 2");
        assert_eq!(vm.difficulty, "Beginner");
        assert_eq!(vm.options[2].letter, 'C');
        assert!(vm.options[2].selected);
        assert_eq!(vm.timer_label, "20:00");
        assert!(!vm.timer_urgent);
        assert_eq!(vm.answered_label, "1 of 2 answered");
        assert!(!vm.can_go_back);
        assert!(vm.can_advance);
        assert_eq!(vm.next_label, "Next");

        s.advance();
        let vm = map_question(&s, &QuizSettings::default()).unwrap();
        assert_eq!(vm.next_label, "Finish Quiz");
        assert!(vm.can_go_back);
        assert!(!vm.can_advance);
    }

    #[test]
    fn timer_turns_urgent_under_five_minutes() {
        let mut s = session();
        s.start().unwrap();
        for _ in 0..901 {
            s.tick();
        }
        let vm = map_question(&s, &QuizSettings::default()).unwrap();
        assert_eq!(vm.timer_label, "4:59");
        assert!(vm.timer_urgent);
    }

    #[test]
    fn results_show_review_rows() {
        let mut s = session();
        s.start().unwrap();
        s.select_answer(1).unwrap();
        s.advance();
        s.advance();

        let vm = map_results(&s, &QuizSettings::default());
        assert!(!vm.passed);
        assert_eq!(vm.headline, "Keep Practicing!");
        assert_eq!(vm.percentage_label, "50%");
        assert_eq!((vm.correct, vm.total), (1, 2));
        assert!(!vm.timed_out);

        assert!(vm.rows[0].is_correct);
        assert_eq!(vm.rows[0].your_answer, "x");
        assert!(vm.rows[0].correct_answer.is_none());
        assert_eq!(vm.rows[1].your_answer, "Not answered");
        assert_eq!(vm.rows[1].correct_answer.as_deref(), Some("z"));
        assert_eq!(vm.rows[1].explanation, "z it is");
    }
}

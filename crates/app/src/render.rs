//! Plain-text rendering of the quiz view models.

use std::fmt::Write as _;

use quiz_core::model::Language;

use crate::vm::{QuestionVm, QuizIntroVm, QuizResultsVm};

#[must_use]
pub fn intro(vm: &QuizIntroVm) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", vm.title);
    let _ = writeln!(
        out,
        "{} questions | {} minutes | {} to pass",
        vm.question_count, vm.minutes, vm.pass_label
    );
    let pills: Vec<String> = vm
        .filters
        .iter()
        .map(|pill| {
            if pill.selected {
                format!("[{}]", pill.label)
            } else {
                pill.label.to_string()
            }
        })
        .collect();
    let _ = writeln!(out, "Difficulty: {}", pills.join("  "));
    match vm.empty_message {
        Some(message) => {
            let _ = writeln!(out, "{message}");
        }
        None if vm.can_start => {
            let _ = writeln!(out, "Type `s` to start.");
        }
        None => {}
    }
    out
}

#[must_use]
pub fn question(vm: &QuestionVm) -> String {
    let mut out = String::new();
    let urgent = if vm.timer_urgent { " !" } else { "" };
    let _ = writeln!(
        out,
        "-- {} [{}] {}% -- time {}{urgent}",
        vm.header, vm.difficulty, vm.progress_percent, vm.timer_label
    );
    let _ = writeln!(out, "{}", vm.prompt);
    for option in &vm.options {
        let marker = if option.selected { '>' } else { ' ' };
        let _ = writeln!(out, " {marker} {}. {}", option.letter, option.text);
    }

    let mut actions = Vec::new();
    if vm.can_go_back {
        actions.push("p: Previous".to_string());
    }
    if vm.can_advance {
        actions.push(format!("n: {}", vm.next_label));
    }
    let _ = writeln!(out, "{} | {}", vm.answered_label, actions.join("  "));
    out
}

#[must_use]
pub fn results(vm: &QuizResultsVm) -> String {
    let mut out = String::new();
    if vm.timed_out {
        let _ = writeln!(out, "Time is up!");
    }
    let _ = writeln!(out, "== {} ==", vm.headline);
    let _ = writeln!(out, "{}", vm.message);
    let _ = writeln!(
        out,
        "Final score {} | {} correct of {}",
        vm.percentage_label, vm.correct, vm.total
    );
    let _ = writeln!(out, "Question review:");
    for row in &vm.rows {
        let mark = if row.is_correct { "ok " } else { "xx " };
        let _ = writeln!(out, "{mark}{}. {}", row.number, row.prompt);
        let _ = writeln!(out, "    Your answer: {}", row.your_answer);
        if let Some(correct) = &row.correct_answer {
            let _ = writeln!(out, "    Correct answer: {correct}");
        }
        if !row.explanation.is_empty() {
            let _ = writeln!(out, "    {}", row.explanation);
        }
    }
    let _ = writeln!(out, "Type `r` to try again or `q` to quit.");
    out
}

#[must_use]
pub fn languages(languages: &[Language]) -> String {
    let mut out = String::new();
    for language in languages {
        let _ = writeln!(out, "{:<12} {}", language.id().as_str(), language.name());
    }
    out
}

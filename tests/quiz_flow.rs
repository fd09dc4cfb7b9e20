use std::fs;

use samvidhan::model::{QuestionSet, QuizQuestion, QuizResult};
use samvidhan::quiz::{QuizEffect, QuizFlow, QuizPhase};
use samvidhan::review::OptionMark;

fn fixture_set() -> QuestionSet {
    let content = fs::read_to_string("fixtures/questions.json").expect("Cannot read fixture");
    serde_json::from_str(&content).unwrap()
}

fn fixture_result() -> QuizResult {
    let content =
        fs::read_to_string("fixtures/submit_response.json").expect("Cannot read fixture");
    serde_json::from_str(&content).unwrap()
}

fn loaded(set: QuestionSet) -> QuizFlow {
    let mut flow = QuizFlow::new();
    let Some(QuizEffect::FetchQuestions { attempt }) = flow.mount() else {
        panic!("mount should fetch questions");
    };
    flow.questions_loaded(attempt, set);
    flow
}

#[test]
fn test_single_question_scenario() {
    let mut flow = loaded(fixture_set());
    assert!(flow.start());
    assert!(flow.is_last_question());
    assert!(flow.select(1));

    let effect = flow.advance().expect("last answer submits");
    let QuizEffect::Submit {
        attempt,
        submission,
    } = effect
    else {
        panic!("Expected Submit");
    };
    assert_eq!(submission.quiz_id, "q1");
    assert_eq!(submission.answers.len(), 1);
    assert_eq!(submission.answers[0].question_id, "1");
    assert_eq!(submission.answers[0].selected_answer, 1);

    let body = serde_json::to_value(&submission).unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "quizId": "q1",
            "answers": [{ "questionId": "1", "selectedAnswer": 1 }]
        })
    );

    flow.submitted(attempt, fixture_result());
    assert_eq!(flow.score(), Some((0, 1, 0)));

    let QuizPhase::Result { result, .. } = flow.phase() else {
        panic!("Expected Result");
    };
    let marks = result.review[0].marks();
    assert_eq!(marks, vec![OptionMark::Correct, OptionMark::WrongSelected]);
}

#[test]
fn test_answers_follow_question_order() {
    let set = QuestionSet {
        quiz_id: "quiz_123".into(),
        questions: (1..=5)
            .map(|n| QuizQuestion {
                id: format!("q{}", n),
                question: format!("Question {}", n),
                options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            })
            .collect(),
    };
    let mut flow = loaded(set);
    flow.start();

    let mut submission = None;
    for n in 0..5 {
        assert_eq!(flow.answers().len(), n);
        assert_eq!(flow.current_index(), Some(n));
        flow.select(n % 4);
        if let Some(QuizEffect::Submit { submission: s, .. }) = flow.advance() {
            submission = Some(s);
        }
    }

    let submission = submission.expect("fifth answer submits");
    let ids: Vec<&str> = submission
        .answers
        .iter()
        .map(|a| a.question_id.as_str())
        .collect();
    assert_eq!(ids, vec!["q1", "q2", "q3", "q4", "q5"]);
    let picks: Vec<usize> = submission.answers.iter().map(|a| a.selected_answer).collect();
    assert_eq!(picks, vec![0, 1, 2, 3, 0]);
}

#[test]
fn test_cannot_advance_without_selection() {
    let mut flow = loaded(fixture_set());
    flow.start();
    assert!(flow.advance().is_none());
    assert_eq!(flow.current_index(), Some(0));
    assert!(flow.answers().is_empty());
}

#[test]
fn test_restart_fetches_a_new_attempt() {
    let mut flow = loaded(fixture_set());
    flow.start();
    flow.select(0);
    let Some(QuizEffect::Submit { attempt, .. }) = flow.advance() else {
        panic!("Expected Submit");
    };
    flow.submitted(attempt, fixture_result());

    let Some(QuizEffect::FetchQuestions { attempt: next }) = flow.restart() else {
        panic!("restart should fetch questions");
    };
    assert!(next > attempt);
    assert_eq!(flow.phase(), &QuizPhase::Loading);
    assert!(flow.answers().is_empty());
    assert!(flow.score().is_none());

    // A late result from the abandoned attempt changes nothing.
    flow.submitted(attempt, fixture_result());
    assert_eq!(flow.phase(), &QuizPhase::Loading);

    flow.questions_loaded(next, fixture_set());
    assert!(matches!(flow.phase(), QuizPhase::NotStarted { .. }));
}

#[test]
fn test_failed_submission_can_be_retried() {
    let mut flow = loaded(fixture_set());
    flow.start();
    flow.select(1);
    let Some(QuizEffect::Submit {
        attempt,
        submission,
    }) = flow.advance()
    else {
        panic!("Expected Submit");
    };
    flow.submit_failed(attempt, "Could not reach the server.".into());
    assert!(matches!(flow.phase(), QuizPhase::SubmitFailed { .. }));

    match flow.retry() {
        Some(QuizEffect::Submit { submission: again, .. }) => assert_eq!(again, submission),
        other => panic!("unexpected effect: {:?}", other),
    }
}

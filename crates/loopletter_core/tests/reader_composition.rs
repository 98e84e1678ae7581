use loopletter_core::{
    compose_sections, summarize, Edition, EditionEntry, Loop, Member, Question, Response,
};

fn member(id: &str, name: &str) -> Member {
    Member {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{id}@example.com"),
        avatar: format!("https://i.pravatar.cc/150?u={id}@example.com"),
    }
}

fn question(id: &str, text: &str) -> Question {
    Question {
        id: id.to_string(),
        text: text.to_string(),
    }
}

fn response(id: &str, member_id: &str, question_id: &str, answer: &str) -> Response {
    Response {
        id: id.to_string(),
        member_id: member_id.to_string(),
        question_id: question_id.to_string(),
        answer: answer.to_string(),
    }
}

fn sample_loop() -> Loop {
    let mut record = Loop::new("loop-1", "Crew");
    record.members = vec![member("m1", "Ada"), member("m2", "Grace")];
    record.questions = vec![question("q1", "Highlights?"), question("q2", "Plans?")];
    record.responses = vec![
        response("r1", "m1", "q1", "a"),
        response("r2", "m2", "q1", "b"),
    ];
    record
}

#[test]
fn groups_responses_under_question_in_submission_order() {
    let record = sample_loop();

    let sections = compose_sections(&record.questions, &record.responses, &record.members);

    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].question_id, "q1");
    assert_eq!(sections[0].question, "Highlights?");
    assert_eq!(
        sections[0].entries,
        vec![
            EditionEntry {
                name: "Ada".to_string(),
                avatar: "https://i.pravatar.cc/150?u=m1@example.com".to_string(),
                answer: "a".to_string(),
            },
            EditionEntry {
                name: "Grace".to_string(),
                avatar: "https://i.pravatar.cc/150?u=m2@example.com".to_string(),
                answer: "b".to_string(),
            },
        ]
    );
}

#[test]
fn dangling_member_drops_only_that_response() {
    let mut record = sample_loop();
    record.responses.insert(1, response("r9", "gone", "q1", "ghost"));
    record.responses.push(response("r3", "m1", "q2", "c"));

    let sections = compose_sections(&record.questions, &record.responses, &record.members);

    assert_eq!(sections.len(), 2);
    let answers = sections[0]
        .entries
        .iter()
        .map(|entry| entry.answer.as_str())
        .collect::<Vec<_>>();
    assert_eq!(answers, vec!["a", "b"]);
    assert_eq!(sections[1].question_id, "q2");
}

#[test]
fn responses_to_removed_questions_are_ignored() {
    let mut record = sample_loop();
    record.questions.retain(|question| question.id != "q1");

    let sections = compose_sections(&record.questions, &record.responses, &record.members);

    assert!(sections.is_empty());
}

#[test]
fn sections_follow_question_order_not_response_order() {
    let mut record = sample_loop();
    record.responses = vec![
        response("r1", "m1", "q2", "later question first"),
        response("r2", "m2", "q1", "earlier question second"),
    ];

    let sections = compose_sections(&record.questions, &record.responses, &record.members);

    let ids = sections
        .iter()
        .map(|section| section.question_id.as_str())
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["q1", "q2"]);
}

#[test]
fn composition_is_repeatable() {
    let record = sample_loop();
    assert_eq!(Edition::compose(&record), Edition::compose(&record));
}

#[test]
fn edition_label_uses_last_generated_date() {
    let mut record = sample_loop();
    // 2026-10-18T09:30:00Z
    record.last_generated_at = Some(1_792_315_800_000);

    let edition = Edition::compose(&record);

    assert_eq!(edition.edition_label, "October 18, 2026");
    assert_eq!(edition.sections.len(), 1);
}

#[test]
fn dashboard_cards_cover_every_loop() {
    let cards = summarize(&[sample_loop(), Loop::new("loop-2", "Empty")]);
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].avatar_preview.len(), 2);
    assert_eq!(cards[0].hidden_member_count, 0);
    assert!(cards[1].avatar_preview.is_empty());
}

use loopletter_core::{
    FormState, InMemoryLoopRepository, Loop, LoopCommit, Member, Question, RespondError,
    Response, ResponseForm, SequentialIdGenerator,
};

fn member(id: &str, name: &str) -> Member {
    Member {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{name}@example.com").to_lowercase(),
        avatar: format!("{id}.png"),
    }
}

fn question(id: &str, text: &str) -> Question {
    Question {
        id: id.to_string(),
        text: text.to_string(),
    }
}

fn family_loop() -> Loop {
    let mut record = Loop::new("loop-1", "Family");
    record.members = vec![member("m-1", "Ada"), member("m-2", "Grace")];
    record.questions = vec![question("q-1", "Highlights?"), question("q-2", "Plans?")];
    record
}

#[test]
fn submit_without_identity_is_rejected_regardless_of_answers() {
    let mut form = ResponseForm::new(&family_loop());
    form.set_answer("q-1", "Lots of news");
    form.set_answer("q-2", "Holiday");

    assert!(!form.can_submit());
    let mut ids = SequentialIdGenerator::new("r");
    let mut sink: Vec<Response> = Vec::new();
    let err = form.submit(&mut ids, &mut sink).unwrap_err();

    assert_eq!(err, RespondError::NoMemberSelected);
    assert!(sink.is_empty());
    assert_eq!(form.state(), FormState::Answering);
}

#[test]
fn submit_with_only_blank_answers_is_rejected() {
    let mut form = ResponseForm::new(&family_loop());
    form.select_member("m-1").unwrap();
    assert!(!form.can_submit());

    form.set_answer("q-1", " \n ");
    assert!(!form.can_submit());

    let mut ids = SequentialIdGenerator::new("r");
    let mut sink: Vec<Response> = Vec::new();
    assert_eq!(
        form.submit(&mut ids, &mut sink),
        Err(RespondError::NoAnswers)
    );
}

#[test]
fn blank_answers_are_dropped_and_raw_text_is_kept() {
    let mut form = ResponseForm::new(&family_loop());
    form.select_member("m-2").unwrap();
    form.set_answer("q-1", "  ");
    form.set_answer("q-2", "hello");
    assert!(form.can_submit());

    let mut ids = SequentialIdGenerator::new("r");
    let mut sink: Vec<Response> = Vec::new();
    let emitted = form.submit(&mut ids, &mut sink).unwrap();

    assert_eq!(emitted, 1);
    assert_eq!(
        sink,
        vec![Response {
            id: "r-1".to_string(),
            member_id: "m-2".to_string(),
            question_id: "q-2".to_string(),
            answer: "hello".to_string(),
        }]
    );
    assert_eq!(form.state(), FormState::Submitted);
}

#[test]
fn untrimmed_answer_text_is_emitted_verbatim() {
    let mut form = ResponseForm::new(&family_loop());
    form.select_member("m-1").unwrap();
    form.set_answer("q-1", "  padded answer \n");

    let mut ids = SequentialIdGenerator::new("r");
    let mut sink: Vec<Response> = Vec::new();
    form.submit(&mut ids, &mut sink).unwrap();

    assert_eq!(sink[0].answer, "  padded answer \n");
}

#[test]
fn submitted_responses_append_to_stored_loop() {
    let mut repo = InMemoryLoopRepository::new();
    repo.save_loop(family_loop()).unwrap();
    let snapshot = repo.get("loop-1").unwrap().clone();

    let mut form = ResponseForm::new(&snapshot);
    form.select_member("m-1").unwrap();
    form.set_answer("q-2", "Trip to Lisbon");
    form.set_answer("q-1", "New puppy");

    let mut ids = SequentialIdGenerator::new("r");
    {
        let mut sink = repo.response_sink("loop-1").unwrap();
        assert_eq!(form.submit(&mut ids, &mut sink), Ok(2));
    }

    let stored = repo.get("loop-1").unwrap();
    let question_order = stored
        .responses
        .iter()
        .map(|response| response.question_id.as_str())
        .collect::<Vec<_>>();
    assert_eq!(question_order, vec!["q-2", "q-1"]);
    assert!(stored.responses.iter().all(|r| r.member_id == "m-1"));
}

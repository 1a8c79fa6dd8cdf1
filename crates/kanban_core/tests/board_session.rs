mod common;

use common::{seeded_repo, session_over, session_with_prompt, started_session};
use kanban_core::{
    BoardCommand, CloseReason, ColumnId, ConfirmPrompt, DragEvent, FormInput, FormMode,
    KeyPress, KvStore, MemoryKvStore, ModalState, NoticeKind, TASKS_KEY,
};
use std::cell::RefCell;
use std::rc::Rc;

fn column(id: &str) -> ColumnId {
    ColumnId::new(id)
}

fn drag(task_id: u64, generation: u64) -> BoardCommand {
    BoardCommand::Drag(DragEvent::Start {
        task_id,
        generation,
    })
}

#[test]
fn start_renders_seeded_board() {
    let session = started_session();
    let view = session.view();

    assert_eq!(view.generation, 1);
    assert_eq!(view.count_in(&column("1")), 2);
    assert_eq!(view.total_cards(), 6);
    assert_eq!(view.columns[0].heading(), "Today (2)");
    assert_eq!(session.drag().bound_generation(), 1);
    assert!(session.notice().is_none());
}

#[test]
fn create_through_form_adds_card_to_column() {
    let mut session = started_session();
    let repo_size = session.repo().len();
    let column_count = session.view().count_in(&column("2"));

    session.dispatch(BoardCommand::OpenCreate { column: None });
    assert_eq!(session.form().state(), ModalState::Open(FormMode::Create));
    let input = FormInput {
        title: "Draft release notes".to_string(),
        priority: "medium".to_string(),
        column: "2".to_string(),
        ..session.form().fields().clone()
    };
    let notice = session.dispatch(BoardCommand::SubmitForm(input)).unwrap();

    assert_eq!(notice.kind, NoticeKind::Success);
    assert_eq!(session.repo().len(), repo_size + 1);
    assert_eq!(session.view().count_in(&column("2")), column_count + 1);
    let (placed_in, card) = session.view().card(7).unwrap();
    assert_eq!(placed_in.id, column("2"));
    assert_eq!(card.title, "Draft release notes");
    assert!(!session.form().is_open());
}

#[test]
fn column_add_button_preselects_column() {
    let mut session = started_session();
    session.dispatch(BoardCommand::OpenCreate {
        column: Some(column("4")),
    });

    assert_eq!(session.form().fields().column, "4");
    assert_eq!(session.form().fields().comments, "0");
}

#[test]
fn blank_title_keeps_modal_open_with_input() {
    let mut session = started_session();
    session.dispatch(BoardCommand::OpenCreate { column: None });
    let input = FormInput {
        title: "   ".to_string(),
        description: "draft body".to_string(),
        ..FormInput::default()
    };

    let notice = session.dispatch(BoardCommand::SubmitForm(input)).unwrap();

    assert!(notice.is_error());
    assert!(session.form().is_open());
    assert_eq!(session.form().fields().description, "draft body");
    assert_eq!(session.repo().len(), 6);
    assert_eq!(session.view().generation, 1);
}

#[test]
fn edit_prefills_and_updates_task() {
    let mut session = started_session();
    session.dispatch(BoardCommand::OpenEdit(4));

    assert_eq!(session.form().state(), ModalState::Open(FormMode::Edit(4)));
    let prefilled = session.form().fields().clone();
    assert_eq!(prefilled.priority, "low");
    assert_eq!(prefilled.column, "3");
    assert_eq!(prefilled.attachments, "6");

    let input = FormInput {
        title: "Docs, second pass".to_string(),
        comments: "4 more".to_string(),
        attachments: "-1".to_string(),
        ..prefilled
    };
    session.dispatch(BoardCommand::SubmitForm(input));

    let task = session.repo().get(4).unwrap();
    assert_eq!(task.title, "Docs, second pass");
    assert_eq!((task.comments, task.attachments), (4, 0));
    assert_eq!(task.column, column("3"));
    assert_eq!(session.view().card(4).unwrap().1.title, "Docs, second pass");
}

#[test]
fn edit_of_missing_task_reports_not_found() {
    let mut session = started_session();
    let notice = session.dispatch(BoardCommand::OpenEdit(404)).unwrap();

    assert!(notice.is_error());
    assert!(!session.form().is_open());
}

#[test]
fn cancel_paths_close_without_saving() {
    let mut session = started_session();
    for reason in [CloseReason::Cancel, CloseReason::ClickOutside] {
        session.dispatch(BoardCommand::OpenEdit(1));
        session.dispatch(BoardCommand::CloseModal(reason));
        assert!(!session.form().is_open());
    }
    assert_eq!(session.view().generation, 1);
    assert_eq!(session.repo().get(1).unwrap().comments, 3);
}

#[test]
fn keyboard_shortcuts_open_and_close_modal() {
    let mut session = started_session();

    session.dispatch(BoardCommand::Key(KeyPress::new("n", false)));
    assert!(!session.form().is_open());

    session.dispatch(BoardCommand::Key(KeyPress::new("n", true)));
    assert_eq!(session.form().state(), ModalState::Open(FormMode::Create));

    session.dispatch(BoardCommand::Key(KeyPress::new("Escape", false)));
    assert!(!session.form().is_open());
}

#[test]
fn submit_without_open_modal_is_ignored() {
    let mut session = started_session();
    let input = FormInput {
        title: "sneaky".to_string(),
        ..FormInput::default()
    };
    assert!(session.dispatch(BoardCommand::SubmitForm(input)).is_none());
    assert_eq!(session.repo().len(), 6);
}

#[test]
fn drag_between_columns_moves_counts() {
    let mut session = started_session();
    let before = session.repo().get(1).unwrap().updated_at;
    let generation = session.view().generation;

    session.dispatch(drag(1, generation));
    session.dispatch(BoardCommand::Drag(DragEvent::Enter(column("2"))));
    session.dispatch(BoardCommand::Drag(DragEvent::Leave(column("2"))));
    session.dispatch(BoardCommand::Drag(DragEvent::Enter(column("3"))));
    assert_eq!(session.drag().affordances().lifted, Some(1));
    let notice = session
        .dispatch(BoardCommand::Drag(DragEvent::Drop(column("3"))))
        .unwrap();

    assert_eq!(notice.kind, NoticeKind::Success);
    let task = session.repo().get(1).unwrap();
    assert_eq!(task.column, column("3"));
    assert!(task.updated_at > before);
    assert_eq!(session.view().count_in(&column("1")), 1);
    assert_eq!(session.view().count_in(&column("3")), 2);
    assert!(!session.drag().is_dragging());
    assert_eq!(session.drag().affordances().drop_target, None);
    assert_eq!(session.drag().bound_generation(), generation + 1);
}

#[test]
fn drop_on_same_column_clears_affordances_without_render() {
    let mut session = started_session();
    let before = session.repo().get(5).unwrap().clone();

    session.dispatch(drag(5, 1));
    session.dispatch(BoardCommand::Drag(DragEvent::Enter(column("4"))));
    let notice = session.dispatch(BoardCommand::Drag(DragEvent::Drop(column("4"))));

    assert!(notice.is_none());
    assert_eq!(session.repo().get(5).unwrap(), &before);
    assert_eq!(session.view().generation, 1);
    assert!(!session.drag().is_dragging());
}

#[test]
fn drag_from_stale_render_is_ignored() {
    let mut session = started_session();
    session.dispatch(BoardCommand::Delete(6));
    assert_eq!(session.view().generation, 2);

    session.dispatch(drag(1, 1));
    assert!(!session.drag().is_dragging());

    session.dispatch(drag(1, 2));
    assert!(session.drag().is_dragging());
    session.dispatch(BoardCommand::Drag(DragEvent::End));
    assert!(!session.drag().is_dragging());
    assert_eq!(session.repo().get(1).unwrap().column, column("1"));
}

struct RecordingPrompt {
    answer: bool,
    asked: Rc<RefCell<Vec<String>>>,
}

impl ConfirmPrompt for RecordingPrompt {
    fn confirm(&mut self, message: &str) -> bool {
        self.asked.borrow_mut().push(message.to_string());
        self.answer
    }
}

#[test]
fn declined_delete_keeps_task() {
    let asked = Rc::new(RefCell::new(Vec::new()));
    let mut session = session_with_prompt(Box::new(RecordingPrompt {
        answer: false,
        asked: Rc::clone(&asked),
    }));

    let notice = session.dispatch(BoardCommand::Delete(2));

    assert!(notice.is_none());
    assert_eq!(asked.borrow().len(), 1);
    assert!(session.repo().get(2).is_ok());
}

#[test]
fn confirmed_delete_removes_card() {
    let mut session = started_session();

    let notice = session.dispatch(BoardCommand::Delete(2)).unwrap();

    assert_eq!(notice.kind, NoticeKind::Success);
    assert!(session.view().card(2).is_none());
    assert_eq!(session.view().count_in(&column("1")), 1);

    let missing = session.dispatch(BoardCommand::Delete(2)).unwrap();
    assert!(missing.is_error());
}

#[test]
fn failed_save_warns_but_keeps_new_card() {
    let mut kv = seeded_repo().store().kv().clone();
    kv.set_quota(Some(kv.used_bytes()));
    let mut session = session_over(kv);
    assert!(session.notice().is_none());

    session.dispatch(BoardCommand::OpenCreate { column: None });
    let input = FormInput {
        title: "Does not fit".to_string(),
        description: "x".repeat(64),
        ..session.form().fields().clone()
    };
    let notice = session.dispatch(BoardCommand::SubmitForm(input)).unwrap();

    assert_eq!(notice.kind, NoticeKind::Warning);
    assert_eq!(session.notice(), Some(&notice));
    assert_eq!(session.repo().len(), 7);
    let (placed_in, card) = session.view().card(7).unwrap();
    assert_eq!(placed_in.id, column("1"));
    assert_eq!(card.title, "Does not fit");
    assert!(!session.form().is_open());
}

#[test]
fn unsaved_first_run_board_warns() {
    let session = session_over(MemoryKvStore::with_quota(16));

    assert_eq!(session.notice().unwrap().kind, NoticeKind::Warning);
    assert_eq!(session.view().total_cards(), 6);
}

#[test]
fn unreadable_board_shows_error_and_examples() {
    let mut kv = MemoryKvStore::new();
    kv.set(TASKS_KEY, "{not json").unwrap();

    let session = session_over(kv);

    let notice = session.notice().unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
    assert!(notice.is_error());
    assert_eq!(session.view().total_cards(), 6);
    assert_eq!(session.view().count_in(&column("1")), 2);
    assert_eq!(session.view().generation, 1);
}

#[test]
fn drag_of_unrendered_task_never_lifts() {
    let mut session = started_session();

    session.dispatch(drag(42, session.view().generation));

    assert!(!session.drag().is_dragging());
    assert_eq!(session.drag().affordances().lifted, None);
}

#![allow(dead_code)]

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use kanban_core::{
    AlwaysConfirm, BoardSession, BoardStore, ConfirmPrompt, MemoryKvStore, TaskRepository,
};
use mockable::Clock;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Clock advancing one second per reading.
#[derive(Debug, Clone)]
pub struct StepClock {
    base: DateTime<Utc>,
    ticks: Arc<AtomicI64>,
}

impl StepClock {
    pub fn new() -> Self {
        Self {
            base: Utc.with_ymd_and_hms(2026, 10, 17, 9, 0, 0).unwrap(),
            ticks: Arc::new(AtomicI64::new(0)),
        }
    }
}

impl Clock for StepClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        self.base + Duration::seconds(tick)
    }
}

pub fn memory_repo(kv: MemoryKvStore) -> TaskRepository<MemoryKvStore, StepClock> {
    TaskRepository::new(BoardStore::new(kv), StepClock::new())
}

pub fn seeded_repo() -> TaskRepository<MemoryKvStore, StepClock> {
    let mut repo = memory_repo(MemoryKvStore::new());
    let report = repo.initialize();
    assert!(report.storage_error.is_none());
    repo
}

pub fn started_session() -> BoardSession<MemoryKvStore, StepClock> {
    session_with_prompt(Box::new(AlwaysConfirm))
}

pub fn session_with_prompt(
    prompt: Box<dyn ConfirmPrompt>,
) -> BoardSession<MemoryKvStore, StepClock> {
    let mut session = BoardSession::new(memory_repo(MemoryKvStore::new()), prompt);
    let _ = session.start();
    session
}

/// Starts a session over an already prepared store.
pub fn session_over(kv: MemoryKvStore) -> BoardSession<MemoryKvStore, StepClock> {
    let mut session = BoardSession::new(memory_repo(kv), Box::new(AlwaysConfirm));
    let _ = session.start();
    session
}

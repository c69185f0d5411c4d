use crate::core::processor::LineProcessor;
use crate::domain::model::{BatchOutcome, EmployeeRecord, Manager};
use crate::domain::ports::ManagerLookup;
use crate::domain::rejection::RejectedLine;
use crate::utils::error::Result;
use std::collections::HashMap;

/// Manager lookup over this run's accepted managers, then the durable store.
struct RunManagers<'a, L: ManagerLookup + ?Sized> {
    accepted: &'a HashMap<String, Manager>,
    store: &'a L,
}

impl<L: ManagerLookup + ?Sized> ManagerLookup for RunManagers<'_, L> {
    fn find_manager(&self, id: &str) -> Result<Option<Manager>> {
        if let Some(manager) = self.accepted.get(id) {
            return Ok(Some(manager.clone()));
        }
        self.store.find_manager(id)
    }
}

/// Runs [`LineProcessor`] over every line of one input, in order.
///
/// The runner itself holds no state between runs: the accepted records, the
/// rejections and the managers seen so far all live inside a single `run`.
pub struct BatchRunner<'s, L: ManagerLookup + ?Sized> {
    store: &'s L,
}

impl<'s, L: ManagerLookup + ?Sized> BatchRunner<'s, L> {
    pub fn new(store: &'s L) -> Self {
        Self { store }
    }

    pub fn run<I, S>(&self, lines: I) -> BatchOutcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.run_with(lines, |_| {})
    }

    /// Like [`run`](Self::run), also handing each rejection to `on_reject` as it happens.
    pub fn run_with<I, S, F>(&self, lines: I, mut on_reject: F) -> BatchOutcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: FnMut(&RejectedLine),
    {
        let mut outcome = BatchOutcome::default();
        let mut accepted_managers: HashMap<String, Manager> = HashMap::new();

        for (index, line) in lines.into_iter().enumerate() {
            let line_number = index + 1;
            let raw = line.as_ref();

            let managers = RunManagers {
                accepted: &accepted_managers,
                store: self.store,
            };

            let result = LineProcessor::new(&managers).process(raw);
            match result {
                Ok(record) => {
                    tracing::debug!(line = line_number, kind = %record.kind(), id = record.id(), "Accepted");
                    if let EmployeeRecord::Manager(manager) = &record {
                        accepted_managers.insert(manager.id().to_string(), manager.clone());
                    }
                    outcome.records.push(record);
                }
                Err(reason) => {
                    let rejected = RejectedLine {
                        line_number,
                        raw: raw.to_string(),
                        reason,
                    };
                    tracing::warn!(
                        line = line_number,
                        code = rejected.reason.code(),
                        stage = ?rejected.reason.stage(),
                        "{}",
                        rejected
                    );
                    on_reject(&rejected);
                    outcome.rejections.push(rejected);
                }
            }
        }

        tracing::info!(
            "Batch finished: {} accepted, {} rejected",
            outcome.accepted_count(),
            outcome.rejected_count()
        );
        outcome
    }
}

use anyhow::Result;

use crate::config::AppConfig;
use crate::model::{Category, TaskStore};
use crate::mutation::{self, Intent, ValidationError};
use crate::persistence::{PersistenceError, PersistenceGateway};

/// What happened to the backing store as a result of an intent.
#[derive(Debug)]
pub enum Change {
    Rejected(ValidationError),
    Unchanged,
    Saved(Category),
    Unsaved(Category, PersistenceError),
}

#[derive(Debug)]
pub struct MutationOutcome {
    pub store: TaskStore,
    pub change: Change,
}

impl MutationOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self.change, Change::Saved(_))
    }
}

/// Single writer for task snapshots: applies an intent, then saves the touched category once.
pub struct TasksService {
    gateway: PersistenceGateway,
}

impl TasksService {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let gateway = PersistenceGateway::open(config)?;
        Ok(Self { gateway })
    }

    pub fn with_gateway(gateway: PersistenceGateway) -> Self {
        Self { gateway }
    }

    pub fn load(&self) -> TaskStore {
        self.gateway.load()
    }

    pub fn apply(
        &mut self,
        store: &TaskStore,
        category: Category,
        intent: Intent,
    ) -> MutationOutcome {
        let name = intent.name();
        let applied = match mutation::apply(store, category, intent) {
            Ok(applied) => applied,
            Err(err) => {
                tracing::debug!(intent = name, %category, error = %err, "intent rejected");
                return MutationOutcome {
                    store: store.clone(),
                    change: Change::Rejected(err),
                };
            }
        };

        if !applied.list_changed {
            return MutationOutcome {
                store: applied.store,
                change: Change::Unchanged,
            };
        }

        let change = match self.persist(&applied.store, category) {
            Ok(()) => {
                tracing::info!(intent = name, %category, "task list saved");
                Change::Saved(category)
            }
            Err(err) => {
                tracing::warn!(intent = name, %category, error = %err, "task list not saved");
                Change::Unsaved(category, err)
            }
        };
        MutationOutcome {
            store: applied.store,
            change,
        }
    }

    pub fn add_task(&mut self, store: &TaskStore, text: &str) -> MutationOutcome {
        self.apply(store, store.selected_category(), Intent::Add(text.to_string()))
    }

    pub fn delete_task(&mut self, store: &TaskStore, task: &str) -> MutationOutcome {
        self.apply(
            store,
            store.selected_category(),
            Intent::Delete(task.to_string()),
        )
    }

    pub fn reorder_task(&mut self, store: &TaskStore, from: usize, to: usize) -> MutationOutcome {
        self.apply(store, store.selected_category(), Intent::Reorder { from, to })
    }

    pub fn edit_task(&mut self, store: &TaskStore, text: &str, index: usize) -> MutationOutcome {
        self.apply(
            store,
            store.selected_category(),
            Intent::Edit {
                index,
                text: text.to_string(),
            },
        )
    }

    /// Write `category` from `store` again, e.g. after an earlier save failed.
    pub fn persist(
        &mut self,
        store: &TaskStore,
        category: Category,
    ) -> Result<(), PersistenceError> {
        self.gateway.save(category, store.tasks(category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{KeyValueStore, MemoryStore};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::TempDir;

    fn service_with_temp_dir() -> (TasksService, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig::from_data_dir(temp_dir.path().to_path_buf()).unwrap();
        let service = TasksService::new(&config).unwrap();
        (service, temp_dir)
    }

    /// Counts writes so tests can assert exactly one save per accepted intent.
    #[derive(Clone, Default)]
    struct CountingStore {
        inner: Rc<RefCell<MemoryStore>>,
        writes: Rc<RefCell<Vec<String>>>,
    }

    impl KeyValueStore for CountingStore {
        fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
            self.inner.borrow().get(key)
        }

        fn put(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
            self.writes.borrow_mut().push(key.to_string());
            self.inner.borrow_mut().put(key, value)
        }
    }

    #[test]
    fn accepted_intents_save_exactly_once() {
        let counting = CountingStore::default();
        let writes = counting.writes.clone();
        let mut service = TasksService::with_gateway(PersistenceGateway::new(counting));
        let store = service.load().with_selected(Category::Work);

        let outcome = service.add_task(&store, "Ship it");
        assert!(outcome.is_saved());
        assert_eq!(*writes.borrow(), vec!["work_tasks".to_string()]);

        let outcome = service.add_task(&outcome.store, "   ");
        assert!(matches!(
            outcome.change,
            Change::Rejected(ValidationError::EmptyText)
        ));
        let outcome = service.delete_task(&outcome.store, "missing");
        assert!(matches!(outcome.change, Change::Unchanged));
        assert_eq!(writes.borrow().len(), 1);
    }

    #[test]
    fn changes_survive_reload() {
        let (mut service, _guard) = service_with_temp_dir();
        let store = service.load();
        let store = service.add_task(&store, "A").store;
        let store = service.add_task(&store, "B").store;
        let store = service.add_task(&store, "C").store;
        let store = service.reorder_task(&store, 0, 2).store;
        let store = service.edit_task(&store, "Bee", 0).store;
        assert_eq!(store.current_tasks(), ["Bee", "C", "A"].map(String::from).as_slice());

        let reloaded = service.load();
        assert_eq!(reloaded.tasks(Category::Personal), store.current_tasks());
    }

    #[test]
    fn persist_retries_a_category() {
        let mut service = TasksService::with_gateway(PersistenceGateway::in_memory());
        let store = TaskStore::default().replace_tasks(Category::Other, vec!["x".into()]);
        service.persist(&store, Category::Other).unwrap();
        assert_eq!(service.load().tasks(Category::Other), ["x".to_string()]);
    }
}

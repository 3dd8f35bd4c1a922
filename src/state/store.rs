use std::fmt;
use std::path::Path;

use tracing::{debug, warn};

use crate::data::loader::{self, LoadOptions};
use crate::data::{AxisRange, Dataset, Row};
use crate::error::Result;
use crate::state::app_state::{Action, AppState, Change};
use crate::state::plot::Plot;

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(Change, &AppState)>;

/// Owns the [`AppState`] and tells subscribers about every change.
///
/// All mutation goes through [`Store::dispatch`]; subscribers run after the
/// action has been fully applied and only if something actually changed.
pub struct Store {
    state: AppState,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) -> Option<Change> {
        debug!("Dispatching {:?}", ActionName(&action));
        let change = self.state.apply(action)?;
        for (_, subscriber) in &mut self.subscribers {
            subscriber(change, &self.state);
        }
        Some(change)
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(Change, &AppState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Load a CSV file and make it the current dataset. On failure the
    /// current state is left untouched. Returns the number of rows loaded.
    pub fn load_file(&mut self, path: &Path, options: &LoadOptions) -> Result<usize> {
        match loader::load_file(path, options) {
            Ok(dataset) => Ok(self.replace_dataset(dataset)),
            Err(e) => {
                warn!("Rejected upload {:?}: {}", path, e);
                Err(e)
            }
        }
    }

    pub fn replace_dataset(&mut self, dataset: Dataset) -> usize {
        let rows = dataset.len();
        self.dispatch(Action::SetRows(dataset));
        rows
    }

    pub fn rows(&self) -> &[Row] {
        self.state.rows()
    }

    pub fn available_columns(&self) -> Vec<String> {
        self.state.available_columns()
    }

    pub fn plots(&self) -> &[Plot] {
        self.state.plots()
    }

    pub fn focused_plot(&self) -> Option<&Plot> {
        self.state.focused_plot()
    }

    pub fn selection(&self) -> Option<AxisRange> {
        self.state.selection()
    }

    pub fn zoom_domain(&self) -> Option<AxisRange> {
        self.state.zoom_domain()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

/// Logs an action without dumping a whole dataset.
struct ActionName<'a>(&'a Action);

impl fmt::Debug for ActionName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Action::SetRows(ds) => write!(f, "SetRows({} rows)", ds.len()),
            other => write!(f, "{:?}", other),
        }
    }
}

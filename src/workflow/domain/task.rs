//! Task record and its carry and removal rules.

use super::TaskId;
use serde::{Deserialize, Serialize};

/// Highest page from which a task may still be carried.
///
/// A fresh task sits on page 0, so a task can be carried at most twice.
pub const LAST_CARRYABLE_PAGE: u32 = 1;

/// Page reached by a task after its final carry.
pub const FINAL_PAGE: u32 = LAST_CARRYABLE_PAGE + 1;

/// A single work item inside a tasks list.
///
/// `ticked` and `removed` are terminal with respect to the active workflow;
/// `carried` only lasts until the next page rollover. Updates consume the
/// record and return a new one so snapshots handed out earlier never change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    content: String,
    #[serde(default)]
    ticked: bool,
    #[serde(default)]
    carried: bool,
    #[serde(default)]
    removed: bool,
    #[serde(default)]
    page: u32,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted text content.
    pub content: String,
    /// Whether the task was ticked.
    pub ticked: bool,
    /// Whether the task was carried in the current cycle.
    pub carried: bool,
    /// Whether the task was removed.
    pub removed: bool,
    /// Number of carries applied so far.
    pub page: u32,
}

impl Task {
    /// Creates an untouched task on page 0.
    #[must_use]
    pub fn new(id: TaskId, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            ticked: false,
            carried: false,
            removed: false,
            page: 0,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            content: data.content,
            ticked: data.ticked,
            carried: data.carried,
            removed: data.removed,
            page: data.page,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the text content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns `true` once the user marked the task complete.
    #[must_use]
    pub const fn is_ticked(&self) -> bool {
        self.ticked
    }

    /// Returns `true` while the task is deferred in the current cycle.
    #[must_use]
    pub const fn is_carried(&self) -> bool {
        self.carried
    }

    /// Returns `true` once the user discarded the task.
    #[must_use]
    pub const fn is_removed(&self) -> bool {
        self.removed
    }

    /// Returns the number of carries applied so far.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Returns `true` when the task is neither ticked nor removed.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !self.ticked && !self.removed
    }

    /// Returns `true` when the task was ticked, removed or carried.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.ticked || self.removed || self.carried
    }

    /// Returns `true` when the task may be ticked.
    ///
    /// A task carried in the current cycle is already decided and stays
    /// untickable until the page rolls over.
    #[must_use]
    pub const fn can_tick(&self) -> bool {
        !self.carried && !self.ticked && !self.removed
    }

    /// Returns `true` when the task may be carried into the next cycle.
    #[must_use]
    pub const fn can_carry(&self) -> bool {
        self.page <= LAST_CARRYABLE_PAGE && !self.ticked && !self.removed && !self.carried
    }

    /// Returns `true` when the task may be discarded.
    #[must_use]
    pub const fn can_remove(&self) -> bool {
        !self.carried && !self.ticked && !self.removed
    }

    /// Marks the task complete.
    #[must_use]
    pub const fn tick(mut self) -> Self {
        self.ticked = true;
        self
    }

    /// Defers the task into the next cycle.
    ///
    /// The carry only applies while [`Task::can_carry`] holds; otherwise the
    /// task is returned unchanged.
    #[must_use]
    pub const fn carry(mut self) -> Self {
        if self.can_carry() {
            self.carried = true;
            self.page += 1;
        }
        self
    }

    /// Discards the task.
    #[must_use]
    pub const fn remove(mut self) -> Self {
        self.removed = true;
        self
    }

    /// Returns `true` when the task is kept by a page rollover.
    ///
    /// Ticked and removed tasks are dropped. Tasks on page 0 or 1 are kept,
    /// as are tasks that reached the final page by a carry in this cycle.
    #[must_use]
    pub const fn survives_rollover(&self) -> bool {
        self.is_active()
            && (self.page <= LAST_CARRYABLE_PAGE || (self.page == FINAL_PAGE && self.carried))
    }

    /// Clears the transient carry flag at a cycle boundary.
    #[must_use]
    pub const fn clear_carry(mut self) -> Self {
        self.carried = false;
        self
    }
}

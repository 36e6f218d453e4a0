//! Persistent task store.
//!
//! The `Store` owns the ordered task list and the JSON file it mirrors. Ids are
//! positional: the task at index `i` always has id `i + 1`, and a delete
//! renumbers everything after it. Every mutation rewrites the whole file and is
//! rolled back in memory if that write fails, so the two copies never diverge.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::fields::Status;
use crate::task::{now, Task, TaskId};

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Task not found: {0}")]
    NotFound(String),

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Task file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON serialization error: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// In-memory task list backed by a single JSON file.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    tasks: Vec<Task>,
}

impl Store {
    /// Load the store from `path`, creating an empty task file if none exists yet.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
            }
            let store = Store { path, tasks: Vec::new() };
            store.save()?;
            info!(path = %store.path.display(), "created empty task file");
            return Ok(store);
        }

        let raw = fs::read_to_string(&path).map_err(|e| StoreError::io(&path, e))?;
        let mut tasks: Vec<Task> = serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
            path: path.clone(),
            source,
        })?;

        if tasks.iter().enumerate().any(|(i, t)| t.id != i as TaskId + 1) {
            warn!(path = %path.display(), "task ids are not contiguous; renumbering by list position");
            for (i, task) in tasks.iter_mut().enumerate() {
                task.id = i as TaskId + 1;
            }
        }
        debug!(path = %path.display(), count = tasks.len(), "loaded tasks");
        Ok(Store { path, tasks })
    }

    /// Path of the backing task file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// All tasks in id order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Tasks in id order, optionally restricted to one status.
    pub fn list(&self, status: Option<Status>) -> impl Iterator<Item = &Task> + '_ {
        self.tasks
            .iter()
            .filter(move |t| status.map_or(true, |s| t.status == s))
    }

    /// Get a task by id.
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.index_of(id).ok().map(|i| &self.tasks[i])
    }

    /// Append a new `todo` task and return its id.
    pub fn add(&mut self, description: impl Into<String>) -> Result<TaskId> {
        let id = self.tasks.len() as TaskId + 1;
        let task = Task::new(id, description.into(), now());
        self.commit(|tasks| tasks.push(task))?;
        info!(id, "added task");
        Ok(id)
    }

    /// Replace the description of task `id`.
    pub fn update_description(&mut self, id: TaskId, description: impl Into<String>) -> Result<()> {
        let idx = self.index_of(id)?;
        let description = description.into();
        self.commit(|tasks| {
            let t = &mut tasks[idx];
            t.description = description;
            t.updated_at = Some(now());
        })?;
        info!(id, "updated task description");
        Ok(())
    }

    /// Set the status of task `id`.
    pub fn update_status(&mut self, id: TaskId, status: Status) -> Result<()> {
        let idx = self.index_of(id)?;
        self.commit(|tasks| {
            let t = &mut tasks[idx];
            t.status = status;
            t.updated_at = Some(now());
        })?;
        info!(id, %status, "updated task status");
        Ok(())
    }

    /// Remove task `id` and renumber the tasks after it.
    pub fn delete(&mut self, id: TaskId) -> Result<()> {
        let idx = self.index_of(id)?;
        self.commit(|tasks| {
            tasks.remove(idx);
            for (i, t) in tasks.iter_mut().enumerate().skip(idx) {
                t.id = i as TaskId + 1;
            }
        })?;
        info!(id, remaining = self.tasks.len(), "deleted task");
        Ok(())
    }

    fn index_of(&self, id: TaskId) -> Result<usize> {
        match usize::try_from(id) {
            Ok(n) if n >= 1 && n <= self.tasks.len() => Ok(n - 1),
            _ => Err(StoreError::NotFound(id.to_string())),
        }
    }

    /// Apply `mutate` and persist, restoring the previous list if the write fails.
    fn commit(&mut self, mutate: impl FnOnce(&mut Vec<Task>)) -> Result<()> {
        let snapshot = self.tasks.clone();
        mutate(&mut self.tasks);
        if let Err(e) = self.save() {
            warn!(error = %e, "persisting tasks failed; rolling back");
            self.tasks = snapshot;
            return Err(e);
        }
        Ok(())
    }

    /// Overwrite the task file with the full list (temp file + rename).
    fn save(&self) -> Result<()> {
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        self.tasks.serialize(&mut ser).map_err(StoreError::Serialize)?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &buf).map_err(|e| StoreError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| StoreError::io(&self.path, e))?;
        debug!(path = %self.path.display(), count = self.tasks.len(), "saved tasks");
        Ok(())
    }
}

use std::fmt;

use tracing::debug;

use crate::process::Pid;

pub mod format;

/// Number of job slots used when nothing else is configured.
pub const DEFAULT_CAPACITY: usize = 100;

/// Identifier shown to the user as `[<id>]`. Always positive.
pub type JobId = usize;

#[derive(Debug)]
pub enum JobError {
    TableFull { capacity: usize },
}

impl fmt::Display for JobError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobError::TableFull { capacity } => {
                write!(f, "job table full (capacity {})", capacity)
            }
        }
    }
}

impl std::error::Error for JobError {}

/// Result of checking on a child without blocking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStatus {
    Running,
    Exited,
}

/// Non-blocking status check for a child process.
pub trait ExitPoller {
    fn poll(&mut self, pid: Pid) -> PollStatus;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub id: JobId,
    pub pid: Pid,
    pub command: String,
    pub is_background: bool,
    pub is_done: bool,
}

impl Job {
    /// The row this job contributes to the `jobs` listing.
    pub fn status_line(&self) -> String {
        if self.is_done {
            format::done_line(self.id, &self.command)
        } else {
            format::running_line(self.id, self.pid, &self.command)
        }
    }
}

/// Bounded set of job slots.
///
/// New jobs take the first free slot and the next value of a counter that
/// only ever moves forward, so two live jobs never share an id. Slots are
/// never compacted; listing follows slot order.
#[derive(Debug)]
pub struct JobTable {
    slots: Vec<Option<Job>>,
    next_job_id: JobId,
}

impl Default for JobTable {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl JobTable {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            next_job_id: 1,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn next_job_id(&self) -> JobId {
        self.next_job_id
    }

    pub fn get(&self, id: JobId) -> Option<&Job> {
        self.slots.iter().flatten().find(|job| job.id == id)
    }

    /// Records a job in the first free slot and returns its id.
    ///
    /// A full table is left untouched, including the id counter.
    pub fn add(&mut self, pid: Pid, command: &str, is_background: bool) -> Result<JobId, JobError> {
        let capacity = self.capacity();
        let slot = self
            .slots
            .iter_mut()
            .find(|slot| slot.is_none())
            .ok_or(JobError::TableFull { capacity })?;

        let id = self.next_job_id;
        self.next_job_id += 1;
        *slot = Some(Job {
            id,
            pid,
            command: command.to_owned(),
            is_background,
            is_done: false,
        });
        debug!(id, %pid, command, "job added");
        Ok(id)
    }

    /// Frees the slot holding `id`. Unknown ids are ignored.
    pub fn remove(&mut self, id: JobId) {
        if let Some(slot) = self
            .slots
            .iter_mut()
            .find(|slot| matches!(slot, Some(job) if job.id == id))
        {
            *slot = None;
            debug!(id, "job removed");
        }
    }

    /// Polls every unfinished job and returns one `Done` notice per job
    /// that exited since the previous call.
    pub fn update_status<P: ExitPoller + ?Sized>(&mut self, poller: &mut P) -> Vec<String> {
        let mut notices = Vec::new();
        for job in self.slots.iter_mut().flatten() {
            if job.is_done {
                continue;
            }
            if poller.poll(job.pid) == PollStatus::Exited {
                job.is_done = true;
                debug!(id = job.id, pid = %job.pid, "job finished");
                notices.push(format::done_line(job.id, &job.command));
            }
        }
        notices
    }

    /// Lazily yields one listing row per occupied slot, in slot order.
    pub fn list(&self) -> impl Iterator<Item = String> + '_ {
        self.slots.iter().flatten().map(Job::status_line)
    }
}

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, PoisonError, RwLock},
};

use tokio::sync::{Notify, Semaphore, mpsc};

use crate::{
    lib::{CommandLine, Executor, JobDirectory, job_commands},
    model::{Job, JobId, JobTarget, JobTransitionError},
};

const INTERRUPTED: &str = "interrupted by service restart";
const CLOSED: &str = "job queue is closed";

#[derive(thiserror::Error, Debug)]
pub enum QueueError {
    #[error("Job storage failed")]
    Io(#[from] std::io::Error),
    #[error("Job metadata serialization failed")]
    Serialize(#[from] serde_json::Error),
    #[error("Job queue is closed")]
    Closed,
    #[error("Job `{0}` doesn't exist")]
    UnknownJob(JobId),
    #[error(transparent)]
    Transition(#[from] JobTransitionError),
    #[error("Worker count must be at least 1")]
    NoWorkers,
}

/// Submission accepted by the queue, sequences are already validated FASTA.
#[derive(Debug)]
pub struct NewJob {
    pub job: Job,
    pub query: String,
    pub subject: Option<String>,
    pub database_path: Option<PathBuf>,
}

struct QueuedJob {
    id: JobId,
    commands: Vec<CommandLine>,
}

struct Shared {
    work_dir: PathBuf,
    threads: u8,
    jobs: RwLock<HashMap<JobId, Job>>,
    sender: mpsc::UnboundedSender<QueuedJob>,
    finished: Notify,
}

/// Handle for submitting and tracking jobs, cheap to clone.
#[derive(Clone)]
pub struct JobQueue {
    shared: Arc<Shared>,
}

/// Runs queued jobs, never more than `worker_count` at once.
pub struct Dispatcher {
    queue: JobQueue,
    receiver: mpsc::UnboundedReceiver<QueuedJob>,
    executor: Arc<dyn Executor>,
    permits: Arc<Semaphore>,
}

impl JobQueue {
    /// Opens the work directory and restores the jobs found in it.
    ///
    /// Jobs which didn't finish before the previous shutdown are marked failed.
    pub fn new(
        work_dir: &Path,
        executor: Arc<dyn Executor>,
        worker_count: usize,
        threads: u8,
    ) -> Result<(Self, Dispatcher), QueueError> {
        if worker_count == 0 {
            return Err(QueueError::NoWorkers);
        }

        std::fs::create_dir_all(work_dir)?;

        let (sender, receiver) = mpsc::unbounded_channel();
        let queue = Self {
            shared: Arc::new(Shared {
                work_dir: work_dir.to_path_buf(),
                threads,
                jobs: RwLock::new(restore_jobs(work_dir)?),
                sender,
                finished: Notify::new(),
            }),
        };

        Ok((
            queue.clone(),
            Dispatcher {
                queue,
                receiver,
                executor,
                permits: Arc::new(Semaphore::new(worker_count)),
            },
        ))
    }

    pub fn submit(&self, new_job: NewJob) -> Result<Job, QueueError> {
        let NewJob {
            job,
            query,
            subject,
            database_path,
        } = new_job;
        let directory = self.directory(job.id);

        std::fs::create_dir_all(directory.root())?;
        std::fs::write(directory.query(), query)?;

        if let Some(subject) = subject {
            std::fs::write(directory.subject(), subject)?;
        }

        persist(&directory, &job)?;

        let commands = job_commands(
            &job,
            &directory,
            database_path.as_deref(),
            self.shared.threads,
        );

        self.shared
            .jobs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(job.id, job.clone());

        if self
            .shared
            .sender
            .send(QueuedJob {
                id: job.id,
                commands,
            })
            .is_err()
        {
            self.update(job.id, |job| job.fail(CLOSED))?;
            return Err(QueueError::Closed);
        }

        log::info!(
            "queued job {} ({} against {})",
            job.id,
            job.program,
            match &job.target {
                JobTarget::Database(name) => name.as_str(),
                JobTarget::Upload => "uploaded subject",
            }
        );

        Ok(job)
    }

    pub fn get(&self, id: JobId) -> Option<Job> {
        self.shared
            .jobs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    /// All known jobs, newest first.
    pub fn list(&self) -> Vec<Job> {
        let mut jobs: Vec<Job> = self
            .shared
            .jobs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();

        jobs.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        jobs
    }

    pub fn directory(&self, id: JobId) -> JobDirectory {
        JobDirectory::new(&self.shared.work_dir, id)
    }

    /// Resolves once the job completed or failed, `None` for unknown jobs.
    pub async fn wait(&self, id: JobId) -> Option<Job> {
        loop {
            let notified = self.shared.finished.notified();
            let job = self.get(id)?;

            if job.status.is_finished() {
                return Some(job);
            }

            notified.await;
        }
    }

    fn update<F>(&self, id: JobId, change: F) -> Result<Job, QueueError>
    where
        F: FnOnce(&mut Job) -> Result<(), JobTransitionError>,
    {
        let job = {
            let mut jobs = self
                .shared
                .jobs
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            let job = jobs.get_mut(&id).ok_or(QueueError::UnknownJob(id))?;

            change(job)?;
            job.clone()
        };

        persist(&self.directory(id), &job)?;

        if job.status.is_finished() {
            self.shared.finished.notify_waiters();
        }

        Ok(job)
    }

    async fn execute(&self, executor: Arc<dyn Executor>, queued: QueuedJob) {
        let id = queued.id;

        if let Err(err) = self.update(id, Job::start) {
            log::error!("job {} couldn't be started: {}", id, err);
            return;
        }

        log::debug!("running job {}", id);

        let commands = queued.commands;
        let outcome = tokio::task::spawn_blocking(move || {
            commands
                .iter()
                .try_for_each(|command| executor.run(command))
        })
        .await;
        let result = match outcome {
            Ok(Ok(())) => self.update(id, Job::complete),
            Ok(Err(err)) => {
                log::warn!("job {} failed: {}", id, err);
                self.update(id, |job| job.fail(err.to_string()))
            }
            Err(err) => {
                log::error!("job {} execution aborted: {}", id, err);
                self.update(id, |job| job.fail("execution aborted"))
            }
        };

        match result {
            Ok(job) => log::info!("job {} finished as {:?}", id, job.status),
            Err(err) => log::error!("job {} state couldn't be recorded: {}", id, err),
        }
    }
}

impl Dispatcher {
    pub async fn run(mut self) {
        while let Some(queued) = self.receiver.recv().await {
            let permit = match self.permits.clone().acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => break,
            };
            let queue = self.queue.clone();
            let executor = self.executor.clone();

            tokio::spawn(async move {
                queue.execute(executor, queued).await;
                drop(permit);
            });
        }

        log::debug!("job dispatcher stopped");
    }
}

fn persist(directory: &JobDirectory, job: &Job) -> Result<(), QueueError> {
    std::fs::write(directory.metadata(), serde_json::to_vec_pretty(job)?)?;

    Ok(())
}

fn restore_jobs(work_dir: &Path) -> Result<HashMap<JobId, Job>, QueueError> {
    let mut jobs = HashMap::new();

    for dir_entry in std::fs::read_dir(work_dir)?.flatten() {
        let metadata_path = dir_entry.path().join("job.json");

        if !metadata_path.is_file() {
            continue;
        }

        let mut job: Job = match std::fs::read(&metadata_path)
            .map_err(QueueError::from)
            .and_then(|contents| Ok(serde_json::from_slice(&contents)?))
        {
            Ok(job) => job,
            Err(err) => {
                log::warn!("skipping '{}': {}", metadata_path.display(), err);
                continue;
            }
        };

        if !job.status.is_finished() {
            job.fail(INTERRUPTED)?;
            persist(&JobDirectory::new(work_dir, job.id), &job)?;
        }

        jobs.insert(job.id, job);
    }

    if !jobs.is_empty() {
        log::info!("restored {} job(s) from '{}'", jobs.len(), work_dir.display());
    }

    Ok(jobs)
}

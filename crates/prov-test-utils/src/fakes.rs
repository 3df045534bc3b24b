//! Recording doubles for the copy action's collaborators.
//!
//! Both doubles write into one shared [`EventLog`], so tests can assert on
//! the relative order of pushes, remote commands and dispatches.

use prov_core::{
    CommandOutput, Connection, Error, ExecutionHarness, ExecutionRequest, RemoteDigest, Result,
    ResultRecord, TaskContext,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// One observable collaborator call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Checksum { path: String },
    Put { local: PathBuf, remote: String },
    Exec { cmd: String },
    Dispatch { module: String, args: String },
}

/// Shared, ordered record of collaborator calls.
#[derive(Debug, Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<Event>>>);

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: Event) {
        self.0.lock().expect("event log poisoned").push(event);
    }

    /// Snapshot of every event so far.
    pub fn events(&self) -> Vec<Event> {
        self.0.lock().expect("event log poisoned").clone()
    }

    /// Paths whose remote checksum was requested, in order.
    pub fn checksums(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Checksum { path } => Some(path),
                _ => None,
            })
            .collect()
    }

    /// Remote targets of file pushes, in order.
    pub fn puts(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Put { remote, .. } => Some(remote),
                _ => None,
            })
            .collect()
    }

    /// Remote commands, in order.
    pub fn execs(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Exec { cmd } => Some(cmd),
                _ => None,
            })
            .collect()
    }

    /// `(module, args)` of each delegated call, in order.
    pub fn dispatches(&self) -> Vec<(String, String)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Dispatch { module, args } => Some((module, args)),
                _ => None,
            })
            .collect()
    }

    /// Index of the first event matching `predicate`.
    pub fn position(&self, predicate: impl Fn(&Event) -> bool) -> Option<usize> {
        self.events().iter().position(predicate)
    }
}

/// A [`Connection`] that answers from a table and records every call.
///
/// Remote paths without an entry report [`RemoteDigest::Absent`]. Commands
/// succeed with empty output unless configured otherwise.
#[derive(Debug)]
pub struct RecordingConnection {
    log: EventLog,
    remote: HashMap<String, RemoteDigest>,
    exec_result: CommandOutput,
    fail_puts: bool,
}

impl RecordingConnection {
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            remote: HashMap::new(),
            exec_result: CommandOutput::success(""),
            fail_puts: false,
        }
    }

    /// Report `digest` for `path`.
    pub fn with_remote(mut self, path: impl Into<String>, digest: RemoteDigest) -> Self {
        self.remote.insert(path.into(), digest);
        self
    }

    /// Answer every command with `output`.
    pub fn with_exec_result(mut self, output: CommandOutput) -> Self {
        self.exec_result = output;
        self
    }

    /// Make every file push fail.
    pub fn failing_puts(mut self) -> Self {
        self.fail_puts = true;
        self
    }
}

impl Connection for RecordingConnection {
    fn host(&self) -> &str {
        "fake-host"
    }

    fn exec_command(&self, cmd: &str, _tmp: &str) -> Result<CommandOutput> {
        self.log.push(Event::Exec {
            cmd: cmd.to_string(),
        });
        Ok(self.exec_result.clone())
    }

    fn put_file(&self, local: &Path, remote: &str) -> Result<()> {
        self.log.push(Event::Put {
            local: local.to_path_buf(),
            remote: remote.to_string(),
        });
        if self.fail_puts {
            return Err(Error::Transport("connection reset by peer".to_string()));
        }
        Ok(())
    }

    fn remote_checksum(&self, _tmp: &str, path: &str) -> Result<RemoteDigest> {
        self.log.push(Event::Checksum {
            path: path.to_string(),
        });
        Ok(self
            .remote
            .get(path)
            .cloned()
            .unwrap_or(RemoteDigest::Absent))
    }
}

/// An [`ExecutionHarness`] that records requests and returns a canned answer.
#[derive(Debug, Clone)]
pub struct RecordingHarness {
    log: EventLog,
    requests: Arc<Mutex<Vec<ExecutionRequest>>>,
    response: std::result::Result<ResultRecord, String>,
}

impl RecordingHarness {
    /// Answers every request with `{"changed": true}`.
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            requests: Arc::default(),
            response: Ok(ResultRecord::changed(true)),
        }
    }

    /// Answer every request with `record`.
    pub fn with_response(mut self, record: ResultRecord) -> Self {
        self.response = Ok(record);
        self
    }

    /// Fail every request before it reaches the host.
    pub fn unreachable(mut self, message: impl Into<String>) -> Self {
        self.response = Err(message.into());
        self
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<ExecutionRequest> {
        self.requests.lock().expect("request log poisoned").clone()
    }
}

impl ExecutionHarness for RecordingHarness {
    fn execute(
        &self,
        _conn: &dyn Connection,
        _tmp: &str,
        request: &ExecutionRequest,
        _context: &TaskContext,
    ) -> Result<ResultRecord> {
        self.log.push(Event::Dispatch {
            module: request.module_name().to_string(),
            args: request.args.clone(),
        });
        self.requests
            .lock()
            .expect("request log poisoned")
            .push(request.clone());
        self.response.clone().map_err(Error::Transport)
    }
}

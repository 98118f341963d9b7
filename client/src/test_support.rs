//! In-memory backend double shared by unit tests.

use std::sync::Mutex;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use echoform_protocol::DashboardPage;
use echoform_protocol::EntropyState;
use echoform_protocol::EntropyStatus;
use echoform_protocol::EntrySubmission;
use echoform_protocol::Hypothesis;
use echoform_protocol::LogsPage;
use reqwest::StatusCode;

use crate::api::InferenceBackend;
use crate::api::TransportError;

pub(crate) struct MockBackend {
    hypotheses: Mutex<Vec<Hypothesis>>,
    entropy: Mutex<EntropyStatus>,
    logs: Mutex<Vec<String>>,
    fail_dashboard: AtomicBool,
    fail_entropy: AtomicBool,
    fail_logs: AtomicBool,
    fail_submit: AtomicBool,
    submissions: Mutex<Vec<EntrySubmission>>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self {
            hypotheses: Mutex::new(Vec::new()),
            entropy: Mutex::new(EntropyStatus {
                status: EntropyState::Stable,
                message: "Clear dominant hypothesis found.".to_string(),
            }),
            logs: Mutex::new(Vec::new()),
            fail_dashboard: AtomicBool::new(false),
            fail_entropy: AtomicBool::new(false),
            fail_logs: AtomicBool::new(false),
            fail_submit: AtomicBool::new(false),
            submissions: Mutex::new(Vec::new()),
        }
    }
}

impl MockBackend {
    pub(crate) fn set_hypotheses(&self, hypotheses: Vec<Hypothesis>) {
        *self.hypotheses.lock().expect("mock lock") = hypotheses;
    }

    pub(crate) fn set_entropy(&self, entropy: EntropyStatus) {
        *self.entropy.lock().expect("mock lock") = entropy;
    }

    pub(crate) fn set_logs(&self, logs: Vec<String>) {
        *self.logs.lock().expect("mock lock") = logs;
    }

    pub(crate) fn fail_dashboard(&self, fail: bool) {
        self.fail_dashboard.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_entropy(&self, fail: bool) {
        self.fail_entropy.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_logs(&self, fail: bool) {
        self.fail_logs.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_submit(&self, fail: bool) {
        self.fail_submit.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn submissions(&self) -> Vec<EntrySubmission> {
        self.submissions.lock().expect("mock lock").clone()
    }

    fn failure() -> TransportError {
        TransportError::Status(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

#[async_trait]
impl InferenceBackend for MockBackend {
    async fn fetch_dashboard(&self) -> Result<DashboardPage, TransportError> {
        if self.fail_dashboard.load(Ordering::SeqCst) {
            return Err(Self::failure());
        }
        Ok(DashboardPage {
            hypotheses: self.hypotheses.lock().expect("mock lock").clone(),
            drift_status: None,
        })
    }

    async fn fetch_entropy(&self) -> Result<EntropyStatus, TransportError> {
        if self.fail_entropy.load(Ordering::SeqCst) {
            return Err(Self::failure());
        }
        Ok(self.entropy.lock().expect("mock lock").clone())
    }

    async fn fetch_logs(&self, limit: usize) -> Result<LogsPage, TransportError> {
        if self.fail_logs.load(Ordering::SeqCst) {
            return Err(Self::failure());
        }
        let logs = self.logs.lock().expect("mock lock");
        Ok(LogsPage {
            logs: logs.iter().take(limit).cloned().collect(),
        })
    }

    async fn submit_entry(&self, entry: &EntrySubmission) -> Result<(), TransportError> {
        if self.fail_submit.load(Ordering::SeqCst) {
            return Err(Self::failure());
        }
        self.submissions.lock().expect("mock lock").push(entry.clone());
        Ok(())
    }
}

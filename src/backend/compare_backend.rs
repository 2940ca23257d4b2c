use super::diff_backend::{CompareError, DiffProvider, LineDiffProvider};
use crate::config::Settings;
use crate::messages::ResponseMessage;
use crate::render::{ContractError, DiffOp, Rendered, render};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// Drives compare requests for a pair of documents.
///
/// Requests run on worker threads and report back over a channel. Each one
/// carries a sequence number and only the most recently issued one may
/// replace what is shown; anything older that completes late is dropped.
pub struct CompareBackend {
    provider: Arc<dyn DiffProvider>,
    settings: Settings,
    left: String,
    right: String,
    /// Sequence number of the newest request
    issued: u64,
    /// Sequence number of the newest request whose response was handled
    resolved: u64,
    sender: Sender<ResponseMessage>,
    receiver: Receiver<ResponseMessage>,
    rendered: Option<Rendered>,
    status: Option<String>,
}

impl CompareBackend {
    pub fn new(provider: Arc<dyn DiffProvider>, settings: Settings) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            provider,
            settings,
            left: String::new(),
            right: String::new(),
            issued: 0,
            resolved: 0,
            sender,
            receiver,
            rendered: None,
            status: None,
        }
    }

    /// Backend using the built-in line diff configured from `settings`
    pub fn with_settings(settings: Settings) -> Self {
        let provider = Arc::new(LineDiffProvider::from_settings(&settings));
        Self::new(provider, settings)
    }

    pub fn left(&self) -> &str {
        &self.left
    }

    pub fn right(&self) -> &str {
        &self.right
    }

    /// Replace the original document. Returns the request number when live
    /// comparison kicked off a new request.
    pub fn set_left(&mut self, text: impl Into<String>) -> Option<u64> {
        self.left = text.into();
        self.on_edit()
    }

    /// Replace the new document, see [`CompareBackend::set_left`]
    pub fn set_right(&mut self, text: impl Into<String>) -> Option<u64> {
        self.right = text.into();
        self.on_edit()
    }

    /// Exchange the two documents so removals become additions and vice versa
    pub fn swap(&mut self) -> Option<u64> {
        std::mem::swap(&mut self.left, &mut self.right);
        info!("Swapped documents");
        self.on_edit()
    }

    fn on_edit(&mut self) -> Option<u64> {
        self.settings.live_compare.then(|| self.request())
    }

    /// Start a background compare of the current documents
    pub fn request(&mut self) -> u64 {
        self.issued += 1;
        let seq = self.issued;

        let provider = Arc::clone(&self.provider);
        let left = self.left.clone();
        let right = self.right.clone();
        let sender = self.sender.clone();

        debug!(seq, "Issuing compare request");
        thread::spawn(move || {
            let result = provider.compute(&left, &right);
            let _ = sender.send(ResponseMessage::DiffComputed { seq, result });
        });

        seq
    }

    /// Handle a worker response. Returns true when it was for the newest
    /// request and has been applied, successfully or not.
    pub fn accept(&mut self, message: ResponseMessage) -> bool {
        match message {
            ResponseMessage::DiffComputed { seq, result } => {
                if seq != self.issued {
                    debug!(seq, latest = self.issued, "Dropping stale compare result");
                    return false;
                }
                self.resolved = seq;
                match result {
                    Ok(ops) => {
                        let _ = self.show(ops);
                    }
                    Err(e) => self.report(&e),
                }
                true
            }
        }
    }

    /// Apply every response that is already waiting. Returns true when the
    /// newest request got handled.
    pub fn poll(&mut self) -> bool {
        let mut handled = false;
        while let Ok(message) = self.receiver.try_recv() {
            handled |= self.accept(message);
        }
        handled
    }

    /// Block until the newest request has been handled or `timeout` elapses
    pub fn wait(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.resolved != self.issued {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.receiver.recv_timeout(remaining) {
                Ok(message) => {
                    self.accept(message);
                }
                Err(RecvTimeoutError::Timeout) => return false,
                Err(RecvTimeoutError::Disconnected) => {
                    self.report(&CompareError::Worker("response channel closed".to_string()));
                    return false;
                }
            }
        }
        true
    }

    /// Compare on the calling thread. Any request still in flight becomes stale.
    pub fn compare_now(&mut self) -> Result<&Rendered, CompareError> {
        self.issued += 1;
        self.resolved = self.issued;
        match self.provider.compute(&self.left, &self.right) {
            Ok(ops) => self.show(ops),
            Err(e) => {
                self.report(&e);
                Err(e)
            }
        }
    }

    fn show(&mut self, ops: Vec<DiffOp>) -> Result<&Rendered, CompareError> {
        if let Err(e) = validate_all(&ops) {
            self.report(&e);
            return Err(e);
        }

        let rendered = render(&ops);
        let summary = rendered.stats.summary(self.settings.summary_mode);
        info!("Compare finished: {}", summary);
        self.status = Some(summary);
        let rendered: &Rendered = self.rendered.insert(rendered);
        Ok(rendered)
    }

    fn report(&mut self, e: &CompareError) {
        error!("Compare failed: {}", e);
        self.status = Some(format!("Compare failed: {}", e));
    }

    /// Latest successfully rendered diff
    pub fn rendered(&self) -> Option<&Rendered> {
        self.rendered.as_ref()
    }

    /// User-facing status line: the summary or the last failure
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn latest_seq(&self) -> u64 {
        self.issued
    }
}

fn validate_all(ops: &[DiffOp]) -> Result<(), CompareError> {
    for (index, op) in ops.iter().enumerate() {
        op.validate().map_err(|e| ContractError::AtIndex {
            index,
            source: Box::new(e),
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::CharDiffOp;

    fn quiet_settings() -> Settings {
        Settings {
            live_compare: false,
            ..Settings::default()
        }
    }

    #[test]
    fn compare_now_renders_and_summarizes() {
        let mut backend = CompareBackend::with_settings(quiet_settings());
        backend.set_left("a\nb\n");
        backend.set_right("a\nc\nd\n");

        let stats = backend.compare_now().unwrap().stats;
        assert_eq!(stats.equal_count, 1);
        assert_eq!(stats.replace_count, 1);
        assert_eq!(stats.insert_count, 1);
        assert_eq!(backend.status(), Some("1 unchanged, -0, +1, ~1 modified"));
    }

    #[test]
    fn stale_response_is_dropped() {
        let mut backend = CompareBackend::with_settings(quiet_settings());
        let first = backend.request();
        let second = backend.request();
        assert!(second > first);

        let stale = ResponseMessage::DiffComputed {
            seq: first,
            result: Ok(vec![DiffOp::delete("old")]),
        };
        assert!(!backend.accept(stale));
        assert!(backend.rendered().is_none());

        let fresh = ResponseMessage::DiffComputed {
            seq: second,
            result: Ok(vec![DiffOp::insert("new")]),
        };
        assert!(backend.accept(fresh));
        assert_eq!(backend.rendered().unwrap().stats.insert_count, 1);
    }

    #[test]
    fn slow_older_request_cannot_overwrite_newer() {
        let provider: Arc<dyn DiffProvider> =
            Arc::new(|old: &str, new: &str| -> Result<Vec<DiffOp>, CompareError> {
                if old.contains("slow") {
                    thread::sleep(Duration::from_millis(300));
                }
                LineDiffProvider::default().compute(old, new)
            });
        let mut backend = CompareBackend::new(provider, quiet_settings());

        backend.set_left("slow\na\n");
        backend.set_right("a\n");
        backend.request();
        backend.set_left("b\n");
        backend.request();

        assert!(backend.wait(Duration::from_secs(5)));
        assert_eq!(backend.rendered().unwrap().stats.replace_count, 1);

        // let the slow worker finish, its answer must be ignored
        thread::sleep(Duration::from_millis(600));
        assert!(!backend.poll());
        let stats = backend.rendered().unwrap().stats;
        assert_eq!(stats.replace_count, 1);
        assert_eq!(stats.delete_count, 0);
    }

    #[test]
    fn live_compare_requests_on_edit() {
        let mut backend = CompareBackend::with_settings(Settings::default());
        assert!(backend.set_left("x\n").is_some());
        let seq = backend.set_right("y\n");
        assert_eq!(seq, Some(backend.latest_seq()));

        assert!(backend.wait(Duration::from_secs(5)));
        assert_eq!(backend.rendered().unwrap().stats.replace_count, 1);
    }

    #[test]
    fn quiet_mode_does_not_request() {
        let mut backend = CompareBackend::with_settings(quiet_settings());
        assert_eq!(backend.set_left("x"), None);
        assert_eq!(backend.swap(), None);
        assert_eq!(backend.latest_seq(), 0);
    }

    #[test]
    fn swap_inverts_counts() {
        let mut backend = CompareBackend::with_settings(quiet_settings());
        backend.set_left("same\nremoved\n");
        backend.set_right("same\n");
        let before = backend.compare_now().unwrap().stats;

        backend.swap();
        assert_eq!(backend.left(), "same\n");
        let after = backend.compare_now().unwrap().stats;

        assert_eq!(before.equal_count, after.equal_count);
        assert_eq!(before.delete_count, after.insert_count);
        assert_eq!(before.insert_count, after.delete_count);
    }

    #[test]
    fn provider_failure_becomes_status() {
        let provider: Arc<dyn DiffProvider> =
            Arc::new(|_: &str, _: &str| -> Result<Vec<DiffOp>, CompareError> {
                Err(CompareError::Provider("service offline".to_string()))
            });
        let mut backend = CompareBackend::new(provider, quiet_settings());

        assert!(backend.compare_now().is_err());
        assert!(backend.rendered().is_none());
        assert!(backend.status().unwrap().contains("service offline"));
    }

    #[test]
    fn inconsistent_provider_output_is_rejected() {
        let provider: Arc<dyn DiffProvider> =
            Arc::new(|_: &str, _: &str| -> Result<Vec<DiffOp>, CompareError> {
                Ok(vec![
                    DiffOp::equal("a"),
                    DiffOp::replace_with_chars("cat", "cot", vec![CharDiffOp::equal("cot")]),
                ])
            });
        let mut backend = CompareBackend::new(provider, quiet_settings());

        match backend.compare_now() {
            Err(CompareError::Contract(ContractError::AtIndex { index, .. })) => {
                assert_eq!(index, 1)
            }
            other => panic!("unexpected result: {:?}", other.map(|r| r.stats)),
        }
        assert!(backend.rendered().is_none());
    }
}

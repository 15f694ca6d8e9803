/*
[INPUT]:  Task text to copy and a Clipboard backend
[OUTPUT]: One-shot CopyHandle resolving to a display-only CopyOutcome
[POS]:    Clipboard collaborator - the only asynchronous boundary
[UPDATE]: When adding clipboard backends or changing the copy notice
*/

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::task::{Context, Poll};
use std::thread;

use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;
use tracing::{debug, warn};

use crate::error::ClipboardError;

/// Sink for copied text. Calls may block, so [`copy`] runs them on the
/// blocking pool.
pub trait Clipboard: Send + Sync + 'static {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Live clipboard connection. The platform serves the copied text only while
/// this value exists.
trait Selection {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

impl Selection for arboard::Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        arboard::Clipboard::set_text(self, text).map_err(|e| ClipboardError::Rejected(e.to_string()))
    }
}

type SelectionResult = Result<Box<dyn Selection>, ClipboardError>;

struct CopyRequest {
    text: String,
    reply: mpsc::SyncSender<Result<(), ClipboardError>>,
}

/// The desktop clipboard via `arboard`.
///
/// One owner thread opens the connection on first use and keeps it until
/// this value is dropped, so copied text stays available for the whole
/// session. A failed open or write drops the connection and the next copy
/// reconnects.
#[derive(Debug)]
pub struct SystemClipboard {
    requests: Option<mpsc::Sender<CopyRequest>>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::with_opener(|| {
            let clipboard = arboard::Clipboard::new()
                .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            Ok(Box::new(clipboard) as Box<dyn Selection>)
        })
    }

    fn with_opener<F>(open: F) -> Self
    where
        F: FnMut() -> SelectionResult + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let spawned = thread::Builder::new()
            .name("clipboard-owner".to_string())
            .spawn(move || serve_selection(rx, open));
        match spawned {
            Ok(_) => Self { requests: Some(tx) },
            Err(err) => {
                warn!(error = %err, "failed to start clipboard owner thread");
                Self { requests: None }
            }
        }
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        let stopped = || ClipboardError::Unavailable("clipboard owner thread stopped".to_string());
        let requests = self.requests.as_ref().ok_or_else(stopped)?;
        let (reply, response) = mpsc::sync_channel(1);
        requests
            .send(CopyRequest {
                text: text.to_string(),
                reply,
            })
            .map_err(|_| stopped())?;
        response.recv().map_err(|_| stopped())?
    }
}

fn serve_selection<F>(requests: mpsc::Receiver<CopyRequest>, mut open: F)
where
    F: FnMut() -> SelectionResult,
{
    let mut selection: Option<Box<dyn Selection>> = None;
    for request in requests {
        let result = hold_text(&mut selection, &mut open, &request.text);
        let _ = request.reply.send(result);
    }
    debug!("clipboard owner stopped");
}

fn hold_text<F>(
    selection: &mut Option<Box<dyn Selection>>,
    open: &mut F,
    text: &str,
) -> Result<(), ClipboardError>
where
    F: FnMut() -> SelectionResult,
{
    let mut owner = match selection.take() {
        Some(owner) => owner,
        None => open()?,
    };
    owner.set_text(text)?;
    *selection = Some(owner);
    Ok(())
}

/// Keeps the last copied text in memory
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
    failing: AtomicBool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok()?.clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ClipboardError::Unavailable("clipboard disabled".to_string()));
        }
        let mut contents = self
            .contents
            .lock()
            .map_err(|_| ClipboardError::Rejected("clipboard lock poisoned".to_string()))?;
        *contents = Some(text.to_string());
        Ok(())
    }
}

/// Result of a copy, meant only for a transient "copied" notice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyOutcome {
    pub succeeded: bool,
    pub copied_text: Option<String>,
}

impl CopyOutcome {
    pub fn copied(text: String) -> Self {
        Self {
            succeeded: true,
            copied_text: Some(text),
        }
    }

    pub fn failed() -> Self {
        Self {
            succeeded: false,
            copied_text: None,
        }
    }

    /// Line shown to the user after a successful copy
    pub fn notice(&self) -> Option<String> {
        self.copied_text
            .as_ref()
            .map(|text| format!("Text copied to clipboard: {text}"))
    }
}

/// Pending copy. Resolves once; await it or poll with [`CopyHandle::try_outcome`].
#[derive(Debug)]
pub struct CopyHandle {
    rx: oneshot::Receiver<CopyOutcome>,
}

impl CopyHandle {
    /// `None` while the copy is still running
    pub fn try_outcome(&mut self) -> Option<CopyOutcome> {
        match self.rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(CopyOutcome::failed()),
        }
    }
}

impl Future for CopyHandle {
    type Output = CopyOutcome;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        Pin::new(&mut this.rx)
            .poll(cx)
            .map(|result| result.unwrap_or_else(|_| CopyOutcome::failed()))
    }
}

/// Copy `text` on tokio's blocking pool. Must be called inside a Tokio runtime.
pub fn copy<C: Clipboard + ?Sized>(clipboard: Arc<C>, text: impl Into<String>) -> CopyHandle {
    let text = text.into();
    let (tx, rx) = oneshot::channel();

    tokio::task::spawn_blocking(move || {
        let outcome = match clipboard.set_text(&text) {
            Ok(()) => {
                debug!(len = text.len(), "text copied to clipboard");
                CopyOutcome::copied(text)
            }
            Err(err) => {
                warn!(error = %err, "clipboard copy failed");
                CopyOutcome::failed()
            }
        };
        let _ = tx.send(outcome);
    });

    CopyHandle { rx }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;

    #[tokio::test]
    async fn test_copy_resolves_with_text() {
        let clipboard = Arc::new(MemoryClipboard::new());
        let outcome = copy(clipboard.clone(), "buy milk").await;

        assert!(outcome.succeeded);
        assert_eq!(outcome.copied_text.as_deref(), Some("buy milk"));
        assert_eq!(
            outcome.notice().as_deref(),
            Some("Text copied to clipboard: buy milk")
        );
        assert_eq!(clipboard.contents().as_deref(), Some("buy milk"));
    }

    #[tokio::test]
    async fn test_copy_failure_has_no_notice() {
        let clipboard = Arc::new(MemoryClipboard::new());
        clipboard.set_failing(true);

        let outcome = copy(clipboard.clone(), "secret").await;
        assert_eq!(outcome, CopyOutcome::failed());
        assert!(outcome.notice().is_none());
        assert!(clipboard.contents().is_none());
    }

    struct TrackedSelection {
        live: Arc<AtomicUsize>,
        contents: Arc<Mutex<Option<String>>>,
    }

    impl Selection for TrackedSelection {
        fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            *self.contents.lock().unwrap() = Some(text.to_string());
            Ok(())
        }
    }

    impl Drop for TrackedSelection {
        fn drop(&mut self) {
            self.live.fetch_sub(1, Ordering::SeqCst);
        }
    }

    struct Tracker {
        opened: Arc<AtomicUsize>,
        live: Arc<AtomicUsize>,
        contents: Arc<Mutex<Option<String>>>,
    }

    impl Tracker {
        fn new() -> Self {
            Self {
                opened: Arc::new(AtomicUsize::new(0)),
                live: Arc::new(AtomicUsize::new(0)),
                contents: Arc::new(Mutex::new(None)),
            }
        }

        /// Opener that fails the first `failures` times
        fn opener(&self, mut failures: usize) -> impl FnMut() -> SelectionResult + Send + 'static {
            let opened = self.opened.clone();
            let live = self.live.clone();
            let contents = self.contents.clone();
            move || {
                opened.fetch_add(1, Ordering::SeqCst);
                if failures > 0 {
                    failures -= 1;
                    return Err(ClipboardError::Unavailable("no display".to_string()));
                }
                live.fetch_add(1, Ordering::SeqCst);
                Ok(Box::new(TrackedSelection {
                    live: live.clone(),
                    contents: contents.clone(),
                }) as Box<dyn Selection>)
            }
        }
    }

    #[test]
    fn test_system_clipboard_keeps_connection_after_copy() {
        let tracker = Tracker::new();
        let clipboard = SystemClipboard::with_opener(tracker.opener(0));

        clipboard.set_text("first").unwrap();
        assert_eq!(tracker.live.load(Ordering::SeqCst), 1);
        clipboard.set_text("second").unwrap();

        assert_eq!(tracker.opened.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.live.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.contents.lock().unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_system_clipboard_reconnects_after_failed_open() {
        let tracker = Tracker::new();
        let clipboard = SystemClipboard::with_opener(tracker.opener(1));

        let result = clipboard.set_text("lost");
        assert!(matches!(result, Err(ClipboardError::Unavailable(_))));
        clipboard.set_text("kept").unwrap();

        assert_eq!(tracker.opened.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.live.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.contents.lock().unwrap().as_deref(), Some("kept"));
    }

    #[tokio::test]
    async fn test_copy_through_system_clipboard_reports_text() {
        let tracker = Tracker::new();
        let clipboard = Arc::new(SystemClipboard::with_opener(tracker.opener(0)));

        let outcome = copy(clipboard, "walk dog").await;
        assert_eq!(
            outcome.notice().as_deref(),
            Some("Text copied to clipboard: walk dog")
        );
        assert_eq!(tracker.live.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_try_outcome_eventually_ready() {
        let clipboard: Arc<dyn Clipboard> = Arc::new(MemoryClipboard::new());
        let mut handle = copy(clipboard, "polled");

        let outcome = loop {
            if let Some(outcome) = handle.try_outcome() {
                break outcome;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        };
        assert!(outcome.succeeded);
    }
}

//! Host judgment provider seam
//!
//! A `Judge` turns input text into a `JudgmentResult`. Closures work directly:
//!
//! ```
//! use liminal::core::Judge;
//! use liminal::error::JudgeError;
//! use liminal::types::JudgmentResult;
//!
//! let judge = |input: &str| -> Result<JudgmentResult, JudgeError> {
//!     Ok(JudgmentResult::new(format!("echo: {}", input), "Echo"))
//! };
//! assert_eq!(judge.judge("hi").unwrap().content, "echo: hi");
//! ```

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;
use tracing::warn;

use crate::error::JudgeError;
use crate::types::JudgmentResult;

pub trait Judge {
    fn judge(&self, input: &str) -> Result<JudgmentResult, JudgeError>;
}

impl<F> Judge for F
where
    F: Fn(&str) -> Result<JudgmentResult, JudgeError>,
{
    fn judge(&self, input: &str) -> Result<JudgmentResult, JudgeError> {
        self(input)
    }
}

/// Run a judge, turning a panic into `JudgeError::Panicked`
pub fn call_guarded<J: Judge + ?Sized>(judge: &J, input: &str) -> Result<JudgmentResult, JudgeError> {
    match panic::catch_unwind(AssertUnwindSafe(|| judge.judge(input))) {
        Ok(result) => result,
        Err(payload) => Err(JudgeError::Panicked(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Runs a shared judge on a worker thread and gives up after `timeout`.
/// A timed-out worker is detached, not killed.
#[derive(Debug)]
pub struct TimedJudge<J> {
    inner: Arc<J>,
    timeout: Duration,
}

impl<J> TimedJudge<J>
where
    J: Judge + Send + Sync + 'static,
{
    pub fn new(inner: J, timeout: Duration) -> Self {
        Self::from_arc(Arc::new(inner), timeout)
    }

    pub fn from_arc(inner: Arc<J>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl<J> Judge for TimedJudge<J>
where
    J: Judge + Send + Sync + 'static,
{
    fn judge(&self, input: &str) -> Result<JudgmentResult, JudgeError> {
        let (tx, rx) = mpsc::channel();
        let inner = Arc::clone(&self.inner);
        let input = input.to_string();

        thread::spawn(move || {
            let _ = tx.send(call_guarded(inner.as_ref(), &input));
        });

        match rx.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(mpsc::RecvTimeoutError::Timeout) => {
                warn!("Judge timed out after {:?}", self.timeout);
                Err(JudgeError::TimedOut(self.timeout))
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                Err(JudgeError::Panicked("judge worker exited without a result".into()))
            }
        }
    }
}

/// Keyword judge for demos: fails on grief words, steady otherwise
#[derive(Debug, Default, Clone, Copy)]
pub struct DemoJudge;

impl Judge for DemoJudge {
    fn judge(&self, input: &str) -> Result<JudgmentResult, JudgeError> {
        let result = if input.contains("괴로") || input.contains("슬프") {
            JudgmentResult::failure("Selene")
                .with_emotion("sorrow")
                .with_amplitude(0.9)
        } else if input.contains("혼란") {
            JudgmentResult::new("혼란스러운 마음을 이해합니다.", "Sage")
                .with_emotion("confusion")
                .with_amplitude(0.7)
        } else {
            JudgmentResult::new("일반적인 응답입니다.", "Companion").with_amplitude(0.3)
        };
        Ok(result)
    }
}

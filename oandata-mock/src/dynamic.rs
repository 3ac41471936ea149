use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use oandata_core::{CandleFragment, CandleProvider, CandleQuery, OandataError};

/// Instruction for how one provider call should behave.
#[derive(Clone, Debug)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(OandataError),
    /// Hang indefinitely (simulate a stalled request).
    Hang,
}

#[derive(Default)]
struct InternalState {
    script: VecDeque<MockBehavior<CandleFragment>>,
    fallback: Option<MockBehavior<CandleFragment>>,
    calls: Vec<CandleQuery>,
}

/// Controller handle used by tests to drive a [`ScriptedProvider`] from the outside.
pub struct ScriptedController {
    state: Arc<Mutex<InternalState>>,
}

impl ScriptedController {
    /// Queue the behavior of the next unscripted call.
    pub async fn push_behavior(&self, behavior: MockBehavior<CandleFragment>) {
        let mut guard = self.state.lock().await;
        guard.script.push_back(behavior);
    }

    /// Queue several behaviors, consumed in order.
    pub async fn push_behaviors<I>(&self, behaviors: I)
    where
        I: IntoIterator<Item = MockBehavior<CandleFragment>>,
    {
        let mut guard = self.state.lock().await;
        guard.script.extend(behaviors);
    }

    /// Behavior used once the queue is exhausted.
    pub async fn set_default_behavior(&self, behavior: MockBehavior<CandleFragment>) {
        let mut guard = self.state.lock().await;
        guard.fallback = Some(behavior);
    }

    /// Return a copy of every query received so far, in call order.
    pub async fn calls(&self) -> Vec<CandleQuery> {
        let guard = self.state.lock().await;
        guard.calls.clone()
    }

    /// Number of calls received so far.
    pub async fn call_count(&self) -> usize {
        let guard = self.state.lock().await;
        guard.calls.len()
    }

    /// Clear all configured behaviors and the call log.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.script.clear();
        guard.fallback = None;
        guard.calls.clear();
    }
}

/// A provider that defers every call to behaviors queued on its controller.
///
/// Calls with no queued behavior and no default fail with a `Provider` error.
pub struct ScriptedProvider {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl ScriptedProvider {
    /// Create a new scripted provider and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn CandleProvider>, ScriptedController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = ScriptedController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn CandleProvider>, controller)
    }
}

#[async_trait]
impl CandleProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "ScriptedMock"
    }

    async fn candles(&self, query: &CandleQuery) -> Result<CandleFragment, OandataError> {
        // Log and pick the behavior without holding the lock across the call
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.calls.push(query.clone());
            guard.script.pop_front().or_else(|| guard.fallback.clone())
        };

        match behavior {
            Some(MockBehavior::Return(fragment)) => Ok(fragment),
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => std::future::pending().await,
            None => Err(OandataError::provider(
                self.name,
                format!(
                    "no scripted behavior for {} {}..={}",
                    query.instrument, query.from, query.to
                ),
            )),
        }
    }
}

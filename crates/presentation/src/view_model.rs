//! Intent/State/Effect view-model core shared by every screen.
//!
//! A screen implements [`ViewModel`]: it declares its intents, state and
//! effects, builds the initial state and handles one intent at a time.
//! [`HookedViewModel`] owns the rest:
//!
//! - the current state, in a [`watch`] channel so observers always read a
//!   complete snapshot;
//! - one-shot effects, on a [`broadcast`] channel. Each subscriber sees an
//!   effect at most once and an effect sent while nobody listens is dropped;
//! - a task scope. Every intent runs on its own task, and dropping or closing
//!   the view-model aborts whatever is still running.
//!
//! State only changes through reducers handed to [`Store::set_state`] or
//! [`Store::set_state_if`], which run under the channel lock, so
//! concurrent handlers never overwrite each other's updates.

use std::{any::Any, future::Future, panic::AssertUnwindSafe, sync::Arc};

use futures::FutureExt;
use parking_lot::Mutex;
use tokio::{
    sync::{broadcast, watch},
    task::{JoinError, JoinSet},
};

const EFFECT_CAPACITY: usize = 32;

/// Shown to the user when a handler fails in a way it did not report.
pub const UNEXPECTED_ERROR: &str = "Something went wrong, please try again";

pub trait ViewModel: Send + Sync + 'static {
    type Intent: Send + 'static;
    type State: Clone + Send + Sync + 'static;
    type Effect: Clone + Send + 'static;

    /// Name used in logs.
    const NAME: &'static str;

    fn create_initial_state(&self) -> Self::State;

    fn handle_intent(
        &self,
        intent: Self::Intent,
        store: &Store<Self::State, Self::Effect>,
    ) -> impl Future<Output = ()> + Send;

    /// Effect emitted when a handler panics.
    fn failure_effect(message: String) -> Self::Effect;

    /// State to continue from after a handler panicked. Screens that hold a
    /// busy flag clear it here so later intents are not ignored.
    fn recover(state: &Self::State) -> Self::State {
        state.clone()
    }
}

struct StoreInner<S, E> {
    state: watch::Sender<S>,
    effects: broadcast::Sender<E>,
}

/// State cell and effect stream of one view-model, as seen by its handlers.
pub struct Store<S, E> {
    inner: Arc<StoreInner<S, E>>,
}

impl<S, E> Clone for Store<S, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Clone, E: Clone> Store<S, E> {
    fn new(initial: S) -> Self {
        let (state, _) = watch::channel(initial);
        let (effects, _) = broadcast::channel(EFFECT_CAPACITY);
        Self {
            inner: Arc::new(StoreInner { state, effects }),
        }
    }

    pub fn state(&self) -> S {
        self.inner.state.borrow().clone()
    }

    /// Replaces the state with `reducer(current)` and notifies observers.
    pub fn set_state(&self, reducer: impl FnOnce(&S) -> S) {
        self.inner.state.send_modify(|state| *state = reducer(state));
    }

    /// Like [`set_state`](Self::set_state), but the reducer may decline by
    /// returning `None`. Returns whether the state was replaced.
    pub fn set_state_if(&self, reducer: impl FnOnce(&S) -> Option<S>) -> bool {
        self.inner.state.send_if_modified(|state| match reducer(state) {
            Some(next) => {
                *state = next;
                true
            }
            None => false,
        })
    }

    /// Emits an effect. `builder` only runs when someone is subscribed.
    pub fn send_effect(&self, builder: impl FnOnce() -> E) {
        if self.inner.effects.receiver_count() == 0 {
            tracing::trace!("effect dropped, no subscriber");
            return;
        }
        // Err only when the last subscriber went away in between.
        let _ = self.inner.effects.send(builder());
    }
}

/// Decrements the in-flight counter when the task ends, however it ends.
struct InFlight(Arc<watch::Sender<usize>>);

impl InFlight {
    fn enter(counter: &Arc<watch::Sender<usize>>) -> Self {
        counter.send_modify(|n| *n += 1);
        Self(Arc::clone(counter))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.send_modify(|n| *n = n.saturating_sub(1));
    }
}

/// A running view-model: the feature logic plus its state, effects and tasks.
pub struct HookedViewModel<V: ViewModel> {
    feature: Arc<V>,
    store: Store<V::State, V::Effect>,
    tasks: Mutex<JoinSet<()>>,
    in_flight: Arc<watch::Sender<usize>>,
}

impl<V: ViewModel> HookedViewModel<V> {
    pub fn new(feature: V) -> Self {
        let initial = feature.create_initial_state();
        let (in_flight, _) = watch::channel(0);
        Self {
            feature: Arc::new(feature),
            store: Store::new(initial),
            tasks: Mutex::new(JoinSet::new()),
            in_flight: Arc::new(in_flight),
        }
    }

    /// Schedules `intent` on the view-model's task scope and returns at once.
    ///
    /// Must be called from within a tokio runtime.
    pub fn send_intent(&self, intent: V::Intent) {
        let feature = Arc::clone(&self.feature);
        let store = self.store.clone();
        let guard = InFlight::enter(&self.in_flight);

        let mut tasks = self.tasks.lock();
        while let Some(done) = tasks.try_join_next() {
            log_join::<V>(done);
        }
        tasks.spawn(async move {
            let _guard = guard;
            let outcome = AssertUnwindSafe(feature.handle_intent(intent, &store))
                .catch_unwind()
                .await;
            if let Err(panic) = outcome {
                tracing::error!(
                    view_model = V::NAME,
                    "intent handler panicked: {}",
                    panic_message(panic.as_ref())
                );
                store.set_state(V::recover);
                store.send_effect(|| V::failure_effect(UNEXPECTED_ERROR.to_string()));
            }
        });
    }

    pub fn state(&self) -> V::State {
        self.store.state()
    }

    /// Continuous state observation; the receiver starts at the current
    /// state.
    pub fn subscribe_state(&self) -> watch::Receiver<V::State> {
        self.store.inner.state.subscribe()
    }

    /// Subscribes to effects emitted from now on.
    pub fn effects(&self) -> broadcast::Receiver<V::Effect> {
        self.store.inner.effects.subscribe()
    }

    pub fn feature(&self) -> &V {
        &self.feature
    }

    /// Waits until no intent is being handled.
    pub async fn settled(&self) {
        let mut rx = self.in_flight.subscribe();
        let _ = rx.wait_for(|n| *n == 0).await;
    }

    /// Aborts every outstanding task. Intents sent afterwards still run.
    pub fn close(&self) {
        let mut tasks = self.tasks.lock();
        tasks.abort_all();
        tracing::debug!(view_model = V::NAME, "view-model closed");
    }
}

fn log_join<V: ViewModel>(done: Result<(), JoinError>) {
    if let Err(err) = done
        && !err.is_cancelled()
    {
        tracing::error!(view_model = V::NAME, "intent task failed: {err}");
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&'static str>() {
        *message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}

use presentation::{HookedViewModel, ViewModel};
use tokio::sync::broadcast::{self, error::TryRecvError};

/// A view-model together with an effect subscription opened before any
/// intent was sent, so that no effect is missed.
pub struct Screen<V: ViewModel> {
    vm: HookedViewModel<V>,
    effects: broadcast::Receiver<V::Effect>,
}

impl<V: ViewModel> Screen<V> {
    pub fn new(feature: V) -> Self {
        let vm = HookedViewModel::new(feature);
        let effects = vm.effects();
        Self { vm, effects }
    }

    pub fn send(&self, intent: V::Intent) {
        self.vm.send_intent(intent);
    }

    pub fn state(&self) -> V::State {
        self.vm.state()
    }

    pub fn view_model(&self) -> &HookedViewModel<V> {
        &self.vm
    }

    /// Waits for the outstanding intents and returns the effects they emitted.
    pub async fn settle(&mut self) -> Vec<V::Effect> {
        self.vm.settled().await;
        let mut seen = Vec::new();
        loop {
            match self.effects.try_recv() {
                Ok(effect) => seen.push(effect),
                Err(TryRecvError::Lagged(missed)) => {
                    tracing::warn!(view_model = V::NAME, missed, "effects lagged");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        seen
    }
}

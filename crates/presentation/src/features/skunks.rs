//! Logging a skunk: a trip where nothing was caught.

use std::sync::Arc;

use domain::{Coordinates, LocationService, SubmitSkunkEntity, usecases::SubmitSkunkUseCase};

use crate::{
    validation::{ValidationError, validate_required},
    view_model::{Store, ViewModel},
};

#[derive(Clone, Debug, PartialEq)]
pub enum SubmitSkunkIntent {
    UpdateFishedAt(String),
    UpdateNotes(String),
    UpdateLocationFromMap { latitude: f64, longitude: f64 },
    GetCurrentLocation,
    /// Asks the location service for access and records the answer.
    RequestLocationPermission,
    /// Outcome of a permission prompt raised by
    /// [`SubmitSkunkEffect::RequestLocationPermission`].
    LocationPermissionResult(bool),
    Submit,
    DismissError,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SubmitSkunkState {
    /// Set by the caller; empty until then.
    pub fished_at: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub location_name: String,
    pub notes: String,
    pub is_location_loading: bool,
    pub is_submitting: bool,
    pub is_submitted: bool,
    pub has_location_permission: bool,
    pub error_message: Option<String>,
}

impl SubmitSkunkState {
    pub fn is_valid(&self) -> bool {
        validate_required(&self.fished_at, ValidationError::FishedAtRequired).is_ok()
    }

    pub fn has_location(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }

    fn located(&self, at: Coordinates) -> Self {
        Self {
            latitude: Some(at.latitude),
            longitude: Some(at.longitude),
            location_name: location_name(at),
            is_location_loading: false,
            ..self.clone()
        }
    }
}

/// Coordinates truncated to four decimals, `"45.1234, -122.9876"`.
pub fn location_name(at: Coordinates) -> String {
    format!("{}, {}", coordinate(at.latitude), coordinate(at.longitude))
}

/// Whole numbers keep one decimal: `45.0`, not `45`.
fn coordinate(value: f64) -> String {
    let truncated = (value * 10_000.0).trunc() / 10_000.0;
    if truncated.fract() == 0.0 {
        format!("{truncated:.1}")
    } else {
        truncated.to_string()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SubmitSkunkEffect {
    SubmitSuccess,
    SubmitError(String),
    RequestLocationPermission,
}

pub struct SubmitSkunkViewModel {
    submit_skunk: SubmitSkunkUseCase,
    location: Arc<dyn LocationService>,
    has_location_permission: bool,
}

impl SubmitSkunkViewModel {
    pub fn new(submit_skunk: SubmitSkunkUseCase, location: Arc<dyn LocationService>) -> Self {
        Self {
            submit_skunk,
            location,
            has_location_permission: false,
        }
    }

    /// Seeds the initial state with a permission checked beforehand.
    pub fn with_location_permission(self, granted: bool) -> Self {
        Self {
            has_location_permission: granted,
            ..self
        }
    }

    async fn request_permission(&self, store: &Store<SubmitSkunkState, SubmitSkunkEffect>) {
        let granted = self.location.request_permission().await;
        let has_permission = self.location.has_permission().await;
        tracing::debug!(granted, has_permission, "location permission requested");
        store.set_state(|s| SubmitSkunkState {
            has_location_permission: has_permission,
            ..s.clone()
        });
    }

    async fn current_location(&self, store: &Store<SubmitSkunkState, SubmitSkunkEffect>) {
        if !self.location.has_permission().await {
            store.send_effect(|| SubmitSkunkEffect::RequestLocationPermission);
            return;
        }
        store.set_state(|s| SubmitSkunkState {
            is_location_loading: true,
            has_location_permission: true,
            ..s.clone()
        });
        match self.location.current_location().await {
            Ok(at) => store.set_state(|s| s.located(at)),
            Err(err) => store.set_state(|s| SubmitSkunkState {
                is_location_loading: false,
                error_message: Some(err.to_string()),
                ..s.clone()
            }),
        }
    }

    async fn submit(&self, store: &Store<SubmitSkunkState, SubmitSkunkEffect>) {
        let mut invalid = false;
        let started = store.set_state_if(|s| {
            if s.is_submitting {
                return None;
            }
            if !s.is_valid() {
                invalid = true;
                return Some(SubmitSkunkState {
                    error_message: Some(ValidationError::FishedAtRequired.to_string()),
                    ..s.clone()
                });
            }
            Some(SubmitSkunkState {
                is_submitting: true,
                error_message: None,
                ..s.clone()
            })
        });
        if !started || invalid {
            return;
        }

        let form = store.state();
        let entity = SubmitSkunkEntity {
            latitude: form.latitude,
            longitude: form.longitude,
            fished_at: form.fished_at,
            notes: Some(form.notes).filter(|notes| !notes.trim().is_empty()),
        };
        match self.submit_skunk.execute(entity).await {
            Ok(id) => {
                tracing::info!(skunk_id = %id, "skunk logged");
                store.set_state(|s| SubmitSkunkState {
                    is_submitting: false,
                    is_submitted: true,
                    ..s.clone()
                });
                store.send_effect(|| SubmitSkunkEffect::SubmitSuccess);
            }
            Err(err) => {
                store.set_state(|s| SubmitSkunkState {
                    is_submitting: false,
                    error_message: Some(format!("Failed to log skunk: {}", err.message)),
                    ..s.clone()
                });
                store.send_effect(|| SubmitSkunkEffect::SubmitError(err.message));
            }
        }
    }
}

impl ViewModel for SubmitSkunkViewModel {
    type Intent = SubmitSkunkIntent;
    type State = SubmitSkunkState;
    type Effect = SubmitSkunkEffect;

    const NAME: &'static str = "submit_skunk";

    fn create_initial_state(&self) -> SubmitSkunkState {
        SubmitSkunkState {
            has_location_permission: self.has_location_permission,
            ..SubmitSkunkState::default()
        }
    }

    async fn handle_intent(
        &self,
        intent: SubmitSkunkIntent,
        store: &Store<SubmitSkunkState, SubmitSkunkEffect>,
    ) {
        match intent {
            SubmitSkunkIntent::UpdateFishedAt(fished_at) => store.set_state(|s| SubmitSkunkState {
                fished_at,
                ..s.clone()
            }),
            SubmitSkunkIntent::UpdateNotes(notes) => store.set_state(|s| SubmitSkunkState {
                notes,
                ..s.clone()
            }),
            SubmitSkunkIntent::UpdateLocationFromMap {
                latitude,
                longitude,
            } => store.set_state(|s| {
                s.located(Coordinates {
                    latitude,
                    longitude,
                })
            }),
            SubmitSkunkIntent::GetCurrentLocation => self.current_location(store).await,
            SubmitSkunkIntent::RequestLocationPermission => self.request_permission(store).await,
            SubmitSkunkIntent::LocationPermissionResult(granted) => {
                store.set_state(|s| SubmitSkunkState {
                    has_location_permission: granted,
                    ..s.clone()
                });
                if granted {
                    self.current_location(store).await;
                }
            }
            SubmitSkunkIntent::Submit => self.submit(store).await,
            SubmitSkunkIntent::DismissError => store.set_state(|s| SubmitSkunkState {
                error_message: None,
                ..s.clone()
            }),
        }
    }

    fn failure_effect(message: String) -> SubmitSkunkEffect {
        SubmitSkunkEffect::SubmitError(message)
    }

    fn recover(state: &SubmitSkunkState) -> SubmitSkunkState {
        SubmitSkunkState {
            is_location_loading: false,
            is_submitting: false,
            ..state.clone()
        }
    }
}

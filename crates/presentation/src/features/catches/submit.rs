use std::sync::Arc;

use domain::{
    CapturedPhoto, LocationService, PhotoCapture, PhotoCaptureError, SubmitCatchEntity, UseCaseResult,
    usecases::{ConvertImageToBase64UseCase, SubmitCatchUseCase},
};

use crate::{
    validation::{ValidationError, parse_measurement},
    view_model::{Store, ViewModel},
};

/// What a catch needs before it may be submitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmitMode {
    /// Species, weight and length are required; the photo is optional.
    Measured,
    /// Only the photo is required. The backend fills in the rest from EXIF.
    #[default]
    PhotoOnly,
}

impl SubmitMode {
    fn validate(self, state: &SubmitCatchState) -> Result<(), ValidationError> {
        match self {
            SubmitMode::Measured if !state.is_form_valid() => Err(ValidationError::MissingFields),
            SubmitMode::PhotoOnly if state.photo_uri.is_none() => {
                Err(ValidationError::MissingPhoto)
            }
            _ => Ok(()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SubmitCatchIntent {
    UpdateSpecies(String),
    UpdateWeight(String),
    UpdateLength(String),
    UpdateLocation { latitude: f64, longitude: f64 },
    UpdatePhoto(Option<String>),
    RemovePhoto,
    TakePhoto,
    PickPhoto,
    GetCurrentLocation,
    SubmitCatch,
    NavigateBack,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SubmitCatchState {
    pub species: String,
    /// Raw text as typed.
    pub weight: String,
    /// Raw text as typed.
    pub length: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub photo_uri: Option<String>,
    pub is_submitting: bool,
    pub is_location_loading: bool,
    pub submitted_catch_id: Option<String>,
}

impl SubmitCatchState {
    pub fn is_form_valid(&self) -> bool {
        !self.species.trim().is_empty()
            && parse_measurement(&self.weight).is_some()
            && parse_measurement(&self.length).is_some()
    }

    pub fn location_text(&self) -> String {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => format!("{}, {}", truncated(lat), truncated(lng)),
            _ => "No location set".to_string(),
        }
    }

    fn to_entity(&self, image_base64: Option<String>) -> SubmitCatchEntity {
        SubmitCatchEntity {
            species: self.species.trim().to_string(),
            weight: parse_measurement(&self.weight),
            length: parse_measurement(&self.length),
            latitude: self.latitude,
            longitude: self.longitude,
            image_base64,
            ..SubmitCatchEntity::default()
        }
    }
}

fn truncated(coordinate: f64) -> String {
    coordinate.to_string().chars().take(8).collect()
}

#[derive(Clone, Debug, PartialEq)]
pub enum SubmitCatchEffect {
    CatchSubmittedSuccessfully(String),
    ShowError(String),
    RequestLocationPermission,
    NavigateBack,
}

pub struct SubmitCatchViewModel {
    mode: SubmitMode,
    photos: Arc<dyn PhotoCapture>,
    location: Arc<dyn LocationService>,
    convert_image: ConvertImageToBase64UseCase,
    submit_catch: SubmitCatchUseCase,
}

impl SubmitCatchViewModel {
    pub fn new(
        mode: SubmitMode,
        photos: Arc<dyn PhotoCapture>,
        location: Arc<dyn LocationService>,
        convert_image: ConvertImageToBase64UseCase,
        submit_catch: SubmitCatchUseCase,
    ) -> Self {
        Self {
            mode,
            photos,
            location,
            convert_image,
            submit_catch,
        }
    }

    pub fn mode(&self) -> SubmitMode {
        self.mode
    }

    fn apply_photo(
        store: &Store<SubmitCatchState, SubmitCatchEffect>,
        action: &str,
        result: Result<Option<CapturedPhoto>, PhotoCaptureError>,
    ) {
        match result {
            Ok(Some(photo)) => store.set_state(|s| SubmitCatchState {
                photo_uri: Some(photo.uri),
                ..s.clone()
            }),
            Ok(None) => tracing::debug!("{action} cancelled"),
            Err(err) => {
                store.send_effect(|| SubmitCatchEffect::ShowError(format!("Failed to {action}: {err}")))
            }
        }
    }

    async fn current_location(&self, store: &Store<SubmitCatchState, SubmitCatchEffect>) {
        if !self.location.has_permission().await {
            store.set_state(|s| SubmitCatchState {
                is_location_loading: false,
                ..s.clone()
            });
            store.send_effect(|| SubmitCatchEffect::RequestLocationPermission);
            return;
        }
        store.set_state(|s| SubmitCatchState {
            is_location_loading: true,
            ..s.clone()
        });
        match self.location.current_location().await {
            Ok(coordinates) => store.set_state(|s| SubmitCatchState {
                latitude: Some(coordinates.latitude),
                longitude: Some(coordinates.longitude),
                is_location_loading: false,
                ..s.clone()
            }),
            Err(err) => {
                store.set_state(|s| SubmitCatchState {
                    is_location_loading: false,
                    ..s.clone()
                });
                store.send_effect(|| SubmitCatchEffect::ShowError(err.to_string()));
            }
        }
    }

    /// Converts the photo, if any, then submits. A failed conversion never
    /// reaches the backend.
    async fn submit(&self, form: &SubmitCatchState) -> UseCaseResult<String> {
        let image_base64 = match form.photo_uri.as_deref() {
            Some(uri) => Some(self.convert_image.execute(uri).await?),
            None => None,
        };
        self.submit_catch.execute(form.to_entity(image_base64)).await
    }

    async fn handle_submit(&self, store: &Store<SubmitCatchState, SubmitCatchEffect>) {
        if let Err(invalid) = self.mode.validate(&store.state()) {
            store.send_effect(|| SubmitCatchEffect::ShowError(invalid.to_string()));
            return;
        }
        let started = store.set_state_if(|s| {
            (!s.is_submitting).then(|| SubmitCatchState {
                is_submitting: true,
                ..s.clone()
            })
        });
        if !started {
            tracing::debug!("submission already in flight, ignoring");
            return;
        }

        let form = store.state();
        match self.submit(&form).await {
            Ok(id) => {
                tracing::info!(catch_id = %id, "catch submitted");
                store.set_state(|s| SubmitCatchState {
                    is_submitting: false,
                    submitted_catch_id: Some(id.clone()),
                    ..s.clone()
                });
                store.send_effect(|| SubmitCatchEffect::CatchSubmittedSuccessfully(id));
            }
            Err(err) => {
                store.set_state(|s| SubmitCatchState {
                    is_submitting: false,
                    ..s.clone()
                });
                store.send_effect(|| SubmitCatchEffect::ShowError(err.message));
            }
        }
    }
}

impl ViewModel for SubmitCatchViewModel {
    type Intent = SubmitCatchIntent;
    type State = SubmitCatchState;
    type Effect = SubmitCatchEffect;

    const NAME: &'static str = "submit_catch";

    fn create_initial_state(&self) -> SubmitCatchState {
        SubmitCatchState::default()
    }

    async fn handle_intent(
        &self,
        intent: SubmitCatchIntent,
        store: &Store<SubmitCatchState, SubmitCatchEffect>,
    ) {
        match intent {
            SubmitCatchIntent::UpdateSpecies(species) => store.set_state(|s| SubmitCatchState {
                species,
                ..s.clone()
            }),
            SubmitCatchIntent::UpdateWeight(weight) => store.set_state(|s| SubmitCatchState {
                weight,
                ..s.clone()
            }),
            SubmitCatchIntent::UpdateLength(length) => store.set_state(|s| SubmitCatchState {
                length,
                ..s.clone()
            }),
            SubmitCatchIntent::UpdateLocation {
                latitude,
                longitude,
            } => store.set_state(|s| SubmitCatchState {
                latitude: Some(latitude),
                longitude: Some(longitude),
                is_location_loading: false,
                ..s.clone()
            }),
            SubmitCatchIntent::UpdatePhoto(photo_uri) => store.set_state(|s| SubmitCatchState {
                photo_uri,
                ..s.clone()
            }),
            SubmitCatchIntent::RemovePhoto => store.set_state(|s| SubmitCatchState {
                photo_uri: None,
                ..s.clone()
            }),
            SubmitCatchIntent::TakePhoto => {
                let result = self.photos.capture_photo().await;
                Self::apply_photo(store, "take photo", result);
            }
            SubmitCatchIntent::PickPhoto => {
                let result = self.photos.pick_from_gallery().await;
                Self::apply_photo(store, "pick photo", result);
            }
            SubmitCatchIntent::GetCurrentLocation => self.current_location(store).await,
            SubmitCatchIntent::SubmitCatch => self.handle_submit(store).await,
            SubmitCatchIntent::NavigateBack => store.send_effect(|| SubmitCatchEffect::NavigateBack),
        }
    }

    fn failure_effect(message: String) -> SubmitCatchEffect {
        SubmitCatchEffect::ShowError(message)
    }

    fn recover(state: &SubmitCatchState) -> SubmitCatchState {
        SubmitCatchState {
            is_submitting: false,
            is_location_loading: false,
            ..state.clone()
        }
    }
}

use domain::{CatchDetailsEntity, usecases::GetCatchDetailsUseCase};

use crate::view_model::{Store, ViewModel};

#[derive(Clone, Debug, PartialEq)]
pub enum CatchDetailsIntent {
    LoadCatchDetails(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct CatchDetailsState {
    pub catch_details: Option<CatchDetailsEntity>,
    pub is_loading: bool,
}

impl Default for CatchDetailsState {
    fn default() -> Self {
        Self {
            catch_details: None,
            is_loading: true,
        }
    }
}

impl CatchDetailsState {
    /// `"3.5 lbs · 18.0 in"`, leaving out what was not measured.
    pub fn measurements_text(&self) -> Option<String> {
        let details = self.catch_details.as_ref()?;
        let parts = [
            details.weight.map(|w| format!("{w:.1} lbs")),
            details.length.map(|l| format!("{l:.1} in")),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();
        (!parts.is_empty()).then(|| parts.join(" · "))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CatchDetailsEffect {
    OnError(String),
}

pub struct CatchDetailsViewModel {
    get_catch_details: GetCatchDetailsUseCase,
}

impl CatchDetailsViewModel {
    pub fn new(get_catch_details: GetCatchDetailsUseCase) -> Self {
        Self { get_catch_details }
    }
}

impl ViewModel for CatchDetailsViewModel {
    type Intent = CatchDetailsIntent;
    type State = CatchDetailsState;
    type Effect = CatchDetailsEffect;

    const NAME: &'static str = "catch_details";

    fn create_initial_state(&self) -> CatchDetailsState {
        CatchDetailsState::default()
    }

    async fn handle_intent(
        &self,
        intent: CatchDetailsIntent,
        store: &Store<CatchDetailsState, CatchDetailsEffect>,
    ) {
        match intent {
            CatchDetailsIntent::LoadCatchDetails(id) => {
                store.set_state(|s| CatchDetailsState {
                    is_loading: true,
                    ..s.clone()
                });
                match self.get_catch_details.execute(&id).await {
                    Ok(details) => store.set_state(|_| CatchDetailsState {
                        catch_details: Some(details),
                        is_loading: false,
                    }),
                    Err(err) => {
                        store.set_state(|s| CatchDetailsState {
                            is_loading: false,
                            ..s.clone()
                        });
                        store.send_effect(|| CatchDetailsEffect::OnError(err.message));
                    }
                }
            }
        }
    }

    fn failure_effect(message: String) -> CatchDetailsEffect {
        CatchDetailsEffect::OnError(message)
    }

    fn recover(state: &CatchDetailsState) -> CatchDetailsState {
        CatchDetailsState {
            is_loading: false,
            ..state.clone()
        }
    }
}

use domain::{
    CatchEntity, UseCaseResult,
    usecases::{DeleteCatchUseCase, GetCatchesUseCase, RefreshCatchesUseCase},
};

use crate::view_model::{Store, ViewModel};

pub const CATCH_DELETED: &str = "Catch deleted successfully";

#[derive(Clone, Debug, PartialEq)]
pub struct CatchModel {
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
}

impl From<&CatchEntity> for CatchModel {
    fn from(entity: &CatchEntity) -> Self {
        Self {
            id: entity.id.clone(),
            name: entity.name.clone(),
            image_url: entity.image_url.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CatchGridIntent {
    LoadCatches,
    Refresh,
    NavigateToCatchDetails(String),
    ShowDeleteDialog(String),
    HideDeleteDialog,
    DeleteCatch(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct CatchGridState {
    pub catches: Vec<CatchModel>,
    pub is_loading: bool,
    pub is_refreshing: bool,
    pub show_delete_dialog: bool,
    pub catch_to_delete: Option<String>,
}

impl Default for CatchGridState {
    fn default() -> Self {
        Self {
            catches: Vec::new(),
            is_loading: true,
            is_refreshing: false,
            show_delete_dialog: false,
            catch_to_delete: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CatchGridEffect {
    NavigateToCatchDetails(String),
    ShowError(String),
    ShowSuccess(String),
}

pub struct CatchGridViewModel {
    get_catches: GetCatchesUseCase,
    refresh_catches: RefreshCatchesUseCase,
    delete_catch: DeleteCatchUseCase,
}

impl CatchGridViewModel {
    pub fn new(
        get_catches: GetCatchesUseCase,
        refresh_catches: RefreshCatchesUseCase,
        delete_catch: DeleteCatchUseCase,
    ) -> Self {
        Self {
            get_catches,
            refresh_catches,
            delete_catch,
        }
    }

    fn apply_catches(
        store: &Store<CatchGridState, CatchGridEffect>,
        result: UseCaseResult<Vec<CatchEntity>>,
    ) {
        match result {
            Ok(catches) => store.set_state(|s| CatchGridState {
                catches: catches.iter().map(CatchModel::from).collect(),
                is_loading: false,
                is_refreshing: false,
                ..s.clone()
            }),
            Err(err) => {
                store.set_state(|s| CatchGridState {
                    is_loading: false,
                    is_refreshing: false,
                    ..s.clone()
                });
                store.send_effect(|| CatchGridEffect::ShowError(err.message));
            }
        }
    }
}

impl ViewModel for CatchGridViewModel {
    type Intent = CatchGridIntent;
    type State = CatchGridState;
    type Effect = CatchGridEffect;

    const NAME: &'static str = "catch_grid";

    fn create_initial_state(&self) -> CatchGridState {
        CatchGridState::default()
    }

    async fn handle_intent(
        &self,
        intent: CatchGridIntent,
        store: &Store<CatchGridState, CatchGridEffect>,
    ) {
        match intent {
            CatchGridIntent::LoadCatches => {
                store.set_state(|s| {
                    let has_catches = !s.catches.is_empty();
                    CatchGridState {
                        is_loading: !has_catches,
                        is_refreshing: has_catches,
                        ..s.clone()
                    }
                });
                Self::apply_catches(store, self.get_catches.execute().await);
            }
            CatchGridIntent::Refresh => {
                store.set_state(|s| CatchGridState {
                    is_refreshing: true,
                    ..s.clone()
                });
                Self::apply_catches(store, self.refresh_catches.execute().await);
            }
            CatchGridIntent::NavigateToCatchDetails(id) => {
                store.send_effect(|| CatchGridEffect::NavigateToCatchDetails(id));
            }
            CatchGridIntent::ShowDeleteDialog(id) => store.set_state(|s| CatchGridState {
                show_delete_dialog: true,
                catch_to_delete: Some(id),
                ..s.clone()
            }),
            CatchGridIntent::HideDeleteDialog => store.set_state(|s| CatchGridState {
                show_delete_dialog: false,
                catch_to_delete: None,
                ..s.clone()
            }),
            CatchGridIntent::DeleteCatch(id) => {
                store.set_state(|s| CatchGridState {
                    show_delete_dialog: false,
                    catch_to_delete: None,
                    ..s.clone()
                });
                match self.delete_catch.execute(&id).await {
                    Ok(()) => {
                        store.set_state(|s| CatchGridState {
                            catches: s.catches.iter().filter(|c| c.id != id).cloned().collect(),
                            ..s.clone()
                        });
                        store.send_effect(|| CatchGridEffect::ShowSuccess(CATCH_DELETED.to_string()));
                    }
                    Err(err) => store.send_effect(|| CatchGridEffect::ShowError(err.message)),
                }
            }
        }
    }

    fn failure_effect(message: String) -> CatchGridEffect {
        CatchGridEffect::ShowError(message)
    }

    fn recover(state: &CatchGridState) -> CatchGridState {
        CatchGridState {
            is_loading: false,
            is_refreshing: false,
            ..state.clone()
        }
    }
}

use domain::{
    SpeciesData, StatsEntity,
    usecases::{GetCatchStatsUseCase, GetFishingInsightsUseCase},
};

use crate::view_model::{Store, ViewModel};

const NOT_AVAILABLE: &str = "N/A";

#[derive(Clone, Debug, PartialEq)]
pub enum StatsIntent {
    LoadStats,
    Refresh,
    LoadInsights,
    NavigateBack,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StatsState {
    pub total_catches: usize,
    pub unique_species: usize,
    pub unique_locations: usize,
    /// Most caught first.
    pub species_data: Vec<SpeciesData>,
    pub average_weight: String,
    pub average_length: String,
    pub biggest_catch_name: Option<String>,
    pub biggest_catch_weight: Option<String>,
    pub most_recent_catch: Option<String>,
    pub ai_insights: Option<String>,
    pub is_loading: bool,
    pub is_loading_insights: bool,
    pub error: Option<String>,
}

impl Default for StatsState {
    fn default() -> Self {
        Self {
            total_catches: 0,
            unique_species: 0,
            unique_locations: 0,
            species_data: Vec::new(),
            average_weight: NOT_AVAILABLE.to_string(),
            average_length: NOT_AVAILABLE.to_string(),
            biggest_catch_name: None,
            biggest_catch_weight: None,
            most_recent_catch: None,
            ai_insights: None,
            is_loading: true,
            is_loading_insights: false,
            error: None,
        }
    }
}

impl StatsState {
    fn with_stats(&self, stats: &StatsEntity) -> Self {
        let biggest = stats.biggest_catch.as_ref();
        Self {
            total_catches: stats.total_catches,
            unique_species: stats.unique_species,
            unique_locations: stats.unique_locations,
            species_data: stats.species_data(),
            average_weight: format_or_na(stats.average_weight, "lbs"),
            average_length: format_or_na(stats.average_length, "in"),
            biggest_catch_name: biggest.map(|c| c.name.clone()),
            biggest_catch_weight: biggest.and_then(|c| c.weight).map(|w| format!("{w:.1} lbs")),
            most_recent_catch: stats
                .most_recent_catch
                .as_ref()
                .map(|c| format!("{} on {}", c.name, c.date_caught)),
            is_loading: false,
            error: None,
            ..self.clone()
        }
    }
}

fn format_or_na(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(value) => format!("{value:.1} {unit}"),
        None => NOT_AVAILABLE.to_string(),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StatsEffect {
    NavigateBack,
    ShowError(String),
}

pub struct StatsViewModel {
    get_stats: GetCatchStatsUseCase,
    get_insights: GetFishingInsightsUseCase,
}

impl StatsViewModel {
    pub fn new(get_stats: GetCatchStatsUseCase, get_insights: GetFishingInsightsUseCase) -> Self {
        Self {
            get_stats,
            get_insights,
        }
    }

    async fn load_stats(&self, store: &Store<StatsState, StatsEffect>) {
        store.set_state(|s| StatsState {
            is_loading: true,
            error: None,
            ..s.clone()
        });
        match self.get_stats.execute().await {
            Ok(stats) => store.set_state(|s| s.with_stats(&stats)),
            Err(err) => {
                let message = err.message;
                store.set_state(|s| StatsState {
                    is_loading: false,
                    error: Some(message.clone()),
                    ..s.clone()
                });
                store.send_effect(|| StatsEffect::ShowError(message));
            }
        }
    }
}

impl ViewModel for StatsViewModel {
    type Intent = StatsIntent;
    type State = StatsState;
    type Effect = StatsEffect;

    const NAME: &'static str = "stats";

    fn create_initial_state(&self) -> StatsState {
        StatsState::default()
    }

    async fn handle_intent(&self, intent: StatsIntent, store: &Store<StatsState, StatsEffect>) {
        match intent {
            StatsIntent::LoadStats | StatsIntent::Refresh => self.load_stats(store).await,
            StatsIntent::LoadInsights => {
                store.set_state(|s| StatsState {
                    is_loading_insights: true,
                    ..s.clone()
                });
                match self.get_insights.execute().await {
                    Ok(insights) => store.set_state(|s| StatsState {
                        ai_insights: Some(insights.insights),
                        is_loading_insights: false,
                        ..s.clone()
                    }),
                    Err(err) => {
                        store.set_state(|s| StatsState {
                            is_loading_insights: false,
                            ..s.clone()
                        });
                        store.send_effect(|| StatsEffect::ShowError(err.message));
                    }
                }
            }
            StatsIntent::NavigateBack => store.send_effect(|| StatsEffect::NavigateBack),
        }
    }

    fn failure_effect(message: String) -> StatsEffect {
        StatsEffect::ShowError(message)
    }

    fn recover(state: &StatsState) -> StatsState {
        StatsState {
            is_loading: false,
            is_loading_insights: false,
            ..state.clone()
        }
    }
}

use domain::usecases::{GetCurrentUserUseCase, LogoutUseCase};

use crate::view_model::{Store, ViewModel};

pub const USER_NOT_FOUND: &str = "User not found";

#[derive(Clone, Debug, PartialEq)]
pub enum ProfileIntent {
    LoadProfile,
    Logout,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProfileState {
    pub username: String,
    pub email: String,
    pub initials: String,
    pub is_loading: bool,
    pub is_logging_out: bool,
}

impl Default for ProfileState {
    fn default() -> Self {
        Self {
            username: String::new(),
            email: String::new(),
            initials: String::new(),
            is_loading: true,
            is_logging_out: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ProfileEffect {
    NavigateToLogin,
    ShowError(String),
}

/// First letters of the first and last words, uppercased.
pub fn initials(username: &str) -> String {
    let mut words = username.split_whitespace();
    let Some(first) = words.next() else {
        return "?".to_string();
    };
    let first_letter = first.chars().next();
    let last_letter = words.last().and_then(|word| word.chars().next());
    first_letter
        .into_iter()
        .chain(last_letter)
        .flat_map(char::to_uppercase)
        .collect()
}

pub struct ProfileViewModel {
    current_user: GetCurrentUserUseCase,
    logout: LogoutUseCase,
}

impl ProfileViewModel {
    pub fn new(current_user: GetCurrentUserUseCase, logout: LogoutUseCase) -> Self {
        Self {
            current_user,
            logout,
        }
    }

    async fn load_profile(&self, store: &Store<ProfileState, ProfileEffect>) {
        store.set_state(|s| ProfileState {
            is_loading: true,
            ..s.clone()
        });
        let message = match self.current_user.execute().await {
            Ok(Some(user)) => {
                store.set_state(|s| ProfileState {
                    initials: initials(&user.username),
                    username: user.username,
                    email: user.email,
                    is_loading: false,
                    ..s.clone()
                });
                return;
            }
            Ok(None) => USER_NOT_FOUND.to_string(),
            Err(err) => {
                tracing::error!("failed to load profile: {}", err.message);
                err.message
            }
        };
        store.set_state(|s| ProfileState {
            is_loading: false,
            ..s.clone()
        });
        store.send_effect(|| ProfileEffect::ShowError(message));
    }

    async fn perform_logout(&self, store: &Store<ProfileState, ProfileEffect>) {
        store.set_state(|s| ProfileState {
            is_logging_out: true,
            ..s.clone()
        });
        match self.logout.execute().await {
            Ok(()) => store.send_effect(|| ProfileEffect::NavigateToLogin),
            Err(err) => {
                tracing::error!("logout failed: {}", err.message);
                store.set_state(|s| ProfileState {
                    is_logging_out: false,
                    ..s.clone()
                });
                store.send_effect(|| ProfileEffect::ShowError(err.message));
            }
        }
    }
}

impl ViewModel for ProfileViewModel {
    type Intent = ProfileIntent;
    type State = ProfileState;
    type Effect = ProfileEffect;

    const NAME: &'static str = "profile";

    fn create_initial_state(&self) -> ProfileState {
        ProfileState::default()
    }

    async fn handle_intent(&self, intent: ProfileIntent, store: &Store<ProfileState, ProfileEffect>) {
        match intent {
            ProfileIntent::LoadProfile => self.load_profile(store).await,
            ProfileIntent::Logout => self.perform_logout(store).await,
        }
    }

    fn failure_effect(message: String) -> ProfileEffect {
        ProfileEffect::ShowError(message)
    }

    fn recover(state: &ProfileState) -> ProfileState {
        ProfileState {
            is_loading: false,
            is_logging_out: false,
            ..state.clone()
        }
    }
}

use domain::{LoginCredentials, usecases::LoginUseCase};

use crate::{
    validation::{field_error, validate_email, validate_password},
    view_model::{Store, ViewModel},
};

#[derive(Clone, Debug, PartialEq)]
pub enum LoginIntent {
    UpdateEmail(String),
    UpdatePassword(String),
    Login,
    ClearErrors,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoginState {
    pub email: String,
    pub password: String,
    pub is_loading: bool,
    pub email_error: Option<String>,
    pub password_error: Option<String>,
}

impl LoginState {
    /// Fills in the field errors; `None` when the form is valid.
    fn validated(&self) -> Option<Self> {
        let email_error = field_error(validate_email(&self.email));
        let password_error = field_error(validate_password(&self.password));
        (email_error.is_some() || password_error.is_some()).then(|| Self {
            email_error,
            password_error,
            ..self.clone()
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum LoginEffect {
    NavigateToHome,
    ShowError(String),
}

pub struct LoginViewModel {
    login: LoginUseCase,
}

impl LoginViewModel {
    pub fn new(login: LoginUseCase) -> Self {
        Self { login }
    }

    async fn perform_login(&self, store: &Store<LoginState, LoginEffect>) {
        let mut invalid = false;
        let started = store.set_state_if(|s| {
            if s.is_loading {
                return None;
            }
            if let Some(with_errors) = s.validated() {
                invalid = true;
                return Some(with_errors);
            }
            Some(LoginState {
                is_loading: true,
                ..s.clone()
            })
        });
        if !started || invalid {
            return;
        }

        let form = store.state();
        let credentials = LoginCredentials {
            email: form.email.trim().to_string(),
            password: form.password,
        };
        match self.login.execute(credentials).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "logged in");
                store.set_state(|s| LoginState {
                    is_loading: false,
                    ..s.clone()
                });
                store.send_effect(|| LoginEffect::NavigateToHome);
            }
            Err(err) => {
                store.set_state(|s| LoginState {
                    is_loading: false,
                    ..s.clone()
                });
                store.send_effect(|| LoginEffect::ShowError(err.message));
            }
        }
    }
}

impl ViewModel for LoginViewModel {
    type Intent = LoginIntent;
    type State = LoginState;
    type Effect = LoginEffect;

    const NAME: &'static str = "login";

    fn create_initial_state(&self) -> LoginState {
        LoginState::default()
    }

    async fn handle_intent(&self, intent: LoginIntent, store: &Store<LoginState, LoginEffect>) {
        match intent {
            LoginIntent::UpdateEmail(email) => store.set_state(|s| LoginState {
                email,
                email_error: None,
                ..s.clone()
            }),
            LoginIntent::UpdatePassword(password) => store.set_state(|s| LoginState {
                password,
                password_error: None,
                ..s.clone()
            }),
            LoginIntent::Login => self.perform_login(store).await,
            LoginIntent::ClearErrors => store.set_state(|s| LoginState {
                email_error: None,
                password_error: None,
                ..s.clone()
            }),
        }
    }

    fn failure_effect(message: String) -> LoginEffect {
        LoginEffect::ShowError(message)
    }

    fn recover(state: &LoginState) -> LoginState {
        LoginState {
            is_loading: false,
            ..state.clone()
        }
    }
}

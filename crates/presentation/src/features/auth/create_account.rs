use domain::{RegisterCredentials, usecases::RegisterUseCase};

use crate::{
    validation::{
        ValidationError, field_error, validate_email, validate_password, validate_required,
    },
    view_model::{Store, ViewModel},
};

#[derive(Clone, Debug, PartialEq)]
pub enum CreateAccountIntent {
    UpdateFirstName(String),
    UpdateLastName(String),
    UpdateEmail(String),
    UpdatePassword(String),
    UpdateConfirmPassword(String),
    CreateAccount,
    ClearErrors,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CreateAccountState {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub is_loading: bool,
    pub first_name_error: Option<String>,
    pub last_name_error: Option<String>,
    pub email_error: Option<String>,
    pub password_error: Option<String>,
    pub confirm_password_error: Option<String>,
}

impl CreateAccountState {
    fn without_errors(&self) -> Self {
        Self {
            first_name_error: None,
            last_name_error: None,
            email_error: None,
            password_error: None,
            confirm_password_error: None,
            ..self.clone()
        }
    }

    fn confirm_password_check(&self) -> Result<(), ValidationError> {
        if self.confirm_password.is_empty() {
            Err(ValidationError::ConfirmPasswordRequired)
        } else if self.confirm_password != self.password {
            Err(ValidationError::PasswordMismatch)
        } else {
            Ok(())
        }
    }

    /// Fills in the field errors; `None` when the form is valid.
    fn validated(&self) -> Option<Self> {
        let checked = Self {
            first_name_error: field_error(validate_required(
                &self.first_name,
                ValidationError::FirstNameRequired,
            )),
            last_name_error: field_error(validate_required(
                &self.last_name,
                ValidationError::LastNameRequired,
            )),
            email_error: field_error(validate_email(&self.email)),
            password_error: field_error(validate_password(&self.password)),
            confirm_password_error: field_error(self.confirm_password_check()),
            ..self.clone()
        };
        checked.has_errors().then_some(checked)
    }

    pub fn has_errors(&self) -> bool {
        [
            &self.first_name_error,
            &self.last_name_error,
            &self.email_error,
            &self.password_error,
            &self.confirm_password_error,
        ]
        .iter()
        .any(|error| error.is_some())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CreateAccountEffect {
    NavigateToHome,
    ShowError(String),
}

pub struct CreateAccountViewModel {
    register: RegisterUseCase,
}

impl CreateAccountViewModel {
    pub fn new(register: RegisterUseCase) -> Self {
        Self { register }
    }

    async fn create_account(&self, store: &Store<CreateAccountState, CreateAccountEffect>) {
        let mut invalid = false;
        let started = store.set_state_if(|s| {
            if s.is_loading {
                return None;
            }
            if let Some(with_errors) = s.validated() {
                invalid = true;
                return Some(with_errors);
            }
            Some(CreateAccountState {
                is_loading: true,
                ..s.without_errors()
            })
        });
        if !started || invalid {
            return;
        }

        let form = store.state();
        let credentials = RegisterCredentials {
            email: form.email.trim().to_string(),
            password: form.password,
            first_name: form.first_name.trim().to_string(),
            last_name: form.last_name.trim().to_string(),
        };
        match self.register.execute(credentials).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "account created");
                store.set_state(|s| CreateAccountState {
                    is_loading: false,
                    ..s.clone()
                });
                store.send_effect(|| CreateAccountEffect::NavigateToHome);
            }
            Err(err) => {
                tracing::error!("registration failed: {}", err.message);
                store.set_state(|s| CreateAccountState {
                    is_loading: false,
                    ..s.clone()
                });
                store.send_effect(|| CreateAccountEffect::ShowError(err.message));
            }
        }
    }
}

impl ViewModel for CreateAccountViewModel {
    type Intent = CreateAccountIntent;
    type State = CreateAccountState;
    type Effect = CreateAccountEffect;

    const NAME: &'static str = "create_account";

    fn create_initial_state(&self) -> CreateAccountState {
        CreateAccountState::default()
    }

    async fn handle_intent(
        &self,
        intent: CreateAccountIntent,
        store: &Store<CreateAccountState, CreateAccountEffect>,
    ) {
        match intent {
            CreateAccountIntent::UpdateFirstName(first_name) => {
                store.set_state(|s| CreateAccountState {
                    first_name,
                    first_name_error: None,
                    ..s.clone()
                })
            }
            CreateAccountIntent::UpdateLastName(last_name) => {
                store.set_state(|s| CreateAccountState {
                    last_name,
                    last_name_error: None,
                    ..s.clone()
                })
            }
            CreateAccountIntent::UpdateEmail(email) => store.set_state(|s| CreateAccountState {
                email,
                email_error: None,
                ..s.clone()
            }),
            // The confirmation is checked against the password, so both errors go.
            CreateAccountIntent::UpdatePassword(password) => {
                store.set_state(|s| CreateAccountState {
                    password,
                    password_error: None,
                    confirm_password_error: None,
                    ..s.clone()
                })
            }
            CreateAccountIntent::UpdateConfirmPassword(confirm_password) => {
                store.set_state(|s| CreateAccountState {
                    confirm_password,
                    confirm_password_error: None,
                    ..s.clone()
                })
            }
            CreateAccountIntent::CreateAccount => self.create_account(store).await,
            CreateAccountIntent::ClearErrors => store.set_state(CreateAccountState::without_errors),
        }
    }

    fn failure_effect(message: String) -> CreateAccountEffect {
        CreateAccountEffect::ShowError(message)
    }

    fn recover(state: &CreateAccountState) -> CreateAccountState {
        CreateAccountState {
            is_loading: false,
            ..state.clone()
        }
    }
}

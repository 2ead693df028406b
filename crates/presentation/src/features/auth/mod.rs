mod create_account;
mod login;
mod profile;

pub use create_account::{
    CreateAccountEffect, CreateAccountIntent, CreateAccountState, CreateAccountViewModel,
};
pub use login::{LoginEffect, LoginIntent, LoginState, LoginViewModel};
pub use profile::{
    ProfileEffect, ProfileIntent, ProfileState, ProfileViewModel, USER_NOT_FOUND, initials,
};

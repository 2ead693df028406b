//! One struct per user action. Each wraps a repository call and turns its
//! failure into a [`UseCaseError`](crate::error::UseCaseError) carrying a
//! user-facing message.

mod auth;
mod catches;
mod images;
mod skunks;

pub use auth::{
    CheckAuthStatusUseCase, GetCurrentUserUseCase, LoginUseCase, LogoutUseCase,
    RefreshTokenUseCase, RegisterUseCase,
};
pub use catches::{
    DeleteCatchUseCase, GetCatchDetailsUseCase, GetCatchStatsUseCase, GetCatchesUseCase,
    GetFishingInsightsUseCase, RefreshCatchesUseCase, SubmitCatchUseCase,
};
pub use images::ConvertImageToBase64UseCase;
pub use skunks::SubmitSkunkUseCase;

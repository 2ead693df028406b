//! Routes and the effects that lead to them.

use std::fmt;

use presentation::features::{
    auth::{CreateAccountEffect, LoginEffect, ProfileEffect},
    catches::{CatchGridEffect, StatsEffect, SubmitCatchEffect},
    skunks::SubmitSkunkEffect,
};

use crate::features::{Feature, Features, RouteKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    CreateAccount,
    Profile,
    CatchGrid,
    CatchDetails(String),
    Stats,
    SubmitCatch,
    SubmitSkunk,
}

impl Route {
    pub fn kind(&self) -> RouteKind {
        match self {
            Route::Login => RouteKind::Login,
            Route::CreateAccount => RouteKind::CreateAccount,
            Route::Profile => RouteKind::Profile,
            Route::CatchGrid => RouteKind::CatchGrid,
            Route::CatchDetails(_) => RouteKind::CatchDetails,
            Route::Stats => RouteKind::Stats,
            Route::SubmitCatch => RouteKind::SubmitCatch,
            Route::SubmitSkunk => RouteKind::SubmitSkunk,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Login => f.write_str("login"),
            Route::CreateAccount => f.write_str("create_account"),
            Route::Profile => f.write_str("profile"),
            Route::CatchGrid => f.write_str("catches"),
            Route::CatchDetails(id) => write!(f, "catches/{id}"),
            Route::Stats => f.write_str("stats"),
            Route::SubmitCatch => f.write_str("submit"),
            Route::SubmitSkunk => f.write_str("skunk"),
        }
    }
}

/// Effects that move the user to another screen.
pub trait Navigates {
    /// `None` when the effect is not a navigation, or goes back.
    fn destination(&self) -> Option<Route>;
}

impl Navigates for CatchGridEffect {
    fn destination(&self) -> Option<Route> {
        match self {
            CatchGridEffect::NavigateToCatchDetails(id) => Some(Route::CatchDetails(id.clone())),
            CatchGridEffect::ShowError(_) | CatchGridEffect::ShowSuccess(_) => None,
        }
    }
}

impl Navigates for SubmitCatchEffect {
    fn destination(&self) -> Option<Route> {
        match self {
            SubmitCatchEffect::CatchSubmittedSuccessfully(id) => {
                Some(Route::CatchDetails(id.clone()))
            }
            SubmitCatchEffect::ShowError(_)
            | SubmitCatchEffect::RequestLocationPermission
            | SubmitCatchEffect::NavigateBack => None,
        }
    }
}

impl Navigates for StatsEffect {
    fn destination(&self) -> Option<Route> {
        None
    }
}

impl Navigates for LoginEffect {
    fn destination(&self) -> Option<Route> {
        match self {
            LoginEffect::NavigateToHome => Some(Route::CatchGrid),
            LoginEffect::ShowError(_) => None,
        }
    }
}

impl Navigates for CreateAccountEffect {
    fn destination(&self) -> Option<Route> {
        match self {
            CreateAccountEffect::NavigateToHome => Some(Route::CatchGrid),
            CreateAccountEffect::ShowError(_) => None,
        }
    }
}

impl Navigates for ProfileEffect {
    fn destination(&self) -> Option<Route> {
        match self {
            ProfileEffect::NavigateToLogin => Some(Route::Login),
            ProfileEffect::ShowError(_) => None,
        }
    }
}

impl Navigates for SubmitSkunkEffect {
    fn destination(&self) -> Option<Route> {
        match self {
            SubmitSkunkEffect::SubmitSuccess => Some(Route::CatchGrid),
            SubmitSkunkEffect::SubmitError(_) | SubmitSkunkEffect::RequestLocationPermission => {
                None
            }
        }
    }
}

/// Resolves start and follow-up routes against the registered features.
pub struct Navigator<'a> {
    features: &'a Features,
}

impl<'a> Navigator<'a> {
    pub fn new(features: &'a Features) -> Self {
        Self { features }
    }

    pub fn start_route(&self, logged_in: bool) -> Route {
        if logged_in {
            Route::CatchGrid
        } else {
            Route::Login
        }
    }

    /// The route `effect` leads to and the feature that serves it.
    pub fn resolve(&self, effect: &impl Navigates) -> Option<(Route, &'a Feature)> {
        let route = effect.destination()?;
        let Some(feature) = self.features.owner_of(&route) else {
            tracing::warn!(%route, "no feature serves this route");
            return None;
        };
        tracing::debug!(%route, feature = feature.id, "navigating");
        Some((route, feature))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_route_depends_on_session() {
        let features = Features::new();
        let navigator = Navigator::new(&features);
        assert_eq!(navigator.start_route(true), Route::CatchGrid);
        assert_eq!(navigator.start_route(false), Route::Login);
    }

    #[test]
    fn effects_resolve_to_routes() {
        let features = Features::new();
        let navigator = Navigator::new(&features);

        let (route, feature) = navigator
            .resolve(&CatchGridEffect::NavigateToCatchDetails("5".to_string()))
            .unwrap();
        assert_eq!(route, Route::CatchDetails("5".to_string()));
        assert_eq!(route.to_string(), "catches/5");
        assert_eq!(feature.id, "catches");

        let (route, feature) = navigator.resolve(&ProfileEffect::NavigateToLogin).unwrap();
        assert_eq!(route, Route::Login);
        assert_eq!(feature.id, "auth");

        assert!(
            navigator
                .resolve(&LoginEffect::ShowError("nope".to_string()))
                .is_none()
        );
    }
}

//! Feature descriptors, built once at startup.

use crate::navigation::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteKind {
    Login,
    CreateAccount,
    Profile,
    CatchGrid,
    CatchDetails,
    Stats,
    SubmitCatch,
    SubmitSkunk,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    pub id: &'static str,
    pub routes: &'static [RouteKind],
}

impl Feature {
    pub fn owns(&self, route: &Route) -> bool {
        self.routes.contains(&route.kind())
    }
}

/// Every feature of the app, passed by reference to the navigator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Features {
    pub auth: Feature,
    pub catches: Feature,
    pub submit: Feature,
    pub stats: Feature,
    pub skunks: Feature,
}

impl Features {
    pub fn new() -> Self {
        Self {
            auth: Feature {
                id: "auth",
                routes: &[RouteKind::Login, RouteKind::CreateAccount, RouteKind::Profile],
            },
            catches: Feature {
                id: "catches",
                routes: &[RouteKind::CatchGrid, RouteKind::CatchDetails],
            },
            submit: Feature {
                id: "submit",
                routes: &[RouteKind::SubmitCatch],
            },
            stats: Feature {
                id: "stats",
                routes: &[RouteKind::Stats],
            },
            skunks: Feature {
                id: "skunks",
                routes: &[RouteKind::SubmitSkunk],
            },
        }
    }

    pub fn all(&self) -> [&Feature; 5] {
        [
            &self.auth,
            &self.catches,
            &self.submit,
            &self.stats,
            &self.skunks,
        ]
    }

    pub fn owner_of(&self, route: &Route) -> Option<&Feature> {
        self.all().into_iter().find(|feature| feature.owns(route))
    }
}

impl Default for Features {
    fn default() -> Self {
        Self::new()
    }
}

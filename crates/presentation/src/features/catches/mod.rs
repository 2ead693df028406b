mod details;
mod grid;
mod stats;
mod submit;

pub use details::{CatchDetailsEffect, CatchDetailsIntent, CatchDetailsState, CatchDetailsViewModel};
pub use grid::{
    CATCH_DELETED, CatchGridEffect, CatchGridIntent, CatchGridState, CatchGridViewModel, CatchModel,
};
pub use stats::{StatsEffect, StatsIntent, StatsState, StatsViewModel};
pub use submit::{
    SubmitCatchEffect, SubmitCatchIntent, SubmitCatchState, SubmitCatchViewModel, SubmitMode,
};

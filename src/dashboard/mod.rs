//! Presentation layer: controls, interaction state and view models.

pub mod context;
pub mod controls;
pub mod state;
pub mod view;

pub use context::{ChartRequest, DashboardContext, InteractRequest, InteractResponse};
pub use state::{ControlEvent, DashboardState, Refresh};

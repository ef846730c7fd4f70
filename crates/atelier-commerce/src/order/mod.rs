//! Orders: types, list view-model and status tracker.

mod address;
mod order;
pub mod tracker;
pub mod view;

pub use address::ShippingAddress;
pub use order::{Order, OrderItem, OrderStatus};
pub use tracker::{connector, steps_for, StatusTrack, StepState, TrackerStep};
pub use view::{project, OrderProjection, OrderSort, StatusCounts, StatusFilter};

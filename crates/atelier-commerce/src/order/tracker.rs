//! Order status tracker: maps a status to the progress steps shown on the
//! order detail page.

use crate::order::OrderStatus;
use serde::{Deserialize, Serialize};

/// Display state of one tracker step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepState {
    Completed,
    Current,
    Error,
    Pending,
}

impl StepState {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepState::Completed => "completed",
            StepState::Current => "current",
            StepState::Error => "error",
            StepState::Pending => "pending",
        }
    }
}

/// One labelled step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerStep {
    pub label: &'static str,
    pub state: StepState,
}

impl TrackerStep {
    const fn new(label: &'static str, state: StepState) -> Self {
        Self { label, state }
    }
}

/// Steps for an order in `status`.
///
/// Cancelled and rejected orders get a truncated two-step track ending in
/// an error step; every other status gets the four-step happy path.
pub fn steps_for(status: OrderStatus) -> Vec<TrackerStep> {
    use StepState::*;

    let placed = TrackerStep::new("Order Placed", Completed);
    match status {
        OrderStatus::Cancelled => vec![placed, TrackerStep::new("Cancelled", Error)],
        OrderStatus::Rejected => vec![placed, TrackerStep::new("Rejected", Error)],
        OrderStatus::Pending | OrderStatus::Accepted | OrderStatus::Completed => {
            let processing = if status == OrderStatus::Pending {
                Current
            } else {
                Completed
            };
            let shipped = match status {
                OrderStatus::Accepted => Current,
                OrderStatus::Completed => Completed,
                _ => Pending,
            };
            let delivered = if status == OrderStatus::Completed {
                Completed
            } else {
                Pending
            };
            vec![
                placed,
                TrackerStep::new("Processing", processing),
                TrackerStep::new("Shipped", shipped),
                TrackerStep::new("Delivered", delivered),
            ]
        }
    }
}

/// Whether the segment between two adjacent steps is drawn filled.
pub fn connector(earlier: StepState, later: StepState) -> bool {
    earlier == StepState::Completed && matches!(later, StepState::Completed | StepState::Current)
}

/// Steps and connectors for one status, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTrack {
    pub steps: Vec<TrackerStep>,
    /// `connectors[i]` joins `steps[i]` and `steps[i + 1]`.
    pub connectors: Vec<bool>,
}

impl StatusTrack {
    pub fn for_status(status: OrderStatus) -> Self {
        let steps = steps_for(status);
        let connectors = steps
            .windows(2)
            .map(|pair| connector(pair[0].state, pair[1].state))
            .collect();
        Self { steps, connectors }
    }

    pub fn completed_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| s.state == StepState::Completed)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use StepState::*;

    fn states(status: OrderStatus) -> Vec<StepState> {
        steps_for(status).into_iter().map(|s| s.state).collect()
    }

    #[test]
    fn test_terminal_failure_tracks() {
        let cancelled = steps_for(OrderStatus::Cancelled);
        assert_eq!(cancelled.len(), 2);
        assert_eq!(cancelled[0], TrackerStep::new("Order Placed", Completed));
        assert_eq!(cancelled[1], TrackerStep::new("Cancelled", Error));

        let rejected = steps_for(OrderStatus::Rejected);
        assert_eq!(rejected[1], TrackerStep::new("Rejected", Error));
    }

    #[test]
    fn test_happy_path_states() {
        assert_eq!(states(OrderStatus::Pending), vec![Completed, Current, Pending, Pending]);
        assert_eq!(states(OrderStatus::Accepted), vec![Completed, Completed, Current, Pending]);
        assert_eq!(
            states(OrderStatus::Completed),
            vec![Completed, Completed, Completed, Completed]
        );

        let labels: Vec<&str> = steps_for(OrderStatus::Pending).iter().map(|s| s.label).collect();
        assert_eq!(labels, vec!["Order Placed", "Processing", "Shipped", "Delivered"]);
    }

    #[test]
    fn test_connector_rule() {
        assert!(connector(Completed, Completed));
        assert!(connector(Completed, Current));
        assert!(!connector(Completed, Pending));
        assert!(!connector(Completed, Error));
        assert!(!connector(Current, Pending));
        assert!(!connector(Current, Completed));
    }

    #[test]
    fn test_track_connectors() {
        assert_eq!(
            StatusTrack::for_status(OrderStatus::Pending).connectors,
            vec![true, false, false]
        );
        assert_eq!(
            StatusTrack::for_status(OrderStatus::Accepted).connectors,
            vec![true, true, false]
        );
        assert_eq!(StatusTrack::for_status(OrderStatus::Cancelled).connectors, vec![false]);
    }

    #[test]
    fn test_completed_steps_follow_status_order() {
        let counts: Vec<usize> = [OrderStatus::Pending, OrderStatus::Accepted, OrderStatus::Completed]
            .into_iter()
            .map(|s| StatusTrack::for_status(s).completed_count())
            .collect();
        assert_eq!(counts, vec![1, 2, 4]);
        assert_eq!(StatusTrack::for_status(OrderStatus::Rejected).completed_count(), 1);
    }
}

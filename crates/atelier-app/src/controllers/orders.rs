//! Order history and order detail pages.

use crate::error::{AppError, LoadOutcome};
use crate::shared::lock;
use crate::ticket::RequestTicket;
use atelier_commerce::ids::OrderId;
use atelier_commerce::order::{
    project, Order, OrderProjection, OrderSort, StatusCounts, StatusFilter, StatusTrack,
};
use atelier_data::ApiClient;
use std::collections::HashSet;
use std::sync::Mutex;

#[derive(Debug, Default)]
struct OrdersState {
    orders: Vec<Order>,
    selected: Option<Order>,
    filter: StatusFilter,
    sort: OrderSort,
    loading: bool,
    loading_order: bool,
    error: Option<String>,
    cancelling: HashSet<OrderId>,
}

/// The signed-in user's orders, plus the list filter and sort.
#[derive(Debug)]
pub struct OrdersController {
    api: ApiClient,
    state: Mutex<OrdersState>,
    ticket: RequestTicket,
    detail_ticket: RequestTicket,
}

impl OrdersController {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: Mutex::new(OrdersState::default()),
            ticket: RequestTicket::new(),
            detail_ticket: RequestTicket::new(),
        }
    }

    /// Fetch the order history.
    pub async fn load(&self) -> LoadOutcome {
        let ticket = self.ticket.issue();
        {
            let mut state = lock(&self.state);
            state.loading = true;
            state.error = None;
        }

        let result = self.api.my_orders().await;
        if !self.ticket.is_current(ticket) {
            return LoadOutcome::Stale;
        }

        let mut state = lock(&self.state);
        state.loading = false;
        match result {
            Ok(orders) => {
                tracing::debug!(count = orders.len(), "orders loaded");
                state.orders = orders;
                LoadOutcome::Applied
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load orders");
                state.error = Some(e.user_message());
                LoadOutcome::from_error(&e)
            }
        }
    }

    /// Fetch one order into the detail slot.
    pub async fn load_order(&self, id: &OrderId) -> LoadOutcome {
        let ticket = self.detail_ticket.issue();
        {
            let mut state = lock(&self.state);
            state.loading_order = true;
            state.error = None;
        }

        let result = self.api.get_order(id).await;
        if !self.detail_ticket.is_current(ticket) {
            return LoadOutcome::Stale;
        }

        let mut state = lock(&self.state);
        state.loading_order = false;
        match result {
            Ok(order) => {
                state.selected = Some(order);
                LoadOutcome::Applied
            }
            Err(e) => {
                tracing::warn!(order = %id, error = %e, "failed to load order");
                state.error = Some(e.user_message());
                LoadOutcome::from_error(&e)
            }
        }
    }

    pub fn set_filter(&self, filter: StatusFilter) {
        lock(&self.state).filter = filter;
    }

    pub fn set_sort(&self, sort: OrderSort) {
        lock(&self.state).sort = sort;
    }

    /// Render from the current filtered, sorted projection.
    pub fn view<R>(&self, f: impl FnOnce(&OrderProjection<'_>) -> R) -> R {
        let state = lock(&self.state);
        let projection = project(&state.orders, state.filter, state.sort);
        f(&projection)
    }

    pub fn counts(&self) -> StatusCounts {
        StatusCounts::tally(&lock(&self.state).orders)
    }

    pub fn selected(&self) -> Option<Order> {
        lock(&self.state).selected.clone()
    }

    pub fn error(&self) -> Option<String> {
        lock(&self.state).error.clone()
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.state).loading
    }

    pub fn is_loading_order(&self) -> bool {
        lock(&self.state).loading_order
    }

    /// Tracker steps for a known order.
    pub fn track(&self, id: &OrderId) -> Option<StatusTrack> {
        self.find(id).map(|o| StatusTrack::for_status(o.status))
    }

    /// Check whether a cancel for `id` is pending.
    pub fn is_cancelling(&self, id: &OrderId) -> bool {
        lock(&self.state).cancelling.contains(id)
    }

    /// Ask the backend to cancel an order.
    ///
    /// Refused while another cancel for the same order is pending, or when
    /// the known status no longer allows it. The local copy changes only
    /// after the backend confirms, and is replaced with the backend's copy.
    pub async fn cancel(&self, id: &OrderId) -> Result<Order, AppError> {
        {
            let mut state = lock(&self.state);
            if state.cancelling.contains(id) {
                return Err(AppError::CancelInFlight(id.clone()));
            }
            let known = state
                .orders
                .iter()
                .chain(state.selected.iter())
                .find(|o| &o.id == id)
                .map(|o| o.status);
            if let Some(status) = known {
                if !status.can_cancel() {
                    return Err(AppError::CannotCancel(status));
                }
            }
            state.cancelling.insert(id.clone());
        }
        let guard = CancelGuard {
            state: &self.state,
            id,
        };
        let result = self.api.cancel_order(id).await;
        drop(guard);

        let mut state = lock(&self.state);
        match result {
            Ok(order) => {
                tracing::debug!(order = %id, status = order.status.as_str(), "order cancelled");
                if let Some(slot) = state.orders.iter_mut().find(|o| &o.id == id) {
                    *slot = order.clone();
                }
                if let Some(selected) = state.selected.as_mut().filter(|o| &o.id == id) {
                    *selected = order.clone();
                }
                Ok(order)
            }
            Err(e) => {
                tracing::warn!(order = %id, error = %e, "cancel failed");
                state.error = Some(e.user_message());
                Err(e.into())
            }
        }
    }

    fn find(&self, id: &OrderId) -> Option<Order> {
        let state = lock(&self.state);
        state
            .orders
            .iter()
            .chain(state.selected.iter())
            .find(|o| &o.id == id)
            .cloned()
    }
}

/// Clears the in-flight mark for one order, including when the cancel
/// future is dropped before the backend answers.
struct CancelGuard<'a> {
    state: &'a Mutex<OrdersState>,
    id: &'a OrderId,
}

impl Drop for CancelGuard<'_> {
    fn drop(&mut self) {
        lock(self.state).cancelling.remove(self.id);
    }
}

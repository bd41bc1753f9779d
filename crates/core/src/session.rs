use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::order::{Order, OrderId};
use crate::domain::product::ProductId;
use crate::domain::profile::UserProfile;

/// One turn of conversation: what the customer asked and what the agent said.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QueryLogEntry {
    pub query: String,
    pub response: String,
    pub at: DateTime<Utc>,
}

/// Mutable per-run state. Constructed once at session start, owned by a
/// single agent, and discarded on exit; nothing here survives the process.
#[derive(Clone, Debug)]
pub struct Session {
    pub cart: Vec<ProductId>,
    pub orders: Vec<Order>,
    pub profile: UserProfile,
    pub query_log: Vec<QueryLogEntry>,
    pub warranty_subscribed: bool,
    next_order_number: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            cart: Vec::new(),
            orders: Vec::new(),
            profile: UserProfile::default(),
            query_log: Vec::new(),
            warranty_subscribed: false,
            next_order_number: 1,
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out the next order id. Ids are sequential integers-as-strings
    /// starting at "1" and are never reused, even after an order is removed.
    pub fn next_order_id(&mut self) -> OrderId {
        let id = OrderId(self.next_order_number.to_string());
        self.next_order_number += 1;
        id
    }

    pub fn find_order(&self, order_id: &str) -> Option<&Order> {
        self.orders.iter().find(|order| order.id.0 == order_id)
    }

    pub fn remove_order(&mut self, order_id: &str) -> Option<Order> {
        let index = self.orders.iter().position(|order| order.id.0 == order_id)?;
        Some(self.orders.remove(index))
    }

    pub fn last_order(&self) -> Option<&Order> {
        self.orders.last()
    }

    /// Append-only; read back by the history handler and the insight report.
    pub fn record(&mut self, query: &str, response: &str) {
        self.query_log.push(QueryLogEntry {
            query: query.to_string(),
            response: response.to_string(),
            at: Utc::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::Session;
    use crate::domain::order::{Order, OrderStatus};

    fn order(session: &mut Session) -> Order {
        Order {
            id: session.next_order_id(),
            items: vec![],
            placed_at: Utc::now(),
            status: OrderStatus::Processing,
            tracking: "TRACK-0000".to_string(),
        }
    }

    #[test]
    fn order_ids_are_sequential_and_never_reused() {
        let mut session = Session::new();
        let first = order(&mut session);
        assert_eq!(first.id.0, "1");
        session.orders.push(first);

        session.remove_order("1").expect("order 1 should be removable");
        let second = order(&mut session);
        assert_eq!(second.id.0, "2");
    }

    #[test]
    fn record_appends_in_order() {
        let mut session = Session::new();
        session.record("hi", "hello");
        session.record("bye", "goodbye");

        let queries: Vec<_> = session.query_log.iter().map(|e| e.query.as_str()).collect();
        assert_eq!(queries, vec!["hi", "bye"]);
    }
}

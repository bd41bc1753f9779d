//! Keyword-rule intent classifier.
//!
//! Rules live in one priority-ordered table and the first match wins. The
//! ordering is load-bearing: a query can satisfy several rules ("what is the
//! policy to cancel order 5" hits both the cancel and the policy triggers)
//! and must resolve to the same intent every time. There is no scoring and
//! no tie-breaking beyond position in the table.

use crate::extract::{add_to_cart_pattern, remove_from_cart_pattern};

/// Closed set of actions a query can be routed to. `Unknown` is the fallback
/// when no rule fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Intent {
    Dashboard,
    Return,
    ChangeOrder,
    ViewCart,
    Purchase,
    PaymentInfo,
    UpdateInfo,
    CancelOrder,
    PolicyFaq,
    Warranty,
    PaymentProcess,
    TrackOrder,
    ProductSearch,
    Compare,
    AddToCart,
    RemoveFromCart,
    Coupon,
    SizeFit,
    ReorderSubscription,
    ViewHistory,
    Unknown,
}

impl Intent {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Return => "return",
            Self::ChangeOrder => "change_order",
            Self::ViewCart => "view_cart",
            Self::Purchase => "purchase",
            Self::PaymentInfo => "payment_info",
            Self::UpdateInfo => "update_info",
            Self::CancelOrder => "cancel_order",
            Self::PolicyFaq => "policy_faq",
            Self::Warranty => "warranty",
            Self::PaymentProcess => "payment_process",
            Self::TrackOrder => "track_order",
            Self::ProductSearch => "product_search",
            Self::Compare => "compare",
            Self::AddToCart => "add_to_cart",
            Self::RemoveFromCart => "remove_from_cart",
            Self::Coupon => "coupon",
            Self::SizeFit => "size_fit",
            Self::ReorderSubscription => "reorder_subscription",
            Self::ViewHistory => "view_history",
            Self::Unknown => "unknown",
        }
    }
}

struct Rule {
    intent: Intent,
    matches: fn(&str) -> bool,
}

/// Priority-ordered dispatch table; predicates receive the lowercased query.
const RULES: &[Rule] = &[
    Rule { intent: Intent::Dashboard, matches: |q| q.contains("dashboard") },
    Rule { intent: Intent::Return, matches: |q| q.contains("return") },
    Rule {
        intent: Intent::ChangeOrder,
        matches: |q| q.contains("change order") || q.contains("modify order"),
    },
    Rule { intent: Intent::ViewCart, matches: |q| q.contains("view cart") },
    Rule {
        intent: Intent::Purchase,
        matches: |q| q.contains("purchase") || q.contains("buy") || q.contains("checkout"),
    },
    Rule { intent: Intent::PaymentInfo, matches: |q| q.contains("payment info") },
    Rule {
        intent: Intent::UpdateInfo,
        matches: |q| q.contains("change name") || q.contains("update address"),
    },
    Rule { intent: Intent::CancelOrder, matches: |q| q.contains("cancel order") },
    Rule {
        intent: Intent::PolicyFaq,
        matches: |q| {
            q.contains("policy")
                || q.contains("faq")
                || q.contains("payment methods")
                || q.contains("payment options")
                || (q.contains("accepted") && q.contains("payment"))
        },
    },
    Rule { intent: Intent::Warranty, matches: |q| q.contains("warranty") },
    Rule {
        intent: Intent::PaymentProcess,
        matches: |q| q.contains("payment processing") || q.contains("finish payment"),
    },
    Rule {
        intent: Intent::TrackOrder,
        matches: |q| q.contains("track order") || q.contains("when will my order arrive"),
    },
    Rule {
        intent: Intent::ProductSearch,
        matches: |q| q.contains("search") || q.contains("show me") || q.contains("recommend"),
    },
    Rule { intent: Intent::Compare, matches: |q| q.contains("compare") },
    Rule { intent: Intent::AddToCart, matches: |q| add_to_cart_pattern().is_match(q) },
    Rule { intent: Intent::RemoveFromCart, matches: |q| remove_from_cart_pattern().is_match(q) },
    Rule { intent: Intent::Coupon, matches: |q| q.contains("coupon") || q.contains("promo") },
    Rule {
        intent: Intent::SizeFit,
        matches: |q| q.contains("size") || q.contains("fit") || q.contains("compatibility"),
    },
    Rule {
        intent: Intent::ReorderSubscription,
        matches: |q| q.contains("reorder") || q.contains("subscription"),
    },
    Rule {
        intent: Intent::ViewHistory,
        matches: |q| {
            (q.contains("query") || q.contains("view"))
                && (q.contains("chats") || q.contains("history") || q.contains("log"))
        },
    },
];

/// Classify one query. Pure function of the input: lowercases it and walks
/// the rule table, no state, no side effects.
pub fn classify(query: &str) -> Intent {
    let query = query.to_lowercase();
    RULES
        .iter()
        .find(|rule| (rule.matches)(&query))
        .map(|rule| rule.intent)
        .unwrap_or(Intent::Unknown)
}

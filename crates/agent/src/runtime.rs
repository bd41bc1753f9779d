//! Agent runtime: classify, dispatch, log, recover.
//!
//! The runtime owns the catalog, the session state, and the RNG, and is the
//! only place a query crosses from text to a handler. Randomness is a
//! generic parameter so production uses an entropy-seeded [`StdRng`] while
//! tests inject a fixed seed and assert exact selections.

use std::panic::{self, AssertUnwindSafe};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use shopmate_core::{
    AgentError, AppConfig, Catalog, Session, SizeChart, StoreConfig, StorePolicies,
};

use crate::admin;
use crate::classifier::{classify, Intent};
use crate::{handlers, search};

/// One dispatched customer turn. `Dashboard` hands control to the caller's
/// admin sub-session; everything else is a finished, already-logged reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Turn {
    Reply(String),
    Dashboard,
}

/// Outcome of one admin dashboard line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdminTurn {
    Exit,
    Output(String),
}

pub struct Agent<R: Rng = StdRng> {
    catalog: Catalog,
    policies: StorePolicies,
    sizes: SizeChart,
    store: StoreConfig,
    session: Session,
    rng: R,
}

impl Agent<StdRng> {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<R: Rng> Agent<R> {
    pub fn with_rng(config: &AppConfig, rng: R) -> Self {
        let mut session = Session::new();
        session.warranty_subscribed = config.store.warranty_subscribed;

        Self {
            catalog: Catalog::demo(),
            policies: StorePolicies,
            sizes: SizeChart,
            store: config.store.clone(),
            session,
            rng,
        }
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Classify and dispatch one query, then log the turn. Recoverable
    /// handler errors become their customer-facing messages; a panicking
    /// handler is downgraded to the generic apology so the session loop
    /// never dies mid-conversation.
    pub fn handle(&mut self, query: &str) -> Turn {
        let intent = classify(query);
        debug!(intent = intent.label(), "classified query");

        if intent == Intent::Dashboard {
            return Turn::Dashboard;
        }

        let response = run_recovering(|| self.dispatch(intent, query));
        self.session.record(query, &response);
        Turn::Reply(response)
    }

    /// Route one admin dashboard line. Dashboard output is printed by the
    /// caller as it goes; only leaving the dashboard produces a logged reply
    /// (see [`Agent::close_dashboard`]).
    pub fn handle_admin(&self, input: &str) -> AdminTurn {
        let command = admin::classify(input);
        if command == admin::AdminCommand::Exit {
            return AdminTurn::Exit;
        }
        AdminTurn::Output(admin::render(command, &self.session.query_log))
    }

    /// Close the dashboard opened by `query`, recording the fixed response
    /// against it.
    pub fn close_dashboard(&mut self, query: &str) -> String {
        let response = "Exited dashboard.".to_string();
        self.session.record(query, &response);
        response
    }

    fn dispatch(&mut self, intent: Intent, query: &str) -> Result<String, AgentError> {
        match intent {
            // Dashboard is intercepted in `handle`; a direct call falls back.
            Intent::Dashboard | Intent::Unknown => handlers::unknown(&self.session),
            Intent::Return => handlers::return_order(query, &mut self.session, &self.store),
            Intent::ChangeOrder => handlers::change_order(query, &self.session),
            Intent::ViewCart => handlers::view_cart(&self.session, &self.catalog),
            Intent::Purchase => handlers::purchase(&mut self.session, &self.store, &mut self.rng),
            Intent::PaymentInfo => handlers::payment_info(&self.session),
            Intent::UpdateInfo => handlers::update_info(query, &mut self.session),
            Intent::CancelOrder => handlers::cancel_order(query, &mut self.session, &self.store),
            Intent::PolicyFaq => handlers::policy_faq(query, &self.policies),
            Intent::Warranty => handlers::warranty(&self.session),
            Intent::PaymentProcess => handlers::payment_process(),
            Intent::TrackOrder => handlers::track_order(query, &self.session, &self.store),
            Intent::ProductSearch => search::product_search(
                query,
                &self.session,
                &self.catalog,
                &self.store,
                &mut self.rng,
            ),
            Intent::Compare => search::compare(query, &self.catalog),
            Intent::AddToCart => handlers::add_to_cart(query, &mut self.session, &self.catalog),
            Intent::RemoveFromCart => {
                handlers::remove_from_cart(query, &mut self.session, &self.catalog)
            }
            Intent::Coupon => handlers::coupon(&self.session, &self.catalog, &self.store),
            Intent::SizeFit => handlers::size_fit(query, &self.catalog, &self.sizes),
            Intent::ReorderSubscription => handlers::reorder(&mut self.session, &self.catalog),
            Intent::ViewHistory => handlers::view_history(&self.session),
        }
    }
}

/// Run one handler, converting both error returns and panics into response
/// text. Nothing a handler does may take down the session.
fn run_recovering<F>(operation: F) -> String
where
    F: FnOnce() -> Result<String, AgentError>,
{
    match panic::catch_unwind(AssertUnwindSafe(operation)) {
        Ok(Ok(response)) => response,
        Ok(Err(error)) => {
            debug!(error = %error, "handler returned recoverable error");
            error.user_message()
        }
        Err(payload) => {
            let detail = panic_detail(payload.as_ref());
            warn!(detail = %detail, "handler panicked; recovering");
            format!(
                "An unexpected error occurred: {detail}. Please rephrase your query and try again."
            )
        }
    }
}

fn panic_detail(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else {
        "unknown handler fault".to_string()
    }
}

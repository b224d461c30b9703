//! Route guards for protected parts of the storefront
//!
//! Guards are synchronous predicates over the stored session. They never touch
//! the network and never refresh; a token that expired a moment ago still
//! passes and is corrected by the next API call.

use crate::session::SessionSnapshot;
use crate::storage::TokenStore;

/// Login page route
pub const LOGIN_ROUTE: &str = "/account/login";
/// Route shown to admins who open a customer-only page
pub const FORBIDDEN_ROUTE: &str = "/forbidden";

/// Outcome of a guard check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    Redirect(&'static str),
}

impl GuardDecision {
    pub fn allows(&self) -> bool {
        matches!(self, GuardDecision::Render)
    }

    pub fn redirect_target(&self) -> Option<&'static str> {
        match *self {
            GuardDecision::Render => None,
            GuardDecision::Redirect(route) => Some(route),
        }
    }
}

pub trait Guard {
    fn check(&self, session: &SessionSnapshot) -> GuardDecision;

    /// Check against whatever the store holds right now
    fn check_store(&self, store: &TokenStore) -> GuardDecision {
        self.check(&store.snapshot())
    }
}

/// Admin back-office: needs a token and the admin role
#[derive(Debug, Clone, Copy, Default)]
pub struct AdminGuard;

impl Guard for AdminGuard {
    fn check(&self, session: &SessionSnapshot) -> GuardDecision {
        if session.is_authenticated() && session.is_admin() {
            GuardDecision::Render
        } else {
            GuardDecision::Redirect(LOGIN_ROUTE)
        }
    }
}

/// Customer pages (cart, checkout, ...): keeps admins out, lets everyone else in
#[derive(Debug, Clone, Copy, Default)]
pub struct UserOnlyGuard;

impl Guard for UserOnlyGuard {
    fn check(&self, session: &SessionSnapshot) -> GuardDecision {
        if session.is_admin() {
            GuardDecision::Redirect(FORBIDDEN_ROUTE)
        } else {
            GuardDecision::Render
        }
    }
}

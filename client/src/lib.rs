//! Client-side data and validation layer for the subscriptions service.
//!
//! [`api::HttpSubscriptionApi`] talks to the server; [`dashboard::Dashboard`]
//! keeps the per-view state (rows, form, delete prompt, toasts) and
//! [`view`] turns stored rows into display rows.

pub mod api;
pub mod dashboard;
pub mod dates;
pub mod error;
pub mod notifications;
pub mod validation;
pub mod view;
pub mod workflow;

pub use api::{HttpSubscriptionApi, SubscriptionApi};
pub use dashboard::Dashboard;
pub use error::{ClientError, ClientResult};

//! Table view model: one display row per stored subscription.

use chrono::NaiveDate;
use common::subscription::{Subscription, SubscriptionStatus};
use serde::Serialize;

use crate::dates::{remaining_days, visual_status};

pub const EMPTY_TABLE_MESSAGE: &str = "No subscriptions yet.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Badge {
    Active,
    Expired,
    Cancelled,
}

impl Badge {
    pub fn css_class(self) -> &'static str {
        match self {
            Badge::Active => "bad-active",
            Badge::Expired => "bad-exp",
            Badge::Cancelled => "bad-cancel",
        }
    }
}

impl From<SubscriptionStatus> for Badge {
    fn from(status: SubscriptionStatus) -> Self {
        match status {
            SubscriptionStatus::Active => Badge::Active,
            SubscriptionStatus::Expired => Badge::Expired,
            SubscriptionStatus::Cancelled => Badge::Cancelled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowView {
    pub id: i64,
    pub user_email: String,
    pub plan_name: String,
    pub start_date: String,
    pub end_date: String,
    pub monthly_cost: String,
    pub remaining_days: i64,
    pub remaining_label: String,
    pub status: SubscriptionStatus,
    pub badge: Badge,
}

impl RowView {
    pub fn new(row: &Subscription, today: NaiveDate) -> Self {
        let remaining = remaining_days(today, row.end_date);
        let status = visual_status(remaining, row.status);
        Self {
            id: row.id,
            user_email: row.user_email.clone(),
            plan_name: row.plan_name.clone(),
            start_date: row.start_date.to_string(),
            end_date: row.end_date.to_string(),
            monthly_cost: format!("{:.2}", row.monthly_cost),
            remaining_days: remaining,
            remaining_label: days_label(remaining),
            status,
            badge: Badge::from(status),
        }
    }

    pub fn badge_class(&self) -> &'static str {
        self.badge.css_class()
    }
}

/// "1 day", "0 days", "-3 days".
pub fn days_label(days: i64) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{days} days")
    }
}

pub fn rows_view(rows: &[Subscription], today: NaiveDate) -> Vec<RowView> {
    rows.iter().map(|row| RowView::new(row, today)).collect()
}

use std::{collections::BTreeMap, fmt, str::FromStr, sync::LazyLock};

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// Lifecycle status stored with every subscription row.
///
/// Serialized and persisted as the exact literal (`"Active"`, `"Expired"`,
/// `"Cancelled"`); any other literal is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubscriptionStatus {
    Active,
    Expired,
    Cancelled,
}

impl SubscriptionStatus {
    pub const ALL: [SubscriptionStatus; 3] = [
        SubscriptionStatus::Active,
        SubscriptionStatus::Expired,
        SubscriptionStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "Active",
            SubscriptionStatus::Expired => "Expired",
            SubscriptionStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown subscription status '{0}'")]
pub struct StatusParseError(pub String);

impl FromStr for SubscriptionStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| StatusParseError(s.to_string()))
    }
}

impl TryFrom<String> for SubscriptionStatus {
    type Error = StatusParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Body of the create and update calls. Every mutable field is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionPayload {
    pub user_email: String,
    pub plan_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub monthly_cost: f64,
    pub status: SubscriptionStatus,
}

/// One persisted subscription row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Subscription {
    pub id: i64,
    pub user_email: String,
    pub plan_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub monthly_cost: f64,
    #[sqlx(try_from = "String")]
    pub status: SubscriptionStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Subscription {
    pub fn payload(&self) -> SubscriptionPayload {
        SubscriptionPayload {
            user_email: self.user_email.clone(),
            plan_name: self.plan_name.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            monthly_cost: self.monthly_cost,
            status: self.status,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    UserEmail,
    PlanName,
    StartDate,
    EndDate,
    MonthlyCost,
    Status,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::UserEmail => "user_email",
            Field::PlanName => "plan_name",
            Field::StartDate => "start_date",
            Field::EndDate => "end_date",
            Field::MonthlyCost => "monthly_cost",
            Field::Status => "status",
        }
    }
}

/// Field-scoped validation messages. Only the first message per field is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: Field, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .iter()
            .map(|(field, msg)| format!("{}: {}", field.as_str(), msg))
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Checks an email for presence and shape, recording at most one message.
pub fn check_email(email: &str, errors: &mut FieldErrors) {
    if email.is_empty() {
        errors.add(Field::UserEmail, "Email required.");
    } else if !is_valid_email(email) {
        errors.add(Field::UserEmail, "Invalid email.");
    }
}

pub fn check_monthly_cost(cost: f64, errors: &mut FieldErrors) {
    if !cost.is_finite() || cost < 0.0 {
        errors.add(Field::MonthlyCost, "Must be a non-negative number.");
    }
}

impl SubscriptionPayload {
    /// Applies the rules every stored row must satisfy.
    pub fn check(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_email(&self.user_email, &mut errors);
        if self.plan_name.trim().is_empty() {
            errors.add(Field::PlanName, "Plan required.");
        }
        if self.end_date < self.start_date {
            errors.add(Field::EndDate, "End date must be on/after start date.");
        }
        check_monthly_cost(self.monthly_cost, &mut errors);
        errors.into_result()
    }
}

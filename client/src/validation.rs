use chrono::NaiveDate;
use common::subscription::{
    Field, FieldErrors, Subscription, SubscriptionPayload, SubscriptionStatus, check_email,
    check_monthly_cost,
};
use serde::{Deserialize, Serialize};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Form inputs exactly as typed, before any parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionForm {
    pub user_email: String,
    pub plan_name: String,
    pub start_date: String,
    pub end_date: String,
    pub monthly_cost: String,
    pub status: String,
}

impl SubscriptionForm {
    /// Blank form for a new subscription: both dates on `today`, free, Active.
    pub fn new_for(today: NaiveDate) -> Self {
        let today = today.format(DATE_FORMAT).to_string();
        Self {
            user_email: String::new(),
            plan_name: String::new(),
            start_date: today.clone(),
            end_date: today,
            monthly_cost: "0.00".to_string(),
            status: SubscriptionStatus::Active.to_string(),
        }
    }

    pub fn from_row(row: &Subscription) -> Self {
        Self {
            user_email: row.user_email.clone(),
            plan_name: row.plan_name.clone(),
            start_date: row.start_date.format(DATE_FORMAT).to_string(),
            end_date: row.end_date.format(DATE_FORMAT).to_string(),
            monthly_cost: row.monthly_cost.to_string(),
            status: row.status.to_string(),
        }
    }
}

/// Checks every field and builds the payload to submit.
///
/// All problems are reported at once, one message per field.
pub fn validate(form: &SubscriptionForm) -> Result<SubscriptionPayload, FieldErrors> {
    let mut errors = FieldErrors::new();

    let user_email = form.user_email.trim();
    check_email(user_email, &mut errors);

    let plan_name = form.plan_name.trim();
    if plan_name.is_empty() {
        errors.add(Field::PlanName, "Plan required.");
    }

    let start_date = parse_date(
        &form.start_date,
        Field::StartDate,
        "Start date required.",
        &mut errors,
    );
    let end_date = parse_date(&form.end_date, Field::EndDate, "End date required.", &mut errors);
    if let (Some(start), Some(end)) = (start_date, end_date) {
        if end < start {
            errors.add(Field::EndDate, "End date must be on/after start date.");
        }
    }

    let monthly_cost = parse_cost(&form.monthly_cost, &mut errors);

    let status = form.status.parse::<SubscriptionStatus>().ok();
    if status.is_none() {
        errors.add(Field::Status, "Status must be Active, Expired or Cancelled.");
    }

    match (start_date, end_date, monthly_cost, status) {
        (Some(start_date), Some(end_date), Some(monthly_cost), Some(status))
            if errors.is_empty() =>
        {
            let payload = SubscriptionPayload {
                user_email: user_email.to_string(),
                plan_name: plan_name.to_string(),
                start_date,
                end_date,
                monthly_cost,
                status,
            };
            payload.check()?;
            Ok(payload)
        }
        _ => Err(errors),
    }
}

fn parse_date(
    raw: &str,
    field: Field,
    missing: &'static str,
    errors: &mut FieldErrors,
) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.add(field, missing);
        return None;
    }
    match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.add(field, "Invalid date.");
            None
        }
    }
}

fn parse_cost(raw: &str, errors: &mut FieldErrors) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.add(Field::MonthlyCost, "Monthly cost required.");
        return None;
    }
    let Ok(cost) = raw.parse::<f64>() else {
        errors.add(Field::MonthlyCost, "Must be a non-negative number.");
        return None;
    };
    check_monthly_cost(cost, errors);
    Some(cost)
}

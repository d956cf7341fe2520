use crate::error::AppError;
use chrono::{Days, NaiveDate};

/// How far ahead a presence entry may be booked, inclusive.
pub const BOOKING_HORIZON_DAYS: u64 = 14;

const MIN_PASSWORD_LEN: usize = 6;

/// `date` must fall in `[today, today + 14 days]`.
pub fn check_entry_date(date: NaiveDate, today: NaiveDate) -> Result<(), AppError> {
    let horizon = today
        .checked_add_days(Days::new(BOOKING_HORIZON_DAYS))
        .ok_or(AppError::DateOutOfRange)?;

    if date < today || date > horizon {
        return Err(AppError::DateOutOfRange);
    }
    Ok(())
}

/// Last day of the seven-day week starting at `week_start`.
pub fn week_end(week_start: NaiveDate) -> Result<NaiveDate, AppError> {
    week_start
        .checked_add_days(Days::new(6))
        .ok_or_else(|| AppError::invalid("week_start is out of range"))
}

pub fn check_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), AppError> {
    if start > end {
        return Err(AppError::invalid("start_date cannot be after end_date"));
    }
    Ok(())
}

/// Trims and lowercases; rejects anything that is not `local@domain.tld`.
pub fn normalize_email(raw: &str) -> Result<String, AppError> {
    let email = raw.trim().to_lowercase();

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && !email.contains(char::is_whitespace)
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
                && !domain.ends_with('.')
        }
        None => false,
    };

    if !valid {
        return Err(AppError::invalid("A valid email address is required"));
    }
    Ok(email)
}

pub fn check_name(name: &str) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::invalid("Name must not be empty"));
    }
    Ok(name.to_string())
}

pub fn check_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::invalid(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

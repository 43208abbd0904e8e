//! Standard field rules for customers, taxis and bookings.
//!
//! Rules are plain predicates over one record. Nothing here consults a
//! store; uniqueness and references are the admission engine's business.

use fleetbook_core::{
    application::ports::FieldChecker,
    domain::{Booking, Customer, FieldViolations, Taxi},
};

/// The default [`FieldChecker`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleChecker;

impl RuleChecker {
    pub fn new() -> Self {
        Self
    }
}

impl FieldChecker for RuleChecker {
    fn check_customer(&self, customer: &Customer) -> FieldViolations {
        let mut v = FieldViolations::new();

        let name = customer.name.trim();
        if name.is_empty() {
            v.push("name", "Name must not be empty");
        } else if name.chars().count() > Customer::MAX_NAME_LEN {
            v.push(
                "name",
                format!("Name must be at most {} characters", Customer::MAX_NAME_LEN),
            );
        } else if name.chars().any(|c| c.is_ascii_digit()) {
            v.push("name", "Please use a name without numbers");
        }

        if customer.email.trim().is_empty() {
            v.push("email", "Email must not be empty");
        } else if !is_email(customer.email.trim()) {
            v.push("email", "The email address must be in the format of name@domain.com");
        }

        if !is_phone(customer.phone.trim()) {
            v.push("phone", "Phone number must be 0 followed by 10 digits");
        }

        v
    }

    fn check_taxi(&self, taxi: &Taxi) -> FieldViolations {
        let mut v = FieldViolations::new();

        if taxi.seats < Taxi::MIN_SEATS {
            v.push("seats", format!("The minimum number of seats is {}", Taxi::MIN_SEATS));
        } else if taxi.seats > Taxi::MAX_SEATS {
            v.push("seats", format!("The maximum number of seats is {}", Taxi::MAX_SEATS));
        }

        let reg = taxi.reg.trim();
        if reg.chars().count() != Taxi::REG_LEN {
            v.push(
                "reg",
                format!("Registration must be exactly {} characters", Taxi::REG_LEN),
            );
        } else if !reg.chars().all(|c| c.is_ascii_alphanumeric()) {
            v.push("reg", "Registration must contain only letters and digits");
        }

        v
    }

    /// Bookings carry no generic field rules; the validator owns the
    /// required-field and future-date checks.
    fn check_booking(&self, _booking: &Booking) -> FieldViolations {
        FieldViolations::new()
    }
}

/// `local@domain.tld`, no whitespace, exactly one `@`.
fn is_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => {
            !host.is_empty() && !host.starts_with('.') && !host.ends_with('.') && tld.len() >= 2
        }
        None => false,
    }
}

fn is_phone(phone: &str) -> bool {
    phone.len() == 11 && phone.starts_with('0') && phone.bytes().all(|b| b.is_ascii_digit())
}

//! Booking lifecycle: stay status, payment status, and the guest request.
//!
//! Stay status and payment status are independent axes. Administrators may
//! move a booking between any two stay statuses; the only transition with a
//! side effect is moving into `checked-out`, which hands the booked rooms
//! back to the available pool.

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::error::CoreError;
use crate::stay::validate_stay;
use crate::types::{DbId, Timestamp};

define_text_enum! {
    /// Guest-stay lifecycle stage.
    BookingStatus {
        Pending = "pending",
        Confirmed = "confirmed",
        CheckedIn = "checked-in",
        CheckedOut = "checked-out",
        Cancelled = "cancelled",
    }
}

define_text_enum! {
    /// Billing state, tracked separately from [`BookingStatus`].
    PaymentStatus {
        Pending = "pending",
        Partial = "partial",
        Paid = "paid",
    }
}

/// Status given to bookings created by the guest booking flow.
///
/// Bookings are auto-confirmed; `pending` is only reachable through an
/// administrator's status change.
pub const INITIAL_BOOKING_STATUS: BookingStatus = BookingStatus::Confirmed;

/// Payment status given to every new booking.
pub const INITIAL_PAYMENT_STATUS: PaymentStatus = PaymentStatus::Pending;

/// A resolved move from one stay status to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub from: BookingStatus,
    pub to: BookingStatus,
}

impl StatusChange {
    /// Whether applying this change must mark the booking's rooms available.
    pub fn releases_rooms(&self) -> bool {
        self.to == BookingStatus::CheckedOut && self.from != BookingStatus::CheckedOut
    }
}

impl BookingStatus {
    /// Resolve a move to `next`.
    ///
    /// Every pair of statuses is a legal move, including jumping straight
    /// from `pending` to `checked-out`.
    pub fn transition_to(self, next: BookingStatus) -> StatusChange {
        StatusChange {
            from: self,
            to: next,
        }
    }
}

// ---------------------------------------------------------------------------
// Guest booking request
// ---------------------------------------------------------------------------

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Booking form submitted by a guest after an availability search.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BookingRequest {
    pub room_id: DbId,
    #[validate(
        custom(function = "not_blank", message = "Customer name is required"),
        length(max = 200, message = "Customer name is too long")
    )]
    pub customer_name: String,
    #[validate(
        custom(function = "not_blank", message = "Phone number is required"),
        length(max = 40, message = "Phone number is too long")
    )]
    pub phone_number: String,
    #[validate(email(message = "Email address is not valid"))]
    pub email: Option<String>,
    pub gender: Option<String>,
    pub nationality: Option<String>,
    pub id_number: Option<String>,
    pub special_requests: Option<String>,
    /// RFC 3339 or `YYYY-MM-DD`, as carried over from the search page.
    #[serde(deserialize_with = "crate::stay::deserialize_stay_date")]
    pub check_in_date: Timestamp,
    #[serde(deserialize_with = "crate::stay::deserialize_stay_date")]
    pub check_out_date: Timestamp,
    #[validate(range(min = 1, message = "At least one adult is required"))]
    pub adults: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "Children cannot be negative"))]
    pub children: i32,
    #[serde(default)]
    pub accept_terms: bool,
}

impl BookingRequest {
    /// Run every pre-write check on the form.
    ///
    /// Terms acceptance is checked first, then field rules, then the date
    /// range.
    pub fn check(&self) -> Result<(), CoreError> {
        if !self.accept_terms {
            return Err(CoreError::Validation(
                "Terms and conditions must be accepted".to_string(),
            ));
        }
        self.validate()?;
        validate_stay(self.check_in_date, self.check_out_date)
    }

    /// Optional text fields are stored as `NULL` when blank.
    pub fn non_blank(value: &Option<String>) -> Option<String> {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    use super::*;

    fn request() -> BookingRequest {
        BookingRequest {
            room_id: 1,
            customer_name: "Ada Guest".to_string(),
            phone_number: "+1 555 0100".to_string(),
            email: Some("ada@example.com".to_string()),
            gender: None,
            nationality: None,
            id_number: None,
            special_requests: None,
            check_in_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            check_out_date: Utc.with_ymd_and_hms(2024, 1, 4, 0, 0, 0).unwrap(),
            adults: 2,
            children: 0,
            accept_terms: true,
        }
    }

    // -----------------------------------------------------------------------
    // Status vocabulary
    // -----------------------------------------------------------------------

    #[test]
    fn hyphenated_statuses_parse() {
        assert_eq!("checked-in".parse::<BookingStatus>().unwrap(), BookingStatus::CheckedIn);
        assert_eq!(BookingStatus::CheckedOut.as_str(), "checked-out");
    }

    #[test]
    fn new_bookings_are_confirmed_and_unpaid() {
        assert_eq!(INITIAL_BOOKING_STATUS, BookingStatus::Confirmed);
        assert_eq!(INITIAL_PAYMENT_STATUS, PaymentStatus::Pending);
    }

    // -----------------------------------------------------------------------
    // State machine
    // -----------------------------------------------------------------------

    #[test]
    fn any_status_can_move_to_any_other() {
        for from in BookingStatus::ALL {
            for to in BookingStatus::ALL {
                let change = from.transition_to(*to);
                assert_eq!(change.from, *from);
                assert_eq!(change.to, *to);
            }
        }
    }

    #[test]
    fn pending_straight_to_checked_out_releases_rooms() {
        let change = BookingStatus::Pending.transition_to(BookingStatus::CheckedOut);
        assert!(change.releases_rooms());
    }

    #[test]
    fn only_checkout_releases_rooms() {
        for to in BookingStatus::ALL {
            let change = BookingStatus::Confirmed.transition_to(*to);
            assert_eq!(change.releases_rooms(), *to == BookingStatus::CheckedOut);
        }
    }

    #[test]
    fn repeated_checkout_is_a_noop() {
        let change = BookingStatus::CheckedOut.transition_to(BookingStatus::CheckedOut);
        assert_eq!(change.from, change.to);
        assert!(!change.releases_rooms());
    }

    // -----------------------------------------------------------------------
    // Request checks
    // -----------------------------------------------------------------------

    #[test]
    fn valid_request_passes() {
        assert!(request().check().is_ok());
    }

    #[test]
    fn terms_must_be_accepted() {
        let mut req = request();
        req.accept_terms = false;
        assert_matches!(req.check(), Err(CoreError::Validation(msg)) if msg.contains("Terms"));
    }

    #[test]
    fn blank_name_and_phone_rejected() {
        let mut req = request();
        req.customer_name = "   ".to_string();
        req.phone_number = String::new();
        let err = req.check().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Customer name is required"), "{msg}");
        assert!(msg.contains("Phone number is required"), "{msg}");
    }

    #[test]
    fn malformed_email_rejected() {
        let mut req = request();
        req.email = Some("not-an-email".to_string());
        assert_matches!(req.check(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn zero_adults_rejected() {
        let mut req = request();
        req.adults = 0;
        assert_matches!(req.check(), Err(CoreError::Validation(msg)) if msg.contains("adult"));
    }

    #[test]
    fn checkout_equal_to_checkin_rejected() {
        let mut req = request();
        req.check_out_date = req.check_in_date;
        assert_matches!(req.check(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn blank_optionals_become_none() {
        assert_eq!(BookingRequest::non_blank(&Some("  ".into())), None);
        assert_eq!(
            BookingRequest::non_blank(&Some(" DE ".into())),
            Some("DE".to_string())
        );
        assert_eq!(BookingRequest::non_blank(&None), None);
    }

    #[test]
    fn form_accepts_plain_dates() {
        let form: BookingRequest = serde_json::from_value(serde_json::json!({
            "room_id": 1,
            "customer_name": "Ada Lovelace",
            "phone_number": "+44 20 7946 0000",
            "check_in_date": "2024-01-01",
            "check_out_date": "2024-01-04T00:00:00Z",
            "adults": 2,
            "accept_terms": true,
        }))
        .unwrap();

        assert_eq!(form.check_in_date, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(form.check_out_date, Utc.with_ymd_and_hms(2024, 1, 4, 0, 0, 0).unwrap());
        assert!(form.check().is_ok());
    }
}


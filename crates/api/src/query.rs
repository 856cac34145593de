//! Query-string types shared by the room and booking handlers.
//!
//! Stay searches use the camelCase names the booking pages put in their
//! URLs (`roomId`, `checkIn`, `checkOut`, `adults`, `children`). Dates
//! are RFC 3339 or plain `YYYY-MM-DD`.

use hotelier_core::availability::AvailabilityQuery;
use hotelier_core::booking::BookingStatus;
use hotelier_core::room::RoomCategory;
use hotelier_core::stay::{deserialize_optional_stay_date, deserialize_stay_date};
use hotelier_core::types::{DbId, Timestamp};
use serde::Deserialize;

/// `?checkIn=&checkOut=&adults=&children=`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StayParams {
    #[serde(deserialize_with = "deserialize_stay_date")]
    pub check_in: Timestamp,
    #[serde(deserialize_with = "deserialize_stay_date")]
    pub check_out: Timestamp,
    pub adults: i32,
    #[serde(default)]
    pub children: i32,
}

impl From<&StayParams> for AvailabilityQuery {
    fn from(params: &StayParams) -> Self {
        AvailabilityQuery {
            check_in: params.check_in,
            check_out: params.check_out,
            adults: params.adults,
            children: params.children,
        }
    }
}

/// `?roomId=` plus the stay parameters.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteParams {
    pub room_id: DbId,
    #[serde(deserialize_with = "deserialize_stay_date")]
    pub check_in: Timestamp,
    #[serde(deserialize_with = "deserialize_stay_date")]
    pub check_out: Timestamp,
    pub adults: i32,
    #[serde(default)]
    pub children: i32,
}

impl From<&QuoteParams> for AvailabilityQuery {
    fn from(params: &QuoteParams) -> Self {
        AvailabilityQuery {
            check_in: params.check_in,
            check_out: params.check_out,
            adults: params.adults,
            children: params.children,
        }
    }
}

/// `?category=`
#[derive(Debug, Deserialize)]
pub struct CategoryParams {
    pub category: Option<RoomCategory>,
}

/// `?status=&from=&to=&search=` for the booking dashboard.
#[derive(Debug, Deserialize)]
pub struct BookingListParams {
    pub status: Option<BookingStatus>,
    #[serde(default, deserialize_with = "deserialize_optional_stay_date")]
    pub from: Option<Timestamp>,
    #[serde(default, deserialize_with = "deserialize_optional_stay_date")]
    pub to: Option<Timestamp>,
    pub search: Option<String>,
}

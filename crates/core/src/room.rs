//! Room vocabulary, field rules, and category statistics.

use serde::Serialize;

use crate::error::CoreError;

define_text_enum! {
    /// Administrative occupancy flag of a room.
    ///
    /// This is not a date-aware calendar: a room is `available` whenever an
    /// administrator (or the booking lifecycle) last marked it so.
    RoomStatus {
        Available = "available",
        Occupied = "occupied",
        Maintenance = "maintenance",
        Cleaning = "cleaning",
    }
}

define_text_enum! {
    /// Room tier. Drives default amenities and the numbering block.
    RoomCategory {
        Single = "single",
        Comfort = "comfort",
        Vip = "vip",
    }
}

impl Default for RoomStatus {
    fn default() -> Self {
        RoomStatus::Available
    }
}

impl Default for RoomCategory {
    fn default() -> Self {
        RoomCategory::Single
    }
}

impl RoomCategory {
    /// Leading digit of this category's room-number block (`1xx`, `2xx`, `3xx`).
    pub fn number_prefix(self) -> u32 {
        match self {
            RoomCategory::Single => 1,
            RoomCategory::Comfort => 2,
            RoomCategory::Vip => 3,
        }
    }

    /// Amenities a new room of this category gets when none are supplied.
    pub fn default_amenities(self) -> &'static [&'static str] {
        match self {
            RoomCategory::Single => &["Wi-Fi", "TV", "Air Conditioning", "Private Bathroom"],
            RoomCategory::Comfort => &[
                "Wi-Fi",
                "TV",
                "Air Conditioning",
                "Mini Bar",
                "Coffee Maker",
                "Safe",
                "Private Bathroom",
            ],
            RoomCategory::Vip => &[
                "Wi-Fi",
                "TV",
                "Air Conditioning",
                "Mini Bar",
                "Coffee Maker",
                "Safe",
                "Balcony",
                "Sea View",
                "Room Service",
                "Refrigerator",
                "Private Bathroom",
                "Jacuzzi",
            ],
        }
    }
}

/// Room types offered by the dashboard's add-room form.
pub const ROOM_TYPES: &[&str] = &[
    "Standard",
    "Deluxe",
    "Suite",
    "Executive Suite",
    "Family Room",
    "Single Room",
    "Double Room",
    "Twin Room",
];

/// Amenities offered by the dashboard's add-room form.
pub const AVAILABLE_AMENITIES: &[&str] = &[
    "Wi-Fi",
    "TV",
    "Mini Bar",
    "Air Conditioning",
    "Safe",
    "Balcony",
    "Sea View",
    "Room Service",
    "Coffee Maker",
    "Refrigerator",
    "Private Bathroom",
    "Jacuzzi",
];

// ---------------------------------------------------------------------------
// Field rules
// ---------------------------------------------------------------------------

/// Maximum length of a room name.
pub const MAX_ROOM_NAME_LEN: usize = 200;

/// A room must sleep at least one guest.
pub fn validate_capacity(capacity: i32) -> Result<(), CoreError> {
    if capacity < 1 {
        return Err(CoreError::Validation(format!(
            "Capacity must be at least 1, got {capacity}"
        )));
    }
    Ok(())
}

/// Nightly price must be a finite, non-negative amount.
pub fn validate_price(price: f64) -> Result<(), CoreError> {
    if !price.is_finite() || price < 0.0 {
        return Err(CoreError::Validation(format!(
            "Price must be a non-negative amount, got {price}"
        )));
    }
    Ok(())
}

/// Name and type are required and must not be blank.
pub fn validate_required_text(field: &str, value: &str) -> Result<(), CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    if trimmed.len() > MAX_ROOM_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_ROOM_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Trim amenity names, drop blanks, and remove duplicates (first one wins).
pub fn normalize_amenities<I, S>(amenities: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for a in amenities {
        let a = a.as_ref().trim();
        if !a.is_empty() && !out.iter().any(|existing| existing == a) {
            out.push(a.to_string());
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Category statistics
// ---------------------------------------------------------------------------

/// Room counts per status within one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub total: u32,
    pub available: u32,
    pub occupied: u32,
    pub maintenance: u32,
    pub cleaning: u32,
}

impl StatusCounts {
    fn record(&mut self, status: RoomStatus) {
        self.total += 1;
        match status {
            RoomStatus::Available => self.available += 1,
            RoomStatus::Occupied => self.occupied += 1,
            RoomStatus::Maintenance => self.maintenance += 1,
            RoomStatus::Cleaning => self.cleaning += 1,
        }
    }
}

/// Per-category status breakdown shown on the room dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryStats {
    pub single: StatusCounts,
    pub comfort: StatusCounts,
    pub vip: StatusCounts,
}

impl CategoryStats {
    /// Count rooms given as `(category, status)` pairs.
    pub fn tally<I>(rooms: I) -> Self
    where
        I: IntoIterator<Item = (RoomCategory, RoomStatus)>,
    {
        let mut stats = Self::default();
        for (category, status) in rooms {
            stats.for_category_mut(category).record(status);
        }
        stats
    }

    pub fn for_category(&self, category: RoomCategory) -> &StatusCounts {
        match category {
            RoomCategory::Single => &self.single,
            RoomCategory::Comfort => &self.comfort,
            RoomCategory::Vip => &self.vip,
        }
    }

    fn for_category_mut(&mut self, category: RoomCategory) -> &mut StatusCounts {
        match category {
            RoomCategory::Single => &mut self.single,
            RoomCategory::Comfort => &mut self.comfort,
            RoomCategory::Vip => &mut self.vip,
        }
    }
}

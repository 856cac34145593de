//! Room-number suggestion for the add-room form.
//!
//! Each category owns a block of ten numbers: single `101..=110`, comfort
//! `201..=210`, vip `301..=310`. The suggestion is advisory; nothing
//! enforces uniqueness and administrators may type any number.

use crate::room::RoomCategory;

/// Number of slots in each category block.
pub const BLOCK_SIZE: u32 = 10;

/// Suggest the next room number for `category`.
///
/// `existing` holds the room numbers already used by rooms of that
/// category (blank entries are ignored). Returns the lowest unused number
/// in the block. When the block is full, falls back to the block prefix
/// followed by the existing count plus one (e.g. `"111"`), which may land
/// outside the block.
pub fn suggest_room_number<I, S>(category: RoomCategory, existing: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let prefix = category.number_prefix();

    let mut taken: Vec<u32> = Vec::new();
    let mut count: u32 = 0;
    for number in existing {
        let number = number.as_ref().trim();
        if number.is_empty() {
            continue;
        }
        count += 1;
        if let Ok(n) = number.parse::<u32>() {
            taken.push(n);
        }
    }

    (1..=BLOCK_SIZE)
        .map(|slot| prefix * 100 + slot)
        .find(|candidate| !taken.contains(candidate))
        .map(|n| n.to_string())
        .unwrap_or_else(|| format!("{prefix}{:02}", count + 1))
}

use chrono::{Duration, NaiveDateTime};

/// Timestamp-derived reservation id: `YYYYMMDDHHMMSS` + microseconds (20 digits).
///
/// Ids sort lexicographically in creation order.
pub fn reservation_id(at: NaiveDateTime) -> String {
    at.format(ID_FORMAT).to_string()
}

const ID_FORMAT: &str = "%Y%m%d%H%M%S%6f";

/// Timestamp encoded in an id produced by [`reservation_id`]
pub fn parse_reservation_id(id: &str) -> Option<NaiveDateTime> {
    if id.len() != 20 || !id.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDateTime::parse_from_str(id, ID_FORMAT).ok()
}

/// Generate an id for `at` that sorts after `last` and that `taken` does not
/// already contain.
///
/// When the clock has moved behind `last`, the id continues one microsecond
/// past it instead.
pub fn next_reservation_id(
    at: NaiveDateTime,
    last: Option<&str>,
    taken: impl Fn(&str) -> bool,
) -> String {
    let floor = last
        .and_then(parse_reservation_id)
        .map(|t| t + Duration::microseconds(1));
    let at = floor.map_or(at, |floor| at.max(floor));
    unique_reservation_id(at, taken)
}

/// Generate an id for `at` that `taken` does not already contain.
///
/// Advances the timestamp one microsecond at a time until the id is free.
pub fn unique_reservation_id(at: NaiveDateTime, taken: impl Fn(&str) -> bool) -> String {
    let mut at = at;
    loop {
        let id = reservation_id(at);
        if !taken(&id) {
            return id;
        }
        at += Duration::microseconds(1);
    }
}

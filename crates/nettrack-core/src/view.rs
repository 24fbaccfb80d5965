//! View-model helpers shared by every front end.
//!
//! All functions here are pure and total over their inputs.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::list::ContactList;

/// Returned by [`format_date`] for input it cannot parse.
pub const INVALID_DATE: &str = "Invalid date";

/// Month-day-year, e.g. `Jan 5, 2024`.
const DATE_FORMAT: &str = "%b %-d, %Y";

/// Compare two display names the way a person would: case-insensitive first,
/// exact order only to break ties.
pub fn compare_names(a: &str, b: &str) -> Ordering {
  a.to_lowercase()
    .cmp(&b.to_lowercase())
    .then_with(|| a.cmp(b))
}

/// Favorites first, then by name. Stable: equal lists keep their input order.
pub fn sort_lists_by_favorite(lists: &[ContactList]) -> Vec<ContactList> {
  let mut sorted = lists.to_vec();
  sorted.sort_by(|a, b| {
    b.is_favorite
      .cmp(&a.is_favorite)
      .then_with(|| compare_names(&a.name, &b.name))
  });
  sorted
}

pub fn filter_favorite_lists(lists: &[ContactList]) -> Vec<ContactList> {
  lists.iter().filter(|l| l.is_favorite).cloned().collect()
}

/// `"No contacts"`, `"1 contact"`, `"{n} contacts"`.
pub fn format_contact_count(count: u64) -> String {
  match count {
    0 => "No contacts".to_owned(),
    1 => "1 contact".to_owned(),
    n => format!("{n} contacts"),
  }
}

/// Format an ISO-8601 timestamp or plain `YYYY-MM-DD` date as `Jan 5, 2024`.
/// Anything unparseable yields [`INVALID_DATE`].
pub fn format_date(input: &str) -> String {
  let input = input.trim();

  if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
    return format_timestamp(dt.with_timezone(&Utc));
  }
  if let Ok(dt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
    return dt.format(DATE_FORMAT).to_string();
  }
  match NaiveDate::parse_from_str(input, "%Y-%m-%d") {
    Ok(d) => d.format(DATE_FORMAT).to_string(),
    Err(_) => INVALID_DATE.to_owned(),
  }
}

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
  ts.format(DATE_FORMAT).to_string()
}

/// First letter of each name, upper-cased. An empty name contributes nothing,
/// so two empty names give `""`.
pub fn initials(first_name: &str, last_name: &str) -> String {
  [first_name, last_name]
    .iter()
    .filter_map(|name| name.trim().chars().next())
    .flat_map(char::to_uppercase)
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::list::ListColor;
  use uuid::Uuid;

  fn list(name: &str, is_favorite: bool) -> ContactList {
    let now = Utc::now();
    ContactList {
      id: Uuid::new_v4(),
      name: name.into(),
      description: None,
      color: ListColor::Blue,
      icon: None,
      is_favorite,
      position: 0,
      contact_count: 0,
      created_at: now,
      updated_at: now,
      tags: vec![],
    }
  }

  fn shape(lists: &[ContactList]) -> Vec<(bool, &str)> {
    lists.iter().map(|l| (l.is_favorite, l.name.as_str())).collect()
  }

  #[test]
  fn favorites_sort_first_then_by_name() {
    let input = vec![list("B", false), list("A", true), list("A", false)];
    let sorted = sort_lists_by_favorite(&input);
    assert_eq!(shape(&sorted), vec![(true, "A"), (false, "A"), (false, "B")]);
    // Input untouched.
    assert_eq!(shape(&input), vec![(false, "B"), (true, "A"), (false, "A")]);
  }

  #[test]
  fn sort_is_stable_for_equal_keys() {
    let first = list("Same", false);
    let second = list("Same", false);
    let sorted = sort_lists_by_favorite(&[first.clone(), second.clone()]);
    assert_eq!(sorted[0].id, first.id);
    assert_eq!(sorted[1].id, second.id);
  }

  #[test]
  fn name_order_ignores_case() {
    let sorted =
      sort_lists_by_favorite(&[list("beta", false), list("Alpha", false)]);
    assert_eq!(shape(&sorted), vec![(false, "Alpha"), (false, "beta")]);
  }

  #[test]
  fn favorite_filter() {
    let lists = vec![list("a", true), list("b", false), list("c", true)];
    let favs = filter_favorite_lists(&lists);
    assert_eq!(shape(&favs), vec![(true, "a"), (true, "c")]);
  }

  #[test]
  fn contact_count_pluralizes() {
    assert_eq!(format_contact_count(0), "No contacts");
    assert_eq!(format_contact_count(1), "1 contact");
    assert_eq!(format_contact_count(5), "5 contacts");
  }

  #[test]
  fn dates_format_month_day_year() {
    assert_eq!(format_date("2024-01-05T10:30:00Z"), "Jan 5, 2024");
    assert_eq!(format_date("2024-03-15T23:00:00.123+00:00"), "Mar 15, 2024");
    assert_eq!(format_date("2023-12-25"), "Dec 25, 2023");
  }

  #[test]
  fn unparseable_date_is_reported_not_panicked() {
    assert_eq!(format_date("not a date"), INVALID_DATE);
    assert_eq!(format_date(""), INVALID_DATE);
    assert_eq!(format_date("2024-13-45"), INVALID_DATE);
  }

  #[test]
  fn initials_upper_case_with_fallback() {
    assert_eq!(initials("sarah", "johnson"), "SJ");
    assert_eq!(initials("Mike", ""), "M");
    assert_eq!(initials("", ""), "");
    assert_eq!(initials("émile", "zola"), "ÉZ");
  }
}

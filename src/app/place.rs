use serde::Serialize;
use serde_json::{Map, Value};

use crate::constants::*;
use crate::json_extract::*;
use super::date_conv::{date_sort_key, format_month_year};

/*
* Canonical place record for the map view. Built fresh on every load
* cycle and never mutated afterwards.
*/
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NormalizedPlace {
  pub name: String,
  pub country: String,
  #[serde(rename = "displayName")]
  pub display_name: String,
  #[serde(rename = "dateVisited")]
  pub date_visited: String,
  #[serde(rename = "sortKey")]
  pub sort_key: i64,
  pub description: String,
}

/*
* Richer record behind the list view cards: keeps an id, a star rating
* and a picture on top of the map-view fields.
*/
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlaceCard {
  pub id: String,
  pub name: String,
  pub date: String,
  #[serde(rename = "sortKey")]
  pub sort_key: i64,
  pub rating: u32,
  pub description: String,
  pub image: String,
}

fn value_as_map(item: &Value) -> Map<String, Value> {
  match item.as_object() {
    Some(row) => row.to_owned(),
    None => Map::new(),
  }
}

fn compose_display_name(base: &str, country: &str) -> String {
  if base.is_empty() && country.is_empty() {
    UNNAMED_PLACE_LABEL.to_owned()
  } else if country.is_empty() {
    base.to_owned()
  } else if base.is_empty() {
    country.to_owned()
  } else {
    format!("{}, {}", base, country)
  }
}

/*
* Total mapping from a loose raw record to the canonical shape.
* Every field access fails soft; no input shape can make this panic.
*/
pub fn normalize_place(item: &Value) -> NormalizedPlace {
  let row = value_as_map(item);
  let raw_name = extract_first_string(&row, &["placeName", "name"]);
  let base = raw_name.trim().to_owned();
  let country = extract_string_from_value_map(&row, "country").trim().to_owned();
  let raw_date = extract_first_string(&row, &["visitedDate", "dateVisited", "date"]);
  let name = if base.is_empty() { UNKNOWN_PLACE_NAME.to_owned() } else { base.clone() };
  NormalizedPlace {
    name,
    display_name: compose_display_name(&base, &country),
    country,
    date_visited: format_month_year(&raw_date),
    sort_key: date_sort_key(&raw_date),
    description: extract_first_string(&row, &["description", "notes"]),
  }
}

/*
* List-view variant. The index disambiguates synthesized ids when the
* same place was added twice without one.
*/
pub fn normalize_card(item: &Value, index: usize) -> PlaceCard {
  let row = value_as_map(item);
  let raw_name = extract_first_string(&row, &["placeName", "name"]);
  let base = raw_name.trim().to_owned();
  let country = extract_string_from_value_map(&row, "country").trim().to_owned();
  let raw_date = extract_first_string(&row, &["visitedDate", "dateVisited", "date"]);
  let id_raw = extract_string_from_value_map(&row, "id");
  let id = if id_raw.trim().is_empty() {
    format!("{}-{}-{}", base, raw_date, index)
  } else {
    id_raw
  };
  let image_raw = extract_string_from_value_map(&row, "image");
  PlaceCard {
    id,
    name: compose_display_name(&base, &country),
    date: format_month_year(&raw_date),
    sort_key: date_sort_key(&raw_date),
    rating: extract_opt_u32_from_value_map(&row, "rating")
      .unwrap_or(DEFAULT_RATING)
      .min(MAX_RATING),
    description: extract_first_string(&row, &["description", "notes"]),
    image: if image_raw.is_empty() { DEFAULT_PLACE_IMAGE.to_owned() } else { image_raw },
  }
}

/* Newest visits first, for the card list */
pub fn sort_newest_first(cards: &mut [PlaceCard]) {
  cards.sort_by_key(|card| std::cmp::Reverse(card.sort_key));
}

/*
* The last n visits in chronological order, for the travel-log strip
* on the landing page.
*/
pub fn recent_logs(places: &[NormalizedPlace], n: usize) -> Vec<NormalizedPlace> {
  let mut ordered = places.to_vec();
  ordered.sort_by_key(|place| place.sort_key);
  let start = ordered.len().saturating_sub(n);
  ordered.split_off(start)
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn normalizes_a_complete_record() {
    let raw = json!({
      "placeName": "Paris",
      "country": "France",
      "visitedDate": "2026-05-10",
      "description": "Lovely"
    });
    let place = normalize_place(&raw);
    assert_eq!(place.name, "Paris");
    assert_eq!(place.country, "France");
    assert_eq!(place.display_name, "Paris, France");
    assert_eq!(place.date_visited, "May 2026");
    assert_eq!(place.description, "Lovely");
    assert!(place.sort_key > 0);
  }

  #[test]
  fn empty_record_resolves_to_placeholders() {
    let place = normalize_place(&json!({}));
    assert_eq!(place.name, UNKNOWN_PLACE_NAME);
    assert_eq!(place.country, "");
    assert_eq!(place.display_name, UNNAMED_PLACE_LABEL);
    assert_eq!(place.date_visited, DATE_PLACEHOLDER);
    assert_eq!(place.sort_key, 0);
    assert_eq!(place.description, "");
  }

  #[test]
  fn non_object_input_never_panics() {
    for raw in [json!(null), json!("Paris"), json!(42), json!([1, 2])] {
      let place = normalize_place(&raw);
      assert_eq!(place.display_name, UNNAMED_PLACE_LABEL);
    }
  }

  #[test]
  fn alternate_field_names_are_honoured() {
    let raw = json!({
      "name": "Kyoto",
      "dateVisited": "2024-11-02",
      "notes": "Temples"
    });
    let place = normalize_place(&raw);
    assert_eq!(place.name, "Kyoto");
    assert_eq!(place.display_name, "Kyoto");
    assert_eq!(place.date_visited, "November 2024");
    assert_eq!(place.description, "Temples");
  }

  #[test]
  fn first_date_field_wins() {
    let raw = json!({
      "placeName": "Lisbon",
      "visitedDate": "2025-03-01",
      "dateVisited": "2020-01-01",
      "date": "2019-01-01"
    });
    assert_eq!(normalize_place(&raw).date_visited, "March 2025");
  }

  #[test]
  fn whitespace_name_falls_back() {
    let raw = json!({ "placeName": "   ", "country": "France" });
    let place = normalize_place(&raw);
    assert_eq!(place.name, UNKNOWN_PLACE_NAME);
    assert_eq!(place.display_name, "France");
  }

  #[test]
  fn card_rating_is_clamped_and_defaulted() {
    let rated = normalize_card(&json!({ "placeName": "Rome", "rating": 9 }), 0);
    assert_eq!(rated.rating, MAX_RATING);
    let unrated = normalize_card(&json!({ "placeName": "Rome" }), 0);
    assert_eq!(unrated.rating, DEFAULT_RATING);
    let zero = normalize_card(&json!({ "placeName": "Rome", "rating": 0 }), 0);
    assert_eq!(zero.rating, 0);
  }

  #[test]
  fn card_id_is_synthesized_when_absent() {
    let card = normalize_card(&json!({ "placeName": "Rome", "visitedDate": "2024-06-01" }), 3);
    assert_eq!(card.id, "Rome-2024-06-01-3");
    let explicit = normalize_card(&json!({ "id": "abc", "placeName": "Rome" }), 3);
    assert_eq!(explicit.id, "abc");
  }

  #[test]
  fn cards_sort_newest_first() {
    let mut cards: Vec<PlaceCard> = [
      json!({ "placeName": "Older", "visitedDate": "2020-01-01" }),
      json!({ "placeName": "Newest", "visitedDate": "2026-01-01" }),
      json!({ "placeName": "Undated" }),
    ]
    .iter()
    .enumerate()
    .map(|(i, raw)| normalize_card(raw, i))
    .collect();
    sort_newest_first(&mut cards);
    assert_eq!(cards[0].name, "Newest");
    assert_eq!(cards[2].name, "Undated");
  }

  #[test]
  fn recent_logs_keep_chronological_order() {
    let places: Vec<NormalizedPlace> = [
      json!({ "placeName": "Second", "visitedDate": "2024-01-01" }),
      json!({ "placeName": "Latest", "visitedDate": "2026-01-01" }),
      json!({ "placeName": "First", "visitedDate": "2020-01-01" }),
    ]
    .iter()
    .map(normalize_place)
    .collect();
    let recent = recent_logs(&places, 2);
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].name, "Second");
    assert_eq!(recent[1].name, "Latest");
  }
}

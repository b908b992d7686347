//! Tests for the place aggregate, filter, and display ordering.

use super::*;
use chrono::{Duration, TimeZone};
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn place_named(name: &str, category: &str, created_at: DateTime<Utc>) -> Place {
    let details = PlaceDetails::try_from(PlaceSubmission::new(name, category))
        .expect("valid submission");
    Place::submitted(Uuid::new_v4(), UserId::random(), details, created_at)
}

fn approved(mut place: Place) -> Place {
    place.transition_to(PlaceStatus::Approved);
    place
}

#[rstest]
#[case(PlaceSubmission::new("", "restaurant"), PlaceValidationError::EmptyName)]
#[case(PlaceSubmission::new("   ", "restaurant"), PlaceValidationError::EmptyName)]
#[case(PlaceSubmission::new("Cafe X", ""), PlaceValidationError::MissingCategory)]
#[case(
    PlaceSubmission::new("Cafe X", "castle"),
    PlaceValidationError::UnknownCategory { input: "castle".to_owned() }
)]
fn submission_validation_failures(
    #[case] submission: PlaceSubmission,
    #[case] expected: PlaceValidationError,
) {
    let err = PlaceDetails::try_from(submission).expect_err("invalid submission");
    assert_eq!(err, expected);
}

#[rstest]
fn submission_normalises_optional_fields() {
    let submission = PlaceSubmission {
        name: "  Cafe X ".to_owned(),
        category: "gas_station".to_owned(),
        description: Some("   ".to_owned()),
        phone: Some(" 123 ".to_owned()),
        ..PlaceSubmission::default()
    };
    let details = PlaceDetails::try_from(submission).expect("valid submission");
    assert_eq!(details.name(), "Cafe X");
    assert_eq!(details.category(), PlaceCategory::GasStation);
    assert_eq!(details.description(), None);
    assert_eq!(details.phone(), Some("123"));
}

#[rstest]
fn submitted_places_are_pending_and_not_featured(now: DateTime<Utc>) {
    let place = place_named("Cafe X", "restaurant", now);
    assert_eq!(place.status(), PlaceStatus::Pending);
    assert!(!place.is_featured());
    assert!(!place.is_visible());
}

#[rstest]
#[case(PlaceStatus::Pending)]
#[case(PlaceStatus::Rejected)]
fn featuring_requires_approval(now: DateTime<Utc>, #[case] status: PlaceStatus) {
    let mut place = place_named("Cafe X", "restaurant", now);
    place.transition_to(status);
    let err = place.set_featured(true).expect_err("not approved");
    assert_eq!(err.status, status);
    assert!(!place.is_featured());
}

#[rstest]
#[case(PlaceStatus::Pending)]
#[case(PlaceStatus::Rejected)]
fn leaving_approval_clears_featured_flag(now: DateTime<Utc>, #[case] status: PlaceStatus) {
    let mut place = approved(place_named("Cafe X", "restaurant", now));
    place.set_featured(true).expect("approved place can be featured");
    place.transition_to(status);
    assert_eq!(place.status(), status);
    assert!(!place.is_featured());
}

#[rstest]
fn clearing_featured_flag_is_always_allowed(now: DateTime<Utc>) {
    let mut place = place_named("Cafe X", "restaurant", now);
    place.set_featured(false).expect("clearing is allowed");
    assert!(!place.is_featured());
}

#[rstest]
fn patch_rejects_blank_name_without_partial_write(now: DateTime<Utc>) {
    let place = place_named("Cafe X", "restaurant", now);
    let patch = PlaceDetailsPatch {
        name: Some(" ".to_owned()),
        phone: Some("555".to_owned()),
        ..PlaceDetailsPatch::default()
    };
    let err = place.details().patched(patch).expect_err("blank name");
    assert_eq!(err, PlaceValidationError::EmptyName);
    assert_eq!(place.details().phone(), None);
}

#[rstest]
fn patch_replaces_only_supplied_fields(now: DateTime<Utc>) {
    let place = place_named("Cafe X", "restaurant", now);
    let patch = PlaceDetailsPatch {
        category: Some("hotel".to_owned()),
        website: Some("https://example.test".to_owned()),
        ..PlaceDetailsPatch::default()
    };
    let details = place.details().patched(patch).expect("valid patch");
    assert_eq!(details.name(), "Cafe X");
    assert_eq!(details.category(), PlaceCategory::Hotel);
    assert_eq!(details.website(), Some("https://example.test"));
}

#[rstest]
#[case(PlaceFilter::default(), true)]
#[case(PlaceFilter { search_text: Some("CAFE".to_owned()), ..PlaceFilter::default() }, true)]
#[case(PlaceFilter { search_text: Some("espresso".to_owned()), ..PlaceFilter::default() }, true)]
#[case(PlaceFilter { search_text: Some("pizza".to_owned()), ..PlaceFilter::default() }, false)]
#[case(PlaceFilter { category: Some(PlaceCategory::Bank), ..PlaceFilter::default() }, false)]
#[case(PlaceFilter { featured_only: true, ..PlaceFilter::default() }, false)]
fn filter_matches(now: DateTime<Utc>, #[case] filter: PlaceFilter, #[case] expected: bool) {
    let details = PlaceDetails::try_from(
        PlaceSubmission::new("Cafe X", "restaurant").with_description("Great Espresso bar"),
    )
    .expect("valid submission");
    let place = Place::submitted(Uuid::new_v4(), UserId::random(), details, now);
    assert_eq!(filter.matches(&place), expected);
}

#[rstest]
fn display_order_puts_featured_first_then_oldest(now: DateTime<Utc>) {
    let first = approved(place_named("First", "other", now));
    let second = approved(place_named("Second", "other", now + Duration::minutes(1)));
    let mut third = approved(place_named("Third", "other", now + Duration::minutes(2)));
    third.set_featured(true).expect("approved");
    let mut fourth = approved(place_named("Fourth", "other", now + Duration::minutes(3)));
    fourth.set_featured(true).expect("approved");

    let mut places = vec![fourth, second, third, first];
    order_for_display(&mut places);
    let names: Vec<&str> = places.iter().map(Place::name).collect();
    assert_eq!(names, vec!["Third", "Fourth", "First", "Second"]);
}

#[rstest]
fn snapshot_rejects_featured_pending_place() {
    let payload = json!({
        "id": Uuid::new_v4(),
        "ownerId": UserId::random(),
        "name": "Cafe X",
        "category": "restaurant",
        "description": null,
        "address": null,
        "phone": null,
        "website": null,
        "imageUrl": null,
        "status": "pending",
        "isFeatured": true,
        "createdAt": "2026-01-01T12:00:00Z"
    });
    let result = serde_json::from_value::<Place>(payload);
    assert!(result.is_err());
}

#[rstest]
fn snapshot_round_trips(now: DateTime<Utc>) {
    let place = approved(place_named("Cafe X", "restaurant", now));
    let value = serde_json::to_value(&place).expect("serialise place");
    assert_eq!(value["status"], json!("approved"));
    assert_eq!(value["category"], json!("restaurant"));
    let decoded: Place = serde_json::from_value(value).expect("deserialise place");
    assert_eq!(decoded, place);
}

#[rstest]
fn category_options_cover_every_category() {
    let options = category_options();
    assert_eq!(options.len(), PlaceCategory::ALL.len());
    assert!(
        options
            .iter()
            .all(|option| option.value.as_str().parse::<PlaceCategory>() == Ok(option.value))
    );
}

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;
use mailing_core::{
    errors::MailingError,
    models::{
        client::{Client, CreateClientRequest, UpdateClientRequest},
        notification::{CreateNotificationRequest, Notification, UpdateNotificationRequest},
        operator_code::OperatorCode,
        phone::PhoneNumber,
        tag::Tag,
        timezone::Timezone,
    },
};

fn assert_validation<T: std::fmt::Debug>(result: Result<T, MailingError>) {
    match result {
        Err(MailingError::Validation(_)) => {}
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[rstest]
#[case("+12015550123", "+12015550123")]
#[case("+1 (201) 555-0123", "+12015550123")]
#[case(" +7 912.345.67.89 ", "+79123456789")]
#[case("+44 7400 123456", "+447400123456")]
fn test_phone_number_normalizes_to_e164(#[case] input: &str, #[case] expected: &str) {
    let number = PhoneNumber::parse(input).unwrap();
    assert_eq!(number.as_e164(), expected);
    assert_eq!(number.to_string(), expected);
}

#[rstest]
#[case("15551234567")]
#[case("+")]
#[case("+1555")]
#[case("+0123456789")]
#[case("+1201555012389012")]
#[case("+1555abc4567")]
#[case("+10000000000")]
#[case("+999999999")]
#[case("+15551234567")]
fn test_phone_number_rejects_malformed_input(#[case] input: &str) {
    assert_validation(PhoneNumber::parse(input));
}

#[rstest]
#[case(0)]
#[case(999)]
#[case(32767)]
fn test_operator_code_accepts_range(#[case] value: i64) {
    let code = OperatorCode::new(value).unwrap();
    assert_eq!(i64::from(code.value()), value);
}

#[rstest]
#[case(-1)]
#[case(32768)]
#[case(i64::MAX)]
fn test_operator_code_rejects_out_of_range(#[case] value: i64) {
    assert_validation(OperatorCode::new(value));
}

#[rstest]
#[case("vip")]
#[case("new_clients_2024")]
#[case("клиенты")]
#[case("42")]
fn test_tag_accepts_word_characters(#[case] value: &str) {
    assert_eq!(Tag::parse(value).unwrap().as_str(), value);
}

#[rstest]
#[case("")]
#[case("two words")]
#[case("vip!")]
#[case("a-b")]
fn test_tag_rejects_non_word_characters(#[case] value: &str) {
    assert_validation(Tag::parse(value));
}

#[test]
fn test_tag_length_limit() {
    assert!(Tag::parse("a".repeat(100)).is_ok());
    assert_validation(Tag::parse("a".repeat(101)));
}

#[test]
fn test_timezone_parsing() {
    assert_eq!(Timezone::parse("UTC").unwrap().name(), "UTC");
    assert_eq!(Timezone::parse("Europe/Moscow").unwrap().name(), "Europe/Moscow");
    assert_validation(Timezone::parse("Mars/Olympus_Mons"));
    assert_validation(Timezone::parse(""));
}

#[test]
fn test_create_client_request_validation() {
    let request = CreateClientRequest {
        number: "+1 555 123 4567".to_string(),
        operator_code: 999,
        tag: Some("vip".to_string()),
        timezone: "UTC".to_string(),
    };

    let client = request.validate().unwrap();
    assert_eq!(client.number.as_e164(), "+12015550123");
    assert_eq!(client.operator_code.value(), 999);
    assert_eq!(client.tag.unwrap().as_str(), "vip");
    assert_eq!(client.timezone.name(), "UTC");
}

#[test]
fn test_create_client_request_without_tag() {
    let request = CreateClientRequest {
        number: "+12015550123".to_string(),
        operator_code: 1,
        tag: None,
        timezone: "Asia/Tokyo".to_string(),
    };

    assert_eq!(request.validate().unwrap().tag, None);
}

#[test]
fn test_update_client_request_validates_present_fields_only() {
    let empty = UpdateClientRequest::default().validate().unwrap();
    assert!(empty.is_empty());

    let changes = UpdateClientRequest {
        operator_code: Some(12),
        ..Default::default()
    }
    .validate()
    .unwrap();
    assert_eq!(changes.operator_code.map(OperatorCode::value), Some(12));
    assert!(changes.number.is_none());

    assert_validation(
        UpdateClientRequest {
            timezone: Some("Nowhere".to_string()),
            ..Default::default()
        }
        .validate(),
    );
}

#[test]
fn test_client_serializes_flattened() {
    let client = Client {
        id: 3,
        number: PhoneNumber::parse("+12015550123").unwrap(),
        operator_code: OperatorCode::new(999).unwrap(),
        tag: Some(Tag::parse("vip").unwrap()),
        timezone: Timezone::parse("UTC").unwrap(),
    };

    assert_eq!(
        serde_json::to_value(&client).unwrap(),
        json!({
            "id": 3,
            "number": "+12015550123",
            "operator_code": 999,
            "tag": "vip",
            "timezone": "UTC",
        })
    );
}

fn notification_request(start_year: i32, finish_year: i32) -> CreateNotificationRequest {
    CreateNotificationRequest {
        text: "Spring sale".to_string(),
        start_datetime: Utc.with_ymd_and_hms(start_year, 1, 1, 0, 0, 0).unwrap(),
        finish_datetime: Utc.with_ymd_and_hms(finish_year, 1, 1, 0, 0, 0).unwrap(),
        tags: None,
        operator_codes: None,
    }
}

#[test]
fn test_notification_finish_before_start_is_rejected() {
    assert_validation(notification_request(2024, 2023).validate());
}

#[test]
fn test_notification_equal_start_and_finish_is_rejected() {
    assert_validation(notification_request(2024, 2024).validate());
}

#[test]
fn test_notification_filters_are_sorted_and_deduplicated() {
    let request = CreateNotificationRequest {
        tags: Some(vec!["vip".to_string(), "new".to_string(), "vip".to_string()]),
        operator_codes: Some(vec![999, 12, 999]),
        ..notification_request(2024, 2025)
    };

    let notification = request.validate().unwrap();
    let tags: Vec<&str> = notification.tags.iter().map(Tag::as_str).collect();
    let codes: Vec<i16> = notification.operator_codes.iter().map(|code| code.value()).collect();
    assert_eq!(tags, vec!["new", "vip"]);
    assert_eq!(codes, vec![12, 999]);
}

#[test]
fn test_notification_invalid_tag_is_rejected() {
    let request = CreateNotificationRequest {
        tags: Some(vec!["not valid".to_string()]),
        ..notification_request(2024, 2025)
    };

    assert_validation(request.validate());
}

#[test]
fn test_notification_blank_text_is_rejected() {
    let request = CreateNotificationRequest {
        text: "   ".to_string(),
        ..notification_request(2024, 2025)
    };

    assert_validation(request.validate());
}

fn stored_notification() -> Notification {
    Notification {
        id: 1,
        text: "Spring sale".to_string(),
        start_datetime: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
        finish_datetime: Utc.with_ymd_and_hms(2024, 3, 31, 0, 0, 0).unwrap(),
        tags: vec![],
        operator_codes: vec![],
    }
}

#[test]
fn test_notification_patch_is_checked_against_stored_schedule() {
    let current = stored_notification();

    let moved_start_past_finish = UpdateNotificationRequest {
        start_datetime: Some(Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap()),
        ..Default::default()
    };
    assert_validation(moved_start_past_finish.validate(&current));

    let extended = UpdateNotificationRequest {
        finish_datetime: Some(Utc.with_ymd_and_hms(2024, 4, 30, 0, 0, 0).unwrap()),
        ..Default::default()
    }
    .validate(&current)
    .unwrap();
    assert!(extended.start_datetime.is_none());
    assert!(extended.tags.is_none());
}

#[test]
fn test_notification_patch_with_empty_list_clears_filter() {
    let changes = UpdateNotificationRequest {
        tags: Some(vec![]),
        ..Default::default()
    }
    .validate(&stored_notification())
    .unwrap();

    assert_eq!(changes.tags, Some(vec![]));
    assert_eq!(changes.operator_codes, None);
}

#[test]
fn test_notification_request_deserialization() {
    let request: CreateNotificationRequest = serde_json::from_value(json!({
        "text": "Hello",
        "start_datetime": "2024-01-01T00:00:00Z",
        "finish_datetime": "2024-01-02T00:00:00+03:00",
        "operator_codes": [999],
    }))
    .unwrap();

    assert_eq!(request.tags, None);
    assert_eq!(request.operator_codes, Some(vec![999]));
    assert_eq!(
        request.finish_datetime,
        Utc.with_ymd_and_hms(2024, 1, 1, 21, 0, 0).unwrap()
    );
}

use super::*;

#[test]
fn lookup_key_reverses_digits() {
    let id = ProductIdentifier::parse("M17267").unwrap();
    assert_eq!(id.lookup_key().as_str(), "76271");
}

#[test]
fn lookup_key_keeps_leading_zeros() {
    let id = ProductIdentifier::parse("M0042").unwrap();
    assert_eq!(id.digits(), "0042");
    assert_eq!(id.lookup_key().to_string(), "2400");
}

#[test]
fn parse_uppercases_tag() {
    let id = ProductIdentifier::parse("m10294").unwrap();
    assert_eq!(id.as_str(), "M10294");
}

#[test]
fn parse_rejects_missing_digits() {
    assert!(ProductIdentifier::parse("M").is_err());
    assert!(ProductIdentifier::parse("").is_err());
}

#[test]
fn parse_rejects_non_digits() {
    assert!(ProductIdentifier::parse("M12a4").is_err());
    assert!(ProductIdentifier::parse("X1234").is_err());
}

#[test]
fn from_digits_prefixes_tag() {
    let id = ProductIdentifier::from_digits("75192").unwrap();
    assert_eq!(id.to_string(), "M75192");
}

#[test]
fn record_serializes_with_camel_case_image_url() {
    let record = CatalogRecord::new("Millennium Falcon", Some("http://img/x.jpg".to_owned()));
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "name": "Millennium Falcon", "imageUrl": "http://img/x.jpg" })
    );
}

#[test]
fn record_without_image_omits_field() {
    let record = CatalogRecord::new("Plain", None);
    let json = serde_json::to_string(&record).unwrap();
    assert_eq!(json, r#"{"name":"Plain"}"#);
    let back: CatalogRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);
}

#[test]
fn identifier_deserialization_validates() {
    let ok: ProductIdentifier = serde_json::from_str(r#""m123""#).unwrap();
    assert_eq!(ok.as_str(), "M123");
    assert!(serde_json::from_str::<ProductIdentifier>(r#""nope""#).is_err());
}

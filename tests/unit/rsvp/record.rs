use super::*;

#[test]
fn side_parses_case_insensitively() {
    assert_eq!("bride".parse::<Side>().unwrap(), Side::Bride);
    assert_eq!(" Groom ".parse::<Side>().unwrap(), Side::Groom);
    assert!("".parse::<Side>().is_err());
    assert!("both".parse::<Side>().is_err());
}

#[test]
fn side_labels() {
    assert_eq!(Side::Bride.to_string(), "bride");
    assert_eq!(Side::Groom.card_label(), "Groom's Side");
}

#[test]
fn guest_count_clamps_into_range() {
    assert_eq!(GuestCount::clamped(0).get(), 1);
    assert_eq!(GuestCount::clamped(-4).get(), 1);
    assert_eq!(GuestCount::clamped(3).get(), 3);
    assert_eq!(GuestCount::clamped(5).get(), 5);
    assert_eq!(GuestCount::clamped(42).get(), 5);
    assert_eq!(GuestCount::default().get(), 1);
}

#[test]
fn guest_count_strict_constructor() {
    assert!(GuestCount::new(0).is_err());
    assert!(GuestCount::new(6).is_err());
    assert_eq!(GuestCount::new(2).unwrap().to_string(), "2");
}

#[test]
fn guest_count_serde_is_strict() {
    let g: GuestCount = serde_json::from_str("4").unwrap();
    assert_eq!(g.get(), 4);
    assert!(serde_json::from_str::<GuestCount>("9").is_err());
    assert!(serde_json::from_str::<GuestCount>("-1").is_err());
    assert_eq!(serde_json::to_string(&g).unwrap(), "4");
}

#[test]
fn record_serializes_with_lowercase_side() {
    let r = RsvpRecord::new(
        "Ada Lovelace".to_owned(),
        "ada@x.com".to_owned(),
        Side::Bride,
        GuestCount::clamped(2),
    );
    let v = serde_json::to_value(&r).unwrap();
    assert_eq!(
        v,
        serde_json::json!({
            "name": "Ada Lovelace",
            "contact": "ada@x.com",
            "side": "bride",
            "guests": 2
        })
    );
}

//! Property tests for payload signing and attribute whitelisting.

use proptest::prelude::*;

use przelewy24::domain::foundation::{Model, PayloadDefaults, Przelewy24Error, Signable};
use przelewy24::domain::payment::{Item, TestConnection, Transaction, TransactionConfirmation};

fn confirmation(session_id: &str, order_id: i64, amount: i64, currency: &str) -> TransactionConfirmation {
    let mut confirmation = TransactionConfirmation::new(&PayloadDefaults::new(1, 1));
    confirmation
        .set_session_id(session_id)
        .set_order_id(order_id)
        .set_amount(amount)
        .set_currency(currency);
    confirmation
}

proptest! {
    #[test]
    fn signature_is_deterministic(
        session_id in "[a-z0-9-]{1,20}",
        order_id in 1i64..1_000_000,
        amount in 1i64..10_000_000,
        crc in "[a-f0-9]{16}",
    ) {
        let a = confirmation(&session_id, order_id, amount, "PLN");
        let b = confirmation(&session_id, order_id, amount, "PLN");

        prop_assert_eq!(a.sign(&crc), b.sign(&crc));
        prop_assert_eq!(a.sign(&crc).len(), 32);
    }

    #[test]
    fn changing_signable_field_changes_signature(
        session_id in "[a-z0-9]{1,20}",
        amount in 1i64..10_000_000,
        delta in 1i64..1000,
    ) {
        let base = confirmation(&session_id, 9, amount, "PLN");
        let changed = confirmation(&session_id, 9, amount + delta, "PLN");

        prop_assert_ne!(base.sign("crc"), changed.sign("crc"));
    }

    #[test]
    fn changing_secret_changes_signature(
        first in "[a-z]{8}",
        second in "[a-z]{8}",
    ) {
        prop_assume!(first != second);
        let payload = confirmation("s1", 9, 100, "PLN");

        prop_assert_ne!(payload.sign(&first), payload.sign(&second));
    }

    #[test]
    fn non_signable_fields_do_not_affect_signature(
        method in 1i64..500,
        statement in "[A-Za-z0-9 ]{0,30}",
    ) {
        let base = confirmation("s1", 9, 100, "PLN");
        let mut changed = base.clone();
        changed.set_method(method).set_statement(statement.as_str());

        prop_assert_eq!(base.sign("crc"), changed.sign("crc"));
    }

    #[test]
    fn unknown_fields_rejected_with_or_without_prefix(name in "[a-z]{3,12}") {
        prop_assume!(!TransactionConfirmation::FILLABLE.contains(&name.as_str()));
        let mut payload = TransactionConfirmation::new(&PayloadDefaults::new(1, 1));

        prop_assert_eq!(
            payload.set(&name, "x"),
            Err(Przelewy24Error::UnsupportedAttribute(name.clone()))
        );
        prop_assert_eq!(
            payload.set(&format!("p24_{}", name), "x"),
            Err(Przelewy24Error::UnsupportedAttribute(name.clone()))
        );
    }

    #[test]
    fn filtered_round_trip_is_idempotent(
        session_id in "[a-z0-9]{1,20}",
        order_id in 1i64..1_000_000,
        amount in 1i64..10_000_000,
    ) {
        let original = confirmation(&session_id, order_id, amount, "EUR");
        let keys = TransactionConfirmation::attribute_keys();

        let rebuild = |pairs: Vec<(String, String)>| {
            let mut rebuilt = TransactionConfirmation::new(&PayloadDefaults::new(1, 1));
            rebuilt
                .set_many(pairs.into_iter().filter(|(k, _)| keys.contains(k)))
                .unwrap();
            rebuilt
        };

        let once = rebuild(original.signed_attributes("crc"));
        let twice = rebuild(once.signed_attributes("crc"));

        prop_assert_eq!(once.signed_attributes("crc"), original.signed_attributes("crc"));
        prop_assert_eq!(twice.signed_attributes("crc"), original.signed_attributes("crc"));
    }

    #[test]
    fn items_keep_insertion_order(names in prop::collection::vec("[A-Za-z]{1,10}", 1..8)) {
        let mut transaction = Transaction::new(&PayloadDefaults::new(1, 1));
        for name in &names {
            let mut item = Item::new();
            item.set_name(name.as_str());
            transaction.add_item(item);
        }

        let pairs = transaction.form_attributes();
        for (index, name) in names.iter().enumerate() {
            let key = format!("p24_name_{}", index + 1);
            let value = pairs.iter().find(|(k, _)| *k == key).map(|(_, v)| v.as_str());
            prop_assert_eq!(value, Some(name.as_str()));
        }
    }
}

#[test]
fn test_connection_signature_example() {
    let mut payload = TestConnection::new(&PayloadDefaults::new(1, 1));
    payload.set_pos_id(12345);

    // md5("12345|abc")
    assert_eq!(payload.sign("abc"), "ebde25d781fd2713220e264990b395cb");
}

//! Value-object equality and ordered value objects.

use dataobj_tests::prelude::*;

fn xyz(ty: &Arc<ObjectType>, x: i64, y: i64, z: i64) -> Record {
    Record::with_fields(ty, fields! { "x" => x, "y" => y, "z" => z })
}

mod equality {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_without_attributes() {
        let mine = ObjectType::value_object("MyVO");
        let another = ObjectType::value_object("MyAnotherVO");

        assert!(Record::new(&mine).equals(&Record::new(&mine)).unwrap());
        assert!(!Record::new(&mine).equals(&Record::new(&another)).unwrap());
    }

    #[test]
    fn test_one_attribute() {
        let mine = ObjectType::value_object("MyVO");
        let another = ObjectType::value_object("MyAnotherVO");
        let vo = |ty: &Arc<ObjectType>, x: i64| Record::with_fields(ty, fields! { "x" => x });

        assert!(vo(&mine, 1).equals(&vo(&mine, 1)).unwrap());
        assert!(!vo(&mine, 1).equals(&vo(&mine, 2)).unwrap());
        assert!(!vo(&mine, 1).equals(&vo(&another, 1)).unwrap());
    }

    #[test]
    fn test_every_field_regardless_of_order() {
        let ty = ObjectType::value_object("MyVO");

        assert!(xyz(&ty, 1, 2, 3).equals(&xyz(&ty, 1, 2, 3)).unwrap());
        assert!(!xyz(&ty, 1, 3, 2).equals(&xyz(&ty, 1, 2, 3)).unwrap());
    }

    #[test]
    fn test_explicit_fields() {
        let ty = ObjectType::builder("MyVO")
            .kind(ObjectKind::Value)
            .equals_fields(["x", "y"])
            .build();

        assert!(xyz(&ty, 1, 2, 3).equals(&xyz(&ty, 1, 2, 3)).unwrap());
        assert!(xyz(&ty, 1, 2, 3).equals(&xyz(&ty, 1, 2, 4)).unwrap());
        assert!(!xyz(&ty, 1, 2, 3).equals(&xyz(&ty, 1, 3, 3)).unwrap());
        assert!(!xyz(&ty, 1, 2, 3).equals(&xyz(&ty, 2, 2, 3)).unwrap());
    }

    #[test]
    fn test_empty_explicit_fields() {
        let ty = ObjectType::builder("MyVO")
            .kind(ObjectKind::Value)
            .equals_fields(Vec::<String>::new())
            .build();
        let a = Record::with_fields(&ty, fields! { "x" => 1 });
        let b = Record::with_fields(&ty, fields! { "x" => 2 });

        assert!(a.equals(&b).unwrap());
    }

    #[test]
    fn test_missing_explicit_field() {
        let ty = ObjectType::builder("MyVO")
            .kind(ObjectKind::Value)
            .equals_fields(["y"])
            .build();
        let a = Record::with_fields(&ty, fields! { "x" => 1 });
        let b = Record::with_fields(&ty, fields! { "x" => 1 });

        assert_eq!(
            a.equals(&b).unwrap_err(),
            ObjectError::unknown_field("MyVO", "y")
        );
    }

    #[test]
    fn test_subtype_inherits_explicit_fields_but_not_type_identity() {
        let base = ObjectType::builder("Base")
            .kind(ObjectKind::Value)
            .equals_fields(["x"])
            .build();
        let derived = base.extend("Derived").build();

        assert!(xyz(&derived, 1, 2, 3).equals(&xyz(&derived, 1, 9, 9)).unwrap());
        assert!(!xyz(&derived, 1, 2, 3).equals(&xyz(&base, 1, 2, 3)).unwrap());
    }

    #[test]
    fn test_nested_value_objects_compare_structurally() {
        let inner = ObjectType::value_object("Money");
        let outer = ObjectType::value_object("Price");
        let price = |amount: i64| {
            let money = Record::with_fields(
                &inner,
                fields! { "amount" => amount, "currency" => "EUR" },
            )
            .shared();
            Record::with_fields(&outer, fields! { "money" => money })
        };

        assert!(price(5).equals(&price(5)).unwrap());
        assert!(!price(5).equals(&price(6)).unwrap());
    }

    #[test]
    fn test_value_equality_of_object_fields() {
        let ty = ObjectType::value_object("Money");
        let a: ObjectRef = Arc::new(Record::with_fields(&ty, fields! { "amount" => 5 }));
        let b: ObjectRef = Arc::new(Record::with_fields(&ty, fields! { "amount" => 5.0 }));

        assert_eq!(Value::Object(a), Value::Object(b));
    }

    #[test]
    fn test_mutual_references_terminate() {
        // GIVEN - two isomorphic cycles vo1 <-> vo2
        let ty_1 = ObjectType::value_object("MyVO1");
        let ty_2 = ObjectType::value_object("MyVO2");
        let pair = || {
            let first = Arc::new(Record::new(&ty_1));
            let second = Arc::new(Record::new(&ty_2));
            first.set("vo", Value::Object(second.clone()));
            second.set("vo", Value::Object(first.clone()));
            (first, second)
        };
        let (a1, a2) = pair();
        let (b1, b2) = pair();

        // THEN
        assert!(a1.equals(b1.as_ref()).unwrap());
        assert!(a2.equals(b2.as_ref()).unwrap());

        a1.remove("vo");
        b1.remove("vo");
    }
}

mod ordering {
    use super::*;
    use pretty_assertions::assert_eq;

    fn single(ty: &Arc<ObjectType>, value: impl Into<Value>) -> Record {
        let value: Value = value.into();
        Record::with_fields(ty, fields! { "value" => value })
    }

    fn pair(ty: &Arc<ObjectType>, a: i64, b: &str) -> Record {
        Record::with_fields(ty, fields! { "valuea" => a, "valueb" => b })
    }

    /// `[lt, le, gt, ge]` of `a` against `b`.
    fn relations(a: &Record, b: &Record) -> [bool; 4] {
        [
            a.lt(b).unwrap(),
            a.le(b).unwrap(),
            a.gt(b).unwrap(),
            a.ge(b).unwrap(),
        ]
    }

    const LESS: [bool; 4] = [true, true, false, false];
    const EQUAL: [bool; 4] = [false, true, false, true];
    const GREATER: [bool; 4] = [false, false, true, true];

    #[test]
    fn test_without_attributes() {
        let ty = ObjectType::ordered_value_object("MyVO");

        assert_eq!(relations(&Record::new(&ty), &Record::new(&ty)), EQUAL);
    }

    #[test]
    fn test_one_number_attribute() {
        let ty = ObjectType::ordered_value_object("MyVO");

        assert_eq!(relations(&single(&ty, 1), &single(&ty, 2)), LESS);
        assert_eq!(relations(&single(&ty, 2), &single(&ty, 2)), EQUAL);
        assert_eq!(relations(&single(&ty, 2), &single(&ty, 1)), GREATER);
    }

    #[test]
    fn test_one_string_attribute_is_lexicographic() {
        let ty = ObjectType::ordered_value_object("MyVO");

        assert_eq!(relations(&single(&ty, "aa"), &single(&ty, "ab")), LESS);
        assert_eq!(relations(&single(&ty, "ab"), &single(&ty, "ab")), EQUAL);
        assert_eq!(relations(&single(&ty, "ab"), &single(&ty, "aa")), GREATER);
    }

    #[test]
    fn test_default_priority_is_field_name_order() {
        let ty = ObjectType::ordered_value_object("MyVO");

        assert_eq!(relations(&pair(&ty, 1, "aa"), &pair(&ty, 2, "ab")), LESS);
        assert_eq!(relations(&pair(&ty, 1, "aa"), &pair(&ty, 2, "aa")), LESS);
        assert_eq!(relations(&pair(&ty, 1, "aa"), &pair(&ty, 1, "ab")), LESS);
        assert_eq!(relations(&pair(&ty, 2, "aa"), &pair(&ty, 2, "aa")), EQUAL);
        assert_eq!(relations(&pair(&ty, 2, "ab"), &pair(&ty, 1, "aa")), GREATER);
        assert_eq!(relations(&pair(&ty, 2, "aa"), &pair(&ty, 1, "aa")), GREATER);
        assert_eq!(relations(&pair(&ty, 1, "ab"), &pair(&ty, 1, "aa")), GREATER);
    }

    #[test]
    fn test_declared_priority_order() {
        let ty = ObjectType::builder("MyVO")
            .kind(ObjectKind::OrderedValue)
            .priority_order(["valueb", "valuea"])
            .build();

        assert_eq!(relations(&pair(&ty, 1, "aa"), &pair(&ty, 2, "ab")), LESS);
        assert_eq!(relations(&pair(&ty, 1, "aa"), &pair(&ty, 2, "aa")), LESS);
        assert_eq!(relations(&pair(&ty, 1, "aa"), &pair(&ty, 1, "ab")), LESS);
        assert_eq!(relations(&pair(&ty, 2, "aa"), &pair(&ty, 2, "aa")), EQUAL);
        assert_eq!(relations(&pair(&ty, 2, "ab"), &pair(&ty, 1, "aa")), GREATER);
        assert_eq!(relations(&pair(&ty, 1, "ab"), &pair(&ty, 2, "aa")), GREATER);
        assert_eq!(relations(&pair(&ty, 2, "aa"), &pair(&ty, 1, "ab")), LESS);
    }

    #[test]
    fn test_unlisted_fields_are_ignored() {
        let ty = ObjectType::builder("MyVO")
            .kind(ObjectKind::OrderedValue)
            .priority_order(["valuea"])
            .build();

        assert_eq!(relations(&pair(&ty, 1, "aa"), &pair(&ty, 2, "ab")), LESS);
        assert_eq!(relations(&pair(&ty, 1, "aa"), &pair(&ty, 1, "ab")), EQUAL);
        assert_eq!(relations(&pair(&ty, 1, "ab"), &pair(&ty, 1, "aa")), EQUAL);
        assert_eq!(relations(&pair(&ty, 1, "ab"), &pair(&ty, 2, "aa")), LESS);
        assert_eq!(relations(&pair(&ty, 2, "aa"), &pair(&ty, 1, "ab")), GREATER);
    }

    #[test]
    fn test_unorderable_attributes_are_skipped() {
        let ty = ObjectType::ordered_value_object("MyVO");
        let vo = |ordered: i64, unordered: i64| {
            Record::with_fields(
                &ty,
                fields! {
                    "orderedattr" => ordered,
                    "unorderedattr" => Value::map([(unordered, unordered)]),
                },
            )
        };

        assert_eq!(relations(&vo(3, 4), &vo(2, 3)), GREATER);
        assert_eq!(relations(&vo(3, 3), &vo(2, 4)), GREATER);
        assert_eq!(relations(&vo(2, 3), &vo(2, 4)), EQUAL);
    }

    #[test]
    fn test_nested_ordered_value_objects() {
        // GIVEN
        let money = ObjectType::ordered_value_object("Money");
        let price = ObjectType::ordered_value_object("Price");
        let priced = |amount: i64| {
            let inner = Record::with_fields(&money, fields! { "amount" => amount }).shared();
            Record::with_fields(&price, fields! { "money" => inner })
        };

        // THEN
        assert_eq!(relations(&priced(1), &priced(2)), LESS);
        assert_eq!(relations(&priced(2), &priced(2)), EQUAL);
        assert_eq!(relations(&priced(3), &priced(2)), GREATER);
    }

    #[test]
    fn test_nested_plain_value_objects_are_skipped() {
        let tag = ObjectType::value_object("Tag");
        let item = ObjectType::ordered_value_object("Item");
        let tagged = |rank: i64, label: &str| {
            let inner = Record::with_fields(&tag, fields! { "label" => label }).shared();
            Record::with_fields(&item, fields! { "a" => inner, "rank" => rank })
        };

        assert_eq!(relations(&tagged(1, "z"), &tagged(2, "a")), LESS);
        assert_eq!(relations(&tagged(1, "z"), &tagged(1, "a")), EQUAL);
    }

    #[test]
    fn test_compare_reports_incomparable() {
        let ordered = ObjectType::ordered_value_object("MyVO");
        let plain = ObjectType::value_object("Plain");

        assert_eq!(
            single(&ordered, 1).compare(&single(&ordered, 2)).unwrap(),
            Comparison::Less
        );
        assert_eq!(
            single(&plain, 1).compare(&single(&plain, 2)).unwrap(),
            Comparison::Incomparable
        );
        assert_eq!(
            single(&ordered, 1)
                .compare(&single(&ObjectType::ordered_value_object("Other"), 2))
                .unwrap(),
            Comparison::Incomparable
        );
    }

    #[test]
    fn test_missing_priority_field() {
        let ty = ObjectType::builder("MyVO")
            .kind(ObjectKind::OrderedValue)
            .priority_order(["missing"])
            .build();

        assert_eq!(
            single(&ty, 1).lt(&single(&ty, 2)).unwrap_err(),
            ObjectError::unknown_field("MyVO", "missing")
        );
    }
}

//! Fixture types.

use dataobj_core::{fields, DataObject, ObjectType, Record, Specs, Value};
use std::sync::{Arc, LazyLock};

/// Descriptor of [`Person`], declared once per test binary.
pub static PERSON: LazyLock<Arc<ObjectType>> = LazyLock::new(|| {
    let ty = ObjectType::entity("Person");
    ty.declare("name", Specs::new().nullable(false).min(2).max(20));
    ty.declare("email", Specs::new().nullable(false).email(true));
    ty.declare("age", Specs::new().min(0).max(150));
    ty
});

/// A hand-written data object with plain fields.
#[derive(Debug, Clone)]
pub struct Person {
    pub name: String,
    pub email: Option<String>,
    pub age: i64,
}

impl Person {
    pub fn new(name: &str, email: Option<&str>, age: i64) -> Self {
        Self {
            name: name.to_string(),
            email: email.map(str::to_string),
            age,
        }
    }
}

impl DataObject for Person {
    fn object_type(&self) -> &Arc<ObjectType> {
        &PERSON
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            "name" => Some(Value::from(self.name.as_str())),
            "email" => Some(Value::from(self.email.clone())),
            "age" => Some(Value::Int(self.age)),
            _ => None,
        }
    }

    fn attribute_names(&self) -> Vec<String> {
        vec!["name".into(), "email".into(), "age".into()]
    }
}

/// An object whose fields exercise every built-in kind.
///
/// Both variants hold the same data. The `valid` variant declares constraints
/// that all hold; the other declares 27 constraints that all fail.
pub fn full_entity(valid: bool) -> Record {
    let ty = ObjectType::entity("FullEntity");

    if valid {
        ty.declare(
            "someint",
            Specs::new().min(1).max(1).in_list([1]).custom(|x| x == &Value::Int(1)),
        );
        ty.declare(
            "somefloat",
            Specs::new()
                .min(1)
                .max(2)
                .in_list([1.23])
                .custom(|x| x == &Value::Float(1.23))
                .scale(2),
        );
        ty.declare(
            "somestring",
            Specs::new()
                .min(3)
                .max(3)
                .in_list(["abc"])
                .matches("abc")
                .custom(|x| x == &Value::from("abc")),
        );
        ty.declare("someemail", Specs::new().email(true));
        ty.declare("somesite", Specs::new().site(true));
        ty.declare("someip", Specs::new().ip(true));
        ty.declare(
            "somelist",
            Specs::new()
                .min(2)
                .max(2)
                .in_list([Value::from(vec![1, 2])])
                .custom(|x| x == &Value::from(vec![1, 2])),
        );
        ty.declare(
            "somedict",
            Specs::new().min(2).max(2).in_list([Value::map([(1, 1), (2, 2)])]),
        );
        ty.declare(
            "sometuple",
            Specs::new().min(2).max(2).in_list([Value::from(vec![1, 2])]),
        );
    } else {
        ty.declare(
            "someint",
            Specs::new().min(2).max(0).in_list([2]).custom(|x| x == &Value::Int(2)),
        );
        ty.declare(
            "somefloat",
            Specs::new()
                .min(2)
                .max(1)
                .in_list([1.34])
                .custom(|x| x == &Value::Float(1.34))
                .scale(1),
        );
        ty.declare(
            "somestring",
            Specs::new()
                .min(4)
                .max(2)
                .in_list(["abcd"])
                .matches("abcd")
                .custom(|x| x == &Value::from("abcd")),
        );
        ty.declare("someemail", Specs::new().email(true));
        ty.declare("somesite", Specs::new().site(true));
        ty.declare("someip", Specs::new().ip(true));
        ty.declare(
            "somelist",
            Specs::new()
                .min(3)
                .max(1)
                .in_list([Value::from(vec![1, 2, 3])])
                .custom(|x| x == &Value::from(vec![1, 2, 3])),
        );
        ty.declare(
            "somedict",
            Specs::new().min(3).max(1).in_list([Value::map([(1, 1), (2, 2), (3, 3)])]),
        );
        ty.declare(
            "sometuple",
            Specs::new().min(3).max(1).in_list([Value::from(vec![1, 2, 3])]),
        );
    }

    let (email, site, ip) = if valid {
        ("abc@abc.com", "http://www.google.com", "127.0.0.1")
    } else {
        ("xxx", "xxx", "xxx")
    };

    Record::with_fields(
        &ty,
        fields! {
            "someint" => 1,
            "somefloat" => 1.23,
            "somestring" => "abc",
            "someemail" => email,
            "somesite" => site,
            "someip" => ip,
            "somelist" => vec![1, 2],
            "somedict" => Value::map([(1, 1), (2, 2)]),
            "sometuple" => vec![1, 2],
        },
    )
}

/// `Outer.inner -> Inner.name`, with `Max(2)` on the inner name.
pub fn nested(name: &str) -> Record {
    let inner_ty = ObjectType::entity("InnerEntity");
    inner_ty.declare("name", Specs::new().max(2));
    let outer_ty = ObjectType::entity("OuterEntity");
    outer_ty.declare("inner", Specs::new());

    let inner = Record::with_fields(&inner_ty, fields! { "name" => name }).shared();
    Record::with_fields(&outer_ty, fields! { "inner" => inner })
}

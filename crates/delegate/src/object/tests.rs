use pretty_assertions::assert_eq;
use rstest::rstest;

use super::*;
use crate::value::{expect_arity, native};

fn counter_class() -> Class {
	Class::builder("Counter")
		.value("step", Value::Int(1))
		.method("bump", |this, args| {
			expect_arity("bump", args, 0)?;
			let step = getattr(this, "step")?.as_int().unwrap_or(0);
			let count = getattr(this, "count")?.as_int().unwrap_or(0);
			setattr(this, "count", Value::Int(count + step))?;
			Ok(Value::Int(count + step))
		})
		.property(
			"doubled",
			|this, _| {
				let count = getattr(this, "count")?.as_int().unwrap_or(0);
				Ok(Value::Int(count * 2))
			},
			None,
		)
		.build()
		.unwrap()
}

#[test]
fn fields_shadow_class_values() {
	let class = counter_class();
	let obj = Value::Object(class.instantiate([("count", Value::Int(0))]).unwrap());
	assert_eq!(getattr(&obj, "step").unwrap(), Value::Int(1));

	setattr(&obj, "step", Value::Int(5)).unwrap();
	assert_eq!(call_method(&obj, "bump", &[]).unwrap(), Value::Int(5));
	assert_eq!(getattr(&obj, "doubled").unwrap(), Value::Int(10));
}

#[test]
fn read_only_property_rejects_writes() {
	let obj = Value::Object(counter_class().instantiate([]).unwrap());
	assert_eq!(
		setattr(&obj, "doubled", Value::Int(1)).unwrap_err(),
		Error::ReadOnly {
			type_name: "Counter".to_string(),
			attr: "doubled".to_string()
		}
	);
}

#[test]
fn methods_bind_to_their_instance() {
	let class = counter_class();
	let a = Value::Object(class.instantiate([("count", Value::Int(0))]).unwrap());
	let b = Value::Object(class.instantiate([("count", Value::Int(10))]).unwrap());

	let bump_a = getattr(&a, "bump").unwrap();
	assert!(bump_a.as_method().unwrap().receiver().is(&a));
	bump_a.call(&[]).unwrap();
	assert_eq!(getattr(&a, "count").unwrap(), Value::Int(1));
	assert_eq!(getattr(&b, "count").unwrap(), Value::Int(10));
}

#[test]
fn arity_is_checked() {
	let obj = Value::Object(counter_class().instantiate([]).unwrap());
	let err = call_method(&obj, "bump", &[Value::None]).unwrap_err();
	assert_eq!(err.to_string(), "bump() takes 0 arguments (1 given)");
}

#[rstest]
#[case(Value::str("foo"), "upper", Value::str("FOO"))]
#[case(Value::str("FOO"), "lower", Value::str("foo"))]
#[case(Value::str("  pad "), "strip", Value::str("pad"))]
#[case(Value::str("héllo"), "__len__", Value::Int(5))]
#[case(Value::list([Value::Int(1), Value::Int(2)]), "__len__", Value::Int(2))]
fn builtin_methods(#[case] receiver: Value, #[case] name: &str, #[case] expected: Value) {
	assert_eq!(call_method(&receiver, name, &[]).unwrap(), expected);
}

#[test]
fn list_append_mutates_shared_storage() {
	let list = Value::list([]);
	let alias = list.clone();
	call_method(&list, "append", &[Value::Int(3)]).unwrap();
	assert_eq!(alias.to_vec().unwrap(), [Value::Int(3)]);
}

#[test]
fn protocol_helpers() {
	let s = Value::str("ab");
	assert_eq!(len(&s).unwrap(), 2);
	assert_eq!(iter(&s).unwrap(), [Value::str("a"), Value::str("b")]);
	assert_eq!(
		len(&Value::Int(3)).unwrap_err(),
		Error::AttributeNotFound {
			type_name: "int".to_string(),
			attr: "__len__".to_string()
		}
	);
}

#[test]
fn len_rejects_non_int_results() {
	let class = Class::builder("Odd")
		.method("__len__", |_, _| Ok(Value::str("three")))
		.build()
		.unwrap();
	let obj = Value::Object(class.instantiate([]).unwrap());
	assert!(matches!(len(&obj), Err(Error::TypeMismatch { .. })));
}

#[rstest]
#[case(Value::str("foo"), "upper", "'str' object attribute 'upper' is read-only")]
#[case(Value::str("foo"), "nope", "'str' object has no attribute 'nope'")]
#[case(Value::Int(1), "real", "'int' object has no attribute 'real'")]
fn builtins_reject_writes(#[case] target: Value, #[case] attr: &str, #[case] message: &str) {
	assert_eq!(setattr(&target, attr, Value::None).unwrap_err().to_string(), message);
}

#[test]
fn non_methods_are_not_callable() {
	let err = Value::Int(1).call(&[]).unwrap_err();
	assert_eq!(err, Error::NotCallable { type_name: "int".to_string() });
}

#[test]
fn property_setter_runs_against_instance() {
	let class = Class::builder("Box")
		.property(
			"value",
			|this, _| getattr(this, "_value"),
			Some(native(|this, args| {
				setattr(this, "_value", args[0].clone())?;
				Ok(Value::None)
			})),
		)
		.build()
		.unwrap();
	let obj = Value::Object(class.instantiate([]).unwrap());
	setattr(&obj, "value", Value::Bool(true)).unwrap();
	assert_eq!(getattr(&obj, "_value").unwrap(), Value::Bool(true));
}

#[test]
fn invalid_builder_names_surface_on_build() {
	let err = Class::builder("Bad").value("1st", Value::None).build().unwrap_err();
	assert_eq!(err, Error::InvalidName { name: "1st".to_string() });
}

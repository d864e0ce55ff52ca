//! Compile-time forwarding with `delegate!` and `#[derive(Delegate)]`.

use delegato::{Delegate, delegatable, delegate};
use pretty_assertions::assert_eq;

struct Wrapper {
	inner: String,
}

impl Wrapper {
	fn new(inner: &str) -> Self {
		Self { inner: inner.to_string() }
	}

	delegate! {
		to self.inner {
			#[call(to_uppercase)]
			fn upper_delegate(&self) -> String;
			#[call(to_lowercase)]
			fn lower(&self) -> String;
			fn len(&self) -> usize;
			fn push_str(&mut self, s: &str);
		}
	}
}

#[test]
fn wrapper_forwards_to_inner_string() {
	let mut wrapper = Wrapper::new("foo");
	assert_eq!(wrapper.upper_delegate(), "FOO");
	assert_eq!(Wrapper::new("FOO").lower(), "foo");

	wrapper.push_str("bar");
	assert_eq!(wrapper.len(), 6);
	assert_eq!(wrapper.inner, "foobar");
}

#[derive(Default)]
struct Bar {
	param: i32,
}

impl Bar {
	fn param(&self) -> i32 {
		self.param
	}

	fn set_param(&mut self, param: i32) {
		self.param = param;
	}
}

#[derive(Default)]
struct Foo2 {
	v: Bar,
}

impl Foo2 {
	delegate! {
		to self.v {
			#[property]
			fn param(&self) -> i32;
		}
	}
}

#[test]
fn property_pairs_reach_the_delegate() {
	let mut foo2 = Foo2::default();
	assert_eq!(foo2.param(), 0);
	foo2.set_param(2);
	assert_eq!(foo2.param(), 2);
	assert_eq!(foo2.v.param(), 2);
	assert_eq!(foo2.v.param, 2);

	foo2.v.set_param(5);
	assert_eq!(foo2.param(), 5);
}

struct Stats {
	hits: u32,
	label: String,
}

struct Counter {
	stats: Stats,
}

impl Counter {
	delegate! {
		to self.stats {
			#[field]
			fn hits(&self) -> u32;
			#[field]
			fn set_hits(&mut self, hits: u32);
			#[field]
			fn label(&self) -> &str;
			#[field]
			#[call(label)]
			fn label_mut(&mut self) -> &mut String;
		}
	}
}

#[test]
fn fields_are_read_and_written_in_place() {
	let mut counter = Counter {
		stats: Stats {
			hits: 1,
			label: "a".to_string(),
		},
	};
	counter.set_hits(counter.hits() + 1);
	counter.label_mut().push('b');

	assert_eq!(counter.hits(), 2);
	assert_eq!(counter.label(), "ab");
	assert_eq!(counter.stats.hits, 2);
}

struct Greeter {
	name: &'static str,
}

impl Greeter {
	fn bar(&self) -> &'static str {
		"bar"
	}

	fn greet(&self, greeting: &str) -> String {
		format!("{greeting}, {}", self.name)
	}

	delegate! {
		to self {
			#[call(bar)]
			fn foo(&self) -> &'static str;
			#[call(greet)]
			fn hello(&self, greeting: &str) -> String;
		}
	}
}

#[test]
fn self_delegation_aliases_sibling_methods() {
	let greeter = Greeter { name: "ada" };
	assert_eq!(greeter.foo(), "bar");
	assert_eq!(greeter.hello("hi"), "hi, ada");
}

struct Engine {
	rpm: u32,
}

impl Engine {
	fn address(&self) -> *const Engine {
		self
	}

	fn rev(&mut self, by: u32) -> u32 {
		self.rpm += by;
		self.rpm
	}
}

struct Car {
	parts: Parts,
}

struct Parts {
	engine: Engine,
}

impl Car {
	delegate! {
		to self.parts.engine {
			fn address(&self) -> *const Engine;
			fn rev(&mut self, by: u32) -> u32;
		}
	}
}

#[test]
fn nested_targets_keep_the_delegate_as_receiver() {
	let mut car = Car {
		parts: Parts {
			engine: Engine { rpm: 800 },
		},
	};
	assert_eq!(car.address(), &car.parts.engine as *const Engine);
	assert_eq!(car.rev(200), 1000);
	assert_eq!(car.parts.engine.rpm, 1000);
}

#[delegatable]
trait Shape {
	type Unit;
	const SIDES: u32;

	fn area(&self) -> f64;
	fn scale(&mut self, by: f64);
	fn unit(&self) -> Self::Unit;

	fn describe(&self, prefix: &str) -> String {
		format!("{prefix}: {}", self.area())
	}
}

#[delegatable]
trait Named {
	fn name(&self) -> String;
	fn rename(&mut self, name: String);
	fn into_name(self) -> String;
}

struct Square {
	side: f64,
}

impl Shape for Square {
	type Unit = &'static str;
	const SIDES: u32 = 4;

	fn area(&self) -> f64 {
		self.side * self.side
	}

	fn scale(&mut self, by: f64) {
		self.side *= by;
	}

	fn unit(&self) -> Self::Unit {
		"m"
	}

	fn describe(&self, prefix: &str) -> String {
		format!("{prefix} square of side {}", self.side)
	}
}

struct Tag(String);

impl Named for Tag {
	fn name(&self) -> String {
		self.0.clone()
	}

	fn rename(&mut self, name: String) {
		self.0 = name;
	}

	fn into_name(self) -> String {
		self.0
	}
}

#[derive(Delegate)]
struct Tile {
	#[delegate_to(Shape)]
	square: Square,
	#[delegate_to(Named)]
	tag: Tag,
	id: u32,
}

#[derive(Delegate)]
struct Meters(#[delegate_to(Shape)] Square);

#[derive(Delegate)]
struct Labeled<S> {
	label: &'static str,
	#[delegate_to(Shape)]
	shape: S,
}

fn area_of<T: Shape>(shape: &T) -> f64 {
	shape.area()
}

#[test]
fn derived_impl_forwards_trait_surface() {
	let mut tile = Tile {
		square: Square { side: 2.0 },
		tag: Tag("floor".to_string()),
		id: 7,
	};
	assert_eq!(tile.area(), 4.0);
	tile.scale(1.5);
	assert_eq!(area_of(&tile), 9.0);
	assert_eq!(tile.unit(), "m");
	assert_eq!(<Tile as Shape>::SIDES, 4);
	assert_eq!(tile.id, 7);
}

#[test]
fn overridden_default_methods_come_from_the_delegate() {
	let tile = Tile {
		square: Square { side: 3.0 },
		tag: Tag("wall".to_string()),
		id: 1,
	};
	assert_eq!(tile.describe("a"), "a square of side 3");
}

#[test]
fn by_value_and_mutable_receivers() {
	let mut tile = Tile {
		square: Square { side: 1.0 },
		tag: Tag("old".to_string()),
		id: 0,
	};
	tile.rename("new".to_string());
	assert_eq!(tile.name(), "new");
	assert_eq!(tile.into_name(), "new");
}

#[test]
fn tuple_and_generic_structs() {
	let meters = Meters(Square { side: 5.0 });
	assert_eq!(meters.area(), 25.0);

	let labeled = Labeled {
		label: "box",
		shape: Meters(Square { side: 2.0 }),
	};
	assert_eq!(labeled.area(), 4.0);
	assert_eq!(<Labeled<Meters> as Shape>::SIDES, 4);
	assert_eq!(labeled.label, "box");
}

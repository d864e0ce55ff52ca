//! Declarative delegation: forward attribute and method access from an
//! owning object to an object it holds.
//!
//! Two layers are provided:
//!
//! * A reflective layer ([`Class`], [`Object`], [`Value`]) with delegation
//!   descriptors ([`DelegateTo`]) installed in class attribute tables, bulk
//!   installation ([`apply::delegate`], [`apply::Delegation`]) and TOML
//!   delegation plans ([`plan::DelegationPlan`]).
//! * Compile-time forwarding macros: [`delegate!`], [`delegatable`] and
//!   [`Delegate`].
//!
//! ```
//! use delegato::{Class, Value, apply::delegate, object::call_method};
//!
//! let foo = delegate(&Class::new("Foo"), "v", ["upper", "lower"])?;
//! let obj = Value::Object(foo.instantiate([("v", Value::str("foo"))])?);
//! assert_eq!(call_method(&obj, "upper", &[])?, Value::str("FOO"));
//! # Ok::<(), delegato::Error>(())
//! ```

/// Bulk descriptor installation.
pub mod apply;
/// Class attribute tables.
pub mod class;
/// Delegation descriptors.
pub mod descriptor;
/// Error types.
pub mod error;
/// Identifiers and delegation targets.
pub mod name;
/// Instances and the attribute protocol.
pub mod object;
/// TOML delegation plans.
pub mod plan;
/// Reflective values.
pub mod value;

pub use class::{Class, ClassAttr, ClassBuilder, Property};
pub use delegato_macros::{Delegate, delegatable, delegate};
pub use descriptor::DelegateTo;
pub use error::{Error, Result};
pub use name::{Name, Target};
pub use object::{Object, getattr, setattr};
pub use value::{BoundMethod, NativeFn, Value};

//! Conversion between the external representation and the value model
//!
//! - [`decode`]: nested `serde_json::Value` -> [`ObjectValue`](crate::ObjectValue),
//!   collecting a `TypeMismatch` per leaf that cannot be coerced
//! - [`encode`]: value model -> canonical nested `serde_json::Value`
//! - [`flatmap`]: value model <-> flat `key = value` state form

pub mod decode;
pub mod encode;
pub mod flatmap;

pub use decode::{Decoded, decode};
pub use encode::{encode, encode_value};
pub use flatmap::{FlatMap, flatten, unflatten};

//! JSON-shaped values compared by the diff engine.
//!
//! Scalars are stored inline. Arrays and objects are shared handles: cloning
//! an [`Array`] or [`Object`] clones the handle, not the contents, and two
//! handles are the *same value* iff they point at the same allocation. That
//! identity is what the cycle guard tracks, and it is what lets a caller build
//! a self-referential value such as `obj.self = obj`.
//!
//! Values that contain cycles leak their allocation (reference counting never
//! reaches zero). They exist so that hostile or programmatic inputs can be
//! rejected with a cycle error instead of overflowing the stack.

use indexmap::IndexMap;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Error as _, Serialize, SerializeMap, SerializeSeq, Serializer};
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

/// A decoded JSON-shaped value.
#[derive(Clone)]
pub enum Value {
    Null,
    Undefined,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Array),
    Object(Object),
}

/// Shared, growable sequence of values.
#[derive(Clone, Default)]
pub struct Array(Rc<RefCell<Vec<Value>>>);

/// Shared, insertion-ordered mapping from string keys to values.
#[derive(Clone, Default)]
pub struct Object(Rc<RefCell<IndexMap<String, Value>>>);

impl Array {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: Vec<Value>) -> Self {
        Self(Rc::new(RefCell::new(values)))
    }

    /// Append a value. The handle may be pushed into itself to form a cycle.
    pub fn push(&self, value: Value) {
        self.0.borrow_mut().push(value);
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Borrow the elements for reading.
    ///
    /// # Panics
    ///
    /// Panics if the array is being mutated through [`Array::push`] at the
    /// same time, which cannot happen during a comparison.
    pub fn borrow(&self) -> Ref<'_, Vec<Value>> {
        self.0.borrow()
    }

    /// Allocation address, stable for the lifetime of the handle.
    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }

    pub fn ptr_eq(&self, other: &Array) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: IndexMap<String, Value>) -> Self {
        Self(Rc::new(RefCell::new(entries)))
    }

    /// Insert or replace a key, keeping the original position of an existing key.
    pub fn insert(&self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.borrow_mut().insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.borrow().get(key).cloned()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.borrow().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Borrow the entries for reading, in insertion order.
    pub fn borrow(&self) -> Ref<'_, IndexMap<String, Value>> {
        self.0.borrow()
    }

    /// Allocation address, stable for the lifetime of the handle.
    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }

    pub fn ptr_eq(&self, other: &Object) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Value {
    /// Build an object value from `(key, value)` pairs, keeping their order.
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Object(Object::from_entries(
            entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }

    /// Build an array value from its elements.
    pub fn array<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        Value::Array(Array::from_values(items.into_iter().collect()))
    }

    /// Identity of a composite value; `None` for scalars.
    pub fn identity(&self) -> Option<usize> {
        match self {
            Value::Array(array) => Some(array.id()),
            Value::Object(object) => Some(object.id()),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => Value::array(items.into_iter().map(Value::from)),
            serde_json::Value::Object(map) => {
                Value::object(map.into_iter().map(|(k, v)| (k, Value::from(v))))
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Array> for Value {
    fn from(array: Array) -> Self {
        Value::Array(array)
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::Object(object)
    }
}

// ---------------------------------------------------------------------------
// Equality
// ---------------------------------------------------------------------------

/// Structural equality. Pairs of composites already under comparison on the
/// current path are assumed equal, so cyclic values compare without looping.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        let mut active = Vec::new();
        structural_eq(self, other, &mut active)
    }
}

fn structural_eq(a: &Value, b: &Value, active: &mut Vec<(usize, usize)>) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) | (Value::Undefined, Value::Undefined) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Array(x), Value::Array(y)) => {
            if x.ptr_eq(y) {
                return true;
            }
            let pair = (x.id(), y.id());
            if active.contains(&pair) {
                return true;
            }
            let (xs, ys) = (x.borrow(), y.borrow());
            if xs.len() != ys.len() {
                return false;
            }
            active.push(pair);
            let equal = xs
                .iter()
                .zip(ys.iter())
                .all(|(l, r)| structural_eq(l, r, active));
            active.pop();
            equal
        }
        (Value::Object(x), Value::Object(y)) => {
            if x.ptr_eq(y) {
                return true;
            }
            let pair = (x.id(), y.id());
            if active.contains(&pair) {
                return true;
            }
            let (xs, ys) = (x.borrow(), y.borrow());
            if xs.len() != ys.len() {
                return false;
            }
            active.push(pair);
            let equal = xs
                .iter()
                .all(|(key, l)| ys.get(key).is_some_and(|r| structural_eq(l, r, active)));
            active.pop();
            equal
        }
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Debug / Serialize
// ---------------------------------------------------------------------------

/// A value paired with the composites open on the current formatting path.
struct Guarded<'a> {
    value: &'a Value,
    open: &'a RefCell<Vec<usize>>,
}

impl<'a> Guarded<'a> {
    fn child<'b>(&self, value: &'b Value) -> Guarded<'b>
    where
        'a: 'b,
    {
        Guarded {
            value,
            open: self.open,
        }
    }

    /// Push the composite onto the open path; false if it is already open.
    fn open(&self, id: usize) -> bool {
        let mut open = self.open.borrow_mut();
        if open.contains(&id) {
            return false;
        }
        open.push(id);
        true
    }

    fn close(&self) {
        self.open.borrow_mut().pop();
    }
}

impl fmt::Debug for Guarded<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Value::Null => f.write_str("Null"),
            Value::Undefined => f.write_str("Undefined"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Number(n) => write!(f, "Number({n})"),
            Value::String(s) => write!(f, "String({s:?})"),
            Value::Array(array) => {
                if !self.open(array.id()) {
                    return f.write_str("Array(<cycle>)");
                }
                let items = array.borrow();
                let result = f
                    .debug_list()
                    .entries(items.iter().map(|v| self.child(v)))
                    .finish();
                self.close();
                result
            }
            Value::Object(object) => {
                if !self.open(object.id()) {
                    return f.write_str("Object(<cycle>)");
                }
                let entries = object.borrow();
                let result = f
                    .debug_map()
                    .entries(entries.iter().map(|(k, v)| (k, self.child(v))))
                    .finish();
                self.close();
                result
            }
        }
    }
}

impl Serialize for Guarded<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.value {
            Value::Null | Value::Undefined => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(array) => {
                if !self.open(array.id()) {
                    return Err(S::Error::custom("cannot serialize a cyclic array"));
                }
                let items = array.borrow();
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items.iter() {
                    seq.serialize_element(&self.child(item))?;
                }
                self.close();
                seq.end()
            }
            Value::Object(object) => {
                if !self.open(object.id()) {
                    return Err(S::Error::custom("cannot serialize a cyclic object"));
                }
                let entries = object.borrow();
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, item) in entries.iter() {
                    map.serialize_entry(key, &self.child(item))?;
                }
                self.close();
                map.end()
            }
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = RefCell::new(Vec::new());
        fmt::Debug::fmt(&Guarded { value: self, open: &open }, f)
    }
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&Value::Array(self.clone()), f)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&Value::Object(self.clone()), f)
    }
}

/// Serializes as plain JSON. `Undefined` becomes `null`; cyclic values fail.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let open = RefCell::new(Vec::new());
        Guarded { value: self, open: &open }.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

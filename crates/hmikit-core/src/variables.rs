//! Runtime variable store with typed access and change subscriptions.
//!
//! Widgets read bound variables from the store every tick, button actions
//! write to it, and subscribers are notified synchronously on every write.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A single runtime value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Value {
    Int(i32),
    Float(f32),
    Double(f64),
    Bool(bool),
    Text(String),
}

impl Value {
    /// Name of the concrete type held, for logging.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Double(_) => "double",
            Value::Bool(_) => "bool",
            Value::Text(_) => "text",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Double(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Text(v) => f.write_str(v),
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

/// Types that can be read out of a [`Value`] by exact type match.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for i32 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromValue for f32 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Double(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(v) => Some(v.clone()),
            _ => None,
        }
    }
}

/// Callback invoked after every write to a subscribed name.
///
/// The store itself is passed back in so a subscriber can write other
/// variables without capturing shared state.
pub type Subscriber = Box<dyn FnMut(&mut VariableStore, &str, &Value)>;

/// Key/value store of runtime variables.
#[derive(Default)]
pub struct VariableStore {
    values: HashMap<String, Value>,
    subscribers: HashMap<String, Vec<Subscriber>>,
    /// Names whose subscribers are currently being notified (innermost last).
    notifying: Vec<String>,
    /// Names removed while their own notification was in flight.
    removed_while_notifying: Vec<String>,
}

impl fmt::Debug for VariableStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariableStore")
            .field("values", &self.values)
            .field(
                "subscribers",
                &self
                    .subscribers
                    .iter()
                    .map(|(name, subs)| (name.as_str(), subs.len()))
                    .collect::<HashMap<_, _>>(),
            )
            .finish()
    }
}

impl VariableStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a variable, then notify its subscribers in
    /// registration order.
    ///
    /// A write to a name whose subscribers are already being notified
    /// (a subscriber writing back to its own variable, or a write cycle)
    /// is stored but not fanned out again.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        log::debug!("set {name} = {value} ({})", value.type_name());
        self.values.insert(name.clone(), value.clone());

        if self.notifying.contains(&name) {
            log::debug!("nested write to {name} while notifying, not re-notified");
            return;
        }
        let Some(mut subscribers) = self.subscribers.remove(&name) else {
            return;
        };

        self.notifying.push(name.clone());
        for subscriber in subscribers.iter_mut() {
            subscriber(self, &name, &value);
        }
        self.notifying.pop();

        let added = self.subscribers.remove(&name).unwrap_or_default();
        if let Some(pos) = self.removed_while_notifying.iter().position(|n| *n == name) {
            self.removed_while_notifying.swap_remove(pos);
            if !added.is_empty() {
                self.subscribers.insert(name, added);
            }
        } else {
            subscribers.extend(added);
            self.subscribers.insert(name, subscribers);
        }
    }

    /// Current value of a variable.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.values.get(name).cloned()
    }

    /// Borrow the current value of a variable.
    pub fn get_ref(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Current value of a variable if it holds exactly type `T`.
    ///
    /// A missing variable and one of another type both yield `None`.
    pub fn get_as<T: FromValue>(&self, name: &str) -> Option<T> {
        self.values.get(name).and_then(T::from_value)
    }

    pub fn has(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Remove a variable together with all of its subscriptions.
    pub fn remove(&mut self, name: &str) {
        self.values.remove(name);
        self.subscribers.remove(name);
        if self.notifying.iter().any(|n| n == name)
            && !self.removed_while_notifying.iter().any(|n| n == name)
        {
            self.removed_while_notifying.push(name.to_string());
        }
    }

    /// Register a callback for every future write to `name`.
    ///
    /// The current value, if any, is not delivered.
    pub fn subscribe<F>(&mut self, name: impl Into<String>, callback: F)
    where
        F: FnMut(&mut VariableStore, &str, &Value) + 'static,
    {
        self.subscribers
            .entry(name.into())
            .or_default()
            .push(Box::new(callback));
    }

    /// Number of subscriptions registered for `name`.
    pub fn subscriber_count(&self, name: &str) -> usize {
        self.subscribers.get(name).map_or(0, Vec::len)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Names of all variables, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.values.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_set_and_get_various_types() {
        let mut store = VariableStore::new();
        store.set("integer", 42);
        store.set("float", 2.75f32);
        store.set("double", 2.5f64);
        store.set("string", "hello");
        store.set("boolean", true);

        assert_eq!(store.get_as::<i32>("integer"), Some(42));
        assert!((store.get_as::<f32>("float").unwrap() - 2.75).abs() < f32::EPSILON);
        assert_eq!(store.get_as::<f64>("double"), Some(2.5));
        assert_eq!(store.get_as::<String>("string").as_deref(), Some("hello"));
        assert_eq!(store.get_as::<bool>("boolean"), Some(true));
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn test_typed_access_requires_exact_type() {
        let mut store = VariableStore::new();
        store.set("x", 1.0f32);

        assert_eq!(store.get_as::<f64>("x"), None);
        assert_eq!(store.get_as::<i32>("x"), None);
        assert_eq!(store.get_as::<String>("x"), None);
        assert!(store.get_as::<f32>("x").is_some());
    }

    #[test]
    fn test_missing_is_absent_for_every_type() {
        let store = VariableStore::new();
        assert_eq!(store.get("missing"), None);
        assert_eq!(store.get_as::<i32>("missing"), None);
        assert_eq!(store.get_as::<f32>("missing"), None);
        assert_eq!(store.get_as::<f64>("missing"), None);
        assert_eq!(store.get_as::<bool>("missing"), None);
        assert_eq!(store.get_as::<String>("missing"), None);
        assert!(!store.has("missing"));
    }

    #[test]
    fn test_last_write_wins_across_types() {
        let mut store = VariableStore::new();
        store.set("counter", 0);
        assert!(store.has("counter"));
        store.set("counter", 100);
        assert_eq!(store.get_as::<i32>("counter"), Some(100));

        store.set("counter", "reset");
        assert_eq!(store.get("counter"), Some(Value::Text("reset".into())));
        assert_eq!(store.get_as::<i32>("counter"), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_subscribers_fire_in_order_on_every_write() {
        let mut store = VariableStore::new();
        let calls = Rc::new(RefCell::new(Vec::new()));

        let log = calls.clone();
        store.subscribe("x", move |_, name, value| {
            log.borrow_mut().push((name.to_string(), value.clone()));
        });

        store.set("x", 1);
        store.set("x", 2);
        store.set("y", 3);

        assert_eq!(
            *calls.borrow(),
            vec![
                ("x".to_string(), Value::Int(1)),
                ("x".to_string(), Value::Int(2)),
            ]
        );
    }

    #[test]
    fn test_unchanged_value_still_notifies() {
        let mut store = VariableStore::new();
        let count = Rc::new(RefCell::new(0));
        let c = count.clone();
        store.subscribe("x", move |_, _, _| *c.borrow_mut() += 1);

        store.set("x", true);
        store.set("x", true);
        assert_eq!(*count.borrow(), 2);
    }

    #[test]
    fn test_multiple_subscribers_registration_order() {
        let mut store = VariableStore::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for i in 0..3 {
            let o = order.clone();
            store.subscribe("temperature", move |_, _, _| o.borrow_mut().push(i));
        }
        store.set("temperature", 25);
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn test_subscribe_is_not_retroactive() {
        let mut store = VariableStore::new();
        store.set("x", 5);
        let count = Rc::new(RefCell::new(0));
        let c = count.clone();
        store.subscribe("x", move |_, _, _| *c.borrow_mut() += 1);
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn test_remove_clears_value_and_subscriptions() {
        let mut store = VariableStore::new();
        let count = Rc::new(RefCell::new(0));
        let c = count.clone();
        store.subscribe("x", move |_, _, _| *c.borrow_mut() += 1);
        store.set("x", 1);

        store.remove("x");
        assert_eq!(store.get("x"), None);
        assert_eq!(store.subscriber_count("x"), 0);

        store.set("x", 7);
        assert_eq!(store.get("x"), Some(Value::Int(7)));
        assert_eq!(*count.borrow(), 1);

        // Removing an absent name is a no-op
        store.remove("never");
        store.remove("x");
        store.remove("x");
        assert!(store.is_empty());
    }

    #[test]
    fn test_subscriber_can_write_other_variables() {
        let mut store = VariableStore::new();
        store.subscribe("celsius", |store, _, value| {
            if let Value::Double(c) = value {
                store.set("fahrenheit", c * 9.0 / 5.0 + 32.0);
            }
        });
        store.set("celsius", 100.0f64);
        assert_eq!(store.get_as::<f64>("fahrenheit"), Some(212.0));
    }

    #[test]
    fn test_self_write_does_not_recurse() {
        let mut store = VariableStore::new();
        let count = Rc::new(RefCell::new(0));
        let c = count.clone();
        store.subscribe("x", move |store, _, value| {
            *c.borrow_mut() += 1;
            if let Value::Int(v) = value {
                store.set("x", v + 1);
            }
        });

        store.set("x", 1);
        assert_eq!(*count.borrow(), 1);
        assert_eq!(store.get_as::<i32>("x"), Some(2));
        assert_eq!(store.subscriber_count("x"), 1);

        store.set("x", 10);
        assert_eq!(*count.borrow(), 2);
        assert_eq!(store.get_as::<i32>("x"), Some(11));
    }

    #[test]
    fn test_write_cycle_terminates() {
        let mut store = VariableStore::new();
        store.subscribe("a", |store, _, _| store.set("b", 1));
        store.subscribe("b", |store, _, _| store.set("a", 2));

        store.set("a", 0);
        assert_eq!(store.get_as::<i32>("a"), Some(2));
        assert_eq!(store.get_as::<i32>("b"), Some(1));
    }

    #[test]
    fn test_subscribe_during_notification_appends() {
        let mut store = VariableStore::new();
        let hits = Rc::new(RefCell::new(Vec::new()));

        let h = hits.clone();
        let mut registered = false;
        store.subscribe("x", move |store, _, _| {
            h.borrow_mut().push("first");
            if !registered {
                registered = true;
                let h2 = h.clone();
                store.subscribe("x", move |_, _, _| h2.borrow_mut().push("late"));
            }
        });

        store.set("x", 1);
        assert_eq!(*hits.borrow(), vec!["first"]);
        assert_eq!(store.subscriber_count("x"), 2);

        store.set("x", 2);
        assert_eq!(*hits.borrow(), vec!["first", "first", "late"]);
    }

    #[test]
    fn test_remove_during_notification_drops_subscriptions() {
        let mut store = VariableStore::new();
        store.subscribe("x", |store, name, _| store.remove(name));
        store.set("x", 1);

        assert!(!store.has("x"));
        assert_eq!(store.subscriber_count("x"), 0);
    }

    #[test]
    fn test_names_sorted() {
        let mut store = VariableStore::new();
        store.set("b", 1);
        store.set("a", 2);
        store.set("c", 3);
        assert_eq!(store.names(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_value_serde_tagged() {
        let json = serde_json::to_string(&Value::Float(50.0)).unwrap();
        assert_eq!(json, r#"{"type":"Float","value":50.0}"#);
        let back: Value = serde_json::from_str(r#"{"type":"Text","value":"on"}"#).unwrap();
        assert_eq!(back, Value::Text("on".into()));
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Int(3).to_string(), "3");
        assert_eq!(Value::Text("abc".into()).to_string(), "abc");
        assert_eq!(Value::Bool(false).to_string(), "false");
    }
}

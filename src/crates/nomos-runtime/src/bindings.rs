// bindings.rs
//
// Lexical scopes for the evaluator.

use hashbrown::HashMap;
use rustc_hash::FxBuildHasher;

use crate::value::Value;

/// One scope's bindings.
pub type Frame = HashMap<String, Value, FxBuildHasher>;

/// A stack of scopes. The bottom frame is the top-level scope and is never
/// popped; lookups search innermost first.
#[derive(Debug)]
pub struct Bindings {
    frames: Vec<Frame>,
}

impl Default for Bindings {
    fn default() -> Self {
        Self::new()
    }
}

impl Bindings {
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::default()],
        }
    }

    pub fn enter(&mut self) {
        self.frames.push(Frame::default());
    }

    /// Pop the innermost scope and hand back its bindings so the caller can
    /// release what they own. The top-level scope stays; leaving it returns
    /// `None`.
    pub fn leave(&mut self) -> Option<Frame> {
        if self.frames.len() == 1 {
            return None;
        }
        self.frames.pop()
    }

    /// Number of nested scopes above the top level.
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    pub fn find(&self, name: &str) -> Option<&Value> {
        self.frames.iter().rev().find_map(|frame| frame.get(name))
    }

    /// Bind `name` in the innermost scope, returning what it shadowed there.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        let frame = self.frames.last_mut()?;
        frame.insert(name.into(), value)
    }

    pub fn insert_top_level(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.frames[0].insert(name.into(), value)
    }

    /// Every visible binding, inner scopes shadowing outer ones.
    pub fn visible(&self) -> Vec<(String, Value)> {
        let mut seen = Frame::default();
        for frame in self.frames.iter().rev() {
            for (name, value) in frame {
                seen.entry_ref(name.as_str()).or_insert_with(|| value.clone());
            }
        }
        seen.into_iter().collect()
    }

    /// Consume the stack, keeping only the top-level scope.
    pub fn into_top_level(mut self) -> Frame {
        self.frames.swap_remove(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inner_scope_shadows_outer() {
        let mut b = Bindings::new();
        b.insert("x", Value::Nat16(1));
        b.enter();
        b.insert("x", Value::Nat16(2));
        assert_eq!(b.find("x"), Some(&Value::Nat16(2)));
        let frame = b.leave().unwrap();
        assert_eq!(frame.get("x"), Some(&Value::Nat16(2)));
        assert_eq!(b.find("x"), Some(&Value::Nat16(1)));
    }

    #[test]
    fn top_level_is_never_left() {
        let mut b = Bindings::new();
        assert!(b.leave().is_none());
        assert_eq!(b.depth(), 0);
    }

    #[test]
    fn insert_top_level_from_nested_scope() {
        let mut b = Bindings::new();
        b.enter();
        b.enter();
        b.insert_top_level("g", Value::Bool(true));
        b.leave();
        b.leave();
        assert_eq!(b.find("g"), Some(&Value::Bool(true)));
    }

    #[test]
    fn visible_prefers_innermost() {
        let mut b = Bindings::new();
        b.insert("x", Value::Nat16(1));
        b.insert("y", Value::Nat16(9));
        b.enter();
        b.insert("x", Value::Nat16(2));
        let mut seen = b.visible();
        seen.sort_by(|l, r| l.0.cmp(&r.0));
        assert_eq!(
            seen,
            vec![
                ("x".to_string(), Value::Nat16(2)),
                ("y".to_string(), Value::Nat16(9))
            ]
        );
    }

    #[test]
    fn missing_name() {
        assert!(Bindings::new().find("nope").is_none());
    }
}

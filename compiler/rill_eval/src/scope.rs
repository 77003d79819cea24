//! Lexical scope chain.
//!
//! A scope is a mutable name→value table with a single parent link. `declare`
//! always writes to the innermost scope (shadowing); `get` and `set` walk the
//! parent chain outward. Closures keep the chain alive by holding a
//! [`ScopeRef`] to their definition scope.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rill_ir::Name;
use rustc_hash::FxHashMap;

use crate::value::Value;

/// A single scope of name bindings.
struct Scope {
    bindings: FxHashMap<Name, Value>,
    parent: Option<ScopeRef>,
}

/// Shared handle to a scope.
///
/// `Rc<RefCell<..>>` is the point, not an accident: a scope is shared between
/// the active evaluation and every closure that captured it, and all of them
/// observe each other's mutations.
pub struct ScopeRef(Rc<RefCell<Scope>>);

impl ScopeRef {
    /// Create a root scope with no parent.
    pub fn new_root() -> Self {
        ScopeRef(Rc::new(RefCell::new(Scope {
            bindings: FxHashMap::default(),
            parent: None,
        })))
    }

    /// Create a child scope parented at this one.
    #[must_use]
    pub fn child(&self) -> ScopeRef {
        ScopeRef(Rc::new(RefCell::new(Scope {
            bindings: FxHashMap::default(),
            parent: Some(self.clone()),
        })))
    }

    /// Create the binding in this scope, shadowing any outer binding of the
    /// same name.
    pub fn declare(&self, name: Name, value: Value) {
        self.0.borrow_mut().bindings.insert(name, value);
    }

    /// Look up a name, walking the parent chain outward.
    pub fn get(&self, name: Name) -> Option<Value> {
        let scope = self.0.borrow();
        if let Some(value) = scope.bindings.get(&name) {
            return Some(value.clone());
        }
        scope.parent.as_ref().and_then(|parent| parent.get(name))
    }

    /// Assign to an existing binding, mutating the first enclosing scope
    /// where the name is declared. Returns `false` if the name is declared
    /// nowhere in the chain.
    pub fn set(&self, name: Name, value: Value) -> bool {
        let mut scope = self.0.borrow_mut();
        if let Some(slot) = scope.bindings.get_mut(&name) {
            *slot = value;
            return true;
        }
        match &scope.parent {
            Some(parent) => parent.set(name, value),
            None => false,
        }
    }
}

impl Clone for ScopeRef {
    #[inline]
    fn clone(&self) -> Self {
        ScopeRef(Rc::clone(&self.0))
    }
}

impl fmt::Debug for ScopeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scope = self.0.borrow();
        write!(
            f,
            "ScopeRef({} bindings{})",
            scope.bindings.len(),
            if scope.parent.is_some() {
                ", has parent"
            } else {
                ""
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use rill_ir::StringInterner;

    use super::*;

    fn names(interner: &StringInterner, text: &str) -> Name {
        interner.intern(text)
    }

    #[test]
    fn declare_and_get() {
        let interner = StringInterner::new();
        let x = names(&interner, "x");
        let scope = ScopeRef::new_root();
        scope.declare(x, Value::Number(1.0));
        assert_eq!(scope.get(x), Some(Value::Number(1.0)));
    }

    #[test]
    fn get_walks_the_parent_chain() {
        let interner = StringInterner::new();
        let x = names(&interner, "x");
        let root = ScopeRef::new_root();
        root.declare(x, Value::Number(1.0));
        let inner = root.child().child();
        assert_eq!(inner.get(x), Some(Value::Number(1.0)));
    }

    #[test]
    fn set_mutates_the_declaring_scope() {
        let interner = StringInterner::new();
        let x = names(&interner, "x");
        let root = ScopeRef::new_root();
        root.declare(x, Value::Number(1.0));
        let inner = root.child();
        assert!(inner.set(x, Value::Number(2.0)));
        assert_eq!(root.get(x), Some(Value::Number(2.0)));
    }

    #[test]
    fn set_fails_on_undeclared_names() {
        let interner = StringInterner::new();
        let x = names(&interner, "x");
        let scope = ScopeRef::new_root();
        assert!(!scope.set(x, Value::None));
    }

    #[test]
    fn declare_shadows_without_touching_outer() {
        let interner = StringInterner::new();
        let x = names(&interner, "x");
        let root = ScopeRef::new_root();
        root.declare(x, Value::Number(1.0));
        let inner = root.child();
        inner.declare(x, Value::Number(9.0));
        assert_eq!(inner.get(x), Some(Value::Number(9.0)));
        assert_eq!(root.get(x), Some(Value::Number(1.0)));

        // Assignment in the inner scope now hits the shadow.
        assert!(inner.set(x, Value::Number(10.0)));
        assert_eq!(root.get(x), Some(Value::Number(1.0)));
    }

    #[test]
    fn sibling_scopes_are_independent() {
        let interner = StringInterner::new();
        let x = names(&interner, "x");
        let root = ScopeRef::new_root();
        let a = root.child();
        let b = root.child();
        a.declare(x, Value::Number(1.0));
        assert_eq!(b.get(x), None);
    }
}

//! Per-kind method tables.
//!
//! Attribute lookup is a capability table keyed by (kind, method name) with
//! one generic fallback table shared by every kind. Tables are built once per
//! interpreter; method names are interned up front so each lookup is an
//! integer-keyed map hit.

use rill_ir::{Name, StringInterner};
use rustc_hash::FxHashMap;

use crate::builtins;
use crate::value::BuiltinDef;

pub(crate) struct MethodTables {
    by_kind: FxHashMap<(&'static str, Name), &'static BuiltinDef>,
    fallback: FxHashMap<Name, &'static BuiltinDef>,
}

impl MethodTables {
    pub(crate) fn new(interner: &StringInterner) -> Self {
        let mut by_kind: FxHashMap<(&'static str, Name), &'static BuiltinDef> =
            FxHashMap::default();
        let mut fallback: FxHashMap<Name, &'static BuiltinDef> = FxHashMap::default();

        let list_methods: &[&'static BuiltinDef] = &[
            &builtins::PUSH,
            &builtins::SIZE,
            &builtins::GET_ITEM,
            &builtins::SET_ITEM,
            &builtins::SLICE,
            &builtins::METHOD_MAP,
            &builtins::METHOD_EACH,
            &builtins::METHOD_FOLD,
            &builtins::METHOD_REDUCE,
        ];
        for &def in list_methods {
            by_kind.insert(("list", interner.intern(def.name)), def);
        }

        let string_methods: &[&'static BuiltinDef] = &[
            &builtins::SIZE,
            &builtins::STRIP,
            &builtins::SPLIT_WORDS,
            &builtins::SPLIT_LINES,
            &builtins::SLICE,
            &builtins::GET_ITEM,
            &builtins::INT,
            &builtins::FLOAT,
        ];
        for &def in string_methods {
            by_kind.insert(("string", interner.intern(def.name)), def);
        }

        let number_methods: &[&'static BuiltinDef] =
            &[&builtins::INT, &builtins::FLOAT, &builtins::NEGATE];
        for &def in number_methods {
            by_kind.insert(("number", interner.intern(def.name)), def);
        }

        // Universal methods, available on every kind.
        let universal: &[&'static BuiltinDef] = &[
            &builtins::STRING,
            &builtins::INSPECT,
            &builtins::BOOL,
            &builtins::PRINT,
            &builtins::EQUAL,
            &builtins::IS,
        ];
        for &def in universal {
            fallback.insert(interner.intern(def.name), def);
        }

        MethodTables { by_kind, fallback }
    }

    /// Look up a method for a value kind: the kind's own table first, then
    /// the shared fallback table.
    pub(crate) fn lookup(
        &self,
        kind: &'static str,
        name: Name,
    ) -> Option<&'static BuiltinDef> {
        self.by_kind
            .get(&(kind, name))
            .copied()
            .or_else(|| self.fallback.get(&name).copied())
    }
}

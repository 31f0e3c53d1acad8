use std::collections::{BTreeMap, BTreeSet, HashSet};

use proptest::collection::{btree_map, btree_set, vec};
use proptest::prelude::*;
use proptest::string::string_regex;
use repr_core::dynamic::{DynObject, TypeDef, TypeRegistry};
use repr_core::{FalsyPolicy, enumerate, fields, repr};

#[derive(Debug, Clone)]
struct Scenario {
    base_slots: Vec<String>,
    derived_slots: Vec<String>,
    with_dict: bool,
    dict: BTreeMap<String, i64>,
    bound: Vec<bool>,
}

impl Scenario {
    fn is_slot(&self, name: &str) -> bool {
        self.base_slots.iter().chain(&self.derived_slots).any(|slot| slot == name)
    }

    fn build(&self) -> DynObject {
        let mut registry = TypeRegistry::new();
        let base = registry
            .define(TypeDef::new("Base").slots(self.base_slots.clone()))
            .unwrap();
        let mut derived = TypeDef::new("Derived")
            .extends(base)
            .slots(self.derived_slots.clone())
            .method("run");
        if self.with_dict {
            derived = derived.with_dict();
        }
        let derived = registry.define(derived).unwrap();

        let mut obj = registry.instantiate(derived).unwrap();
        let slots = self.base_slots.iter().chain(&self.derived_slots);
        for ((slot, bound), value) in slots.zip(&self.bound).zip(1_i64..) {
            if *bound {
                obj.set(slot, value).unwrap();
            }
        }
        if self.with_dict {
            for (key, value) in &self.dict {
                if !self.is_slot(key) {
                    obj.set(key, *value).unwrap();
                }
            }
        }
        obj
    }
}

fn arb_name() -> impl Strategy<Value = String> {
    string_regex("_?[a-f]").expect("valid regex")
}

fn arb_slots() -> impl Strategy<Value = Vec<String>> {
    btree_set(arb_name(), 0..5).prop_map(|names: BTreeSet<String>| names.into_iter().collect())
}

fn arb_scenario() -> impl Strategy<Value = Scenario> {
    (
        arb_slots(),
        arb_slots(),
        any::<bool>(),
        btree_map(string_regex("_?[a-h]{1,2}").expect("valid regex"), -5_i64..5, 0..6),
        vec(any::<bool>(), 10),
    )
        .prop_map(|(base_slots, derived_slots, with_dict, dict, bound)| Scenario {
            base_slots,
            derived_slots,
            with_dict,
            dict,
            bound,
        })
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    #[test]
    fn rendering_is_idempotent(scenario in arb_scenario()) {
        let obj = scenario.build();
        prop_assert_eq!(repr(&obj).unwrap(), repr(&obj).unwrap());
        prop_assert_eq!(repr(&obj).unwrap(), format!("{obj:?}"));
    }

    #[test]
    fn names_are_unique_and_public(scenario in arb_scenario()) {
        let obj = scenario.build();
        let names = enumerate(&obj);
        let unique: HashSet<&str> = names.iter().copied().collect();
        prop_assert_eq!(unique.len(), names.len());
        prop_assert!(names.iter().all(|name| !name.starts_with('_')));
    }

    #[test]
    fn callables_never_rendered(scenario in arb_scenario()) {
        let obj = scenario.build();
        let rendered = fields(&obj, FalsyPolicy::Keep);
        prop_assert!(rendered.iter().all(|(name, _)| *name != "run"));
    }

    #[test]
    fn store_keys_sorted_then_base_then_derived(scenario in arb_scenario()) {
        let obj = scenario.build();
        let names: Vec<&str> = fields(&obj, FalsyPolicy::Keep)
            .into_iter()
            .map(|(name, _)| name)
            .collect();

        // 0: store key, 1: base cell, 2: derived-only cell.
        let rank = |name: &str| {
            if !scenario.is_slot(name) {
                0
            } else if scenario.base_slots.iter().any(|slot| slot == name) {
                1
            } else {
                2
            }
        };
        let ranks: Vec<u8> = names.iter().map(|name| rank(name)).collect();
        prop_assert!(ranks.windows(2).all(|pair| pair[0] <= pair[1]));

        let store: Vec<&str> = names.iter().copied().filter(|name| rank(name) == 0).collect();
        let mut sorted = store.clone();
        sorted.sort_unstable();
        prop_assert_eq!(store, sorted);
    }

    #[test]
    fn empty_when_nothing_bound(scenario in arb_scenario()) {
        let obj = scenario.build();
        if fields(&obj, FalsyPolicy::Keep).is_empty() {
            prop_assert_eq!(repr(&obj).unwrap(), "Derived()");
        } else {
            let rendered = repr(&obj).unwrap();
            prop_assert!(rendered.starts_with("Derived(") && rendered.ends_with(')'));
            prop_assert!(!rendered.contains('\n'));
        }
    }
}

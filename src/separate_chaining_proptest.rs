#![cfg(test)]

// Property tests for SeparateChainingMap with access to the chains.

use crate::key_hash::{CharSum, KeyHasher};
use crate::separate_chaining::SeparateChainingMap;
use crate::prime::is_prime;
use hashbrown::HashMap;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::BTreeSet;

#[derive(Clone, Debug)]
enum OpI {
    Put(usize, i32),
    Remove(usize),
    Get(usize),
    Resize(usize),
    Clear,
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=24).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            6 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Put(i, v)),
            3 => idx.clone().prop_map(OpI::Remove),
            2 => idx.clone().prop_map(OpI::Get),
            1 => (0usize..48).prop_map(OpI::Resize),
            1 => Just(OpI::Clear),
            1 => Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Every node sits in the bucket its hash selects, keys are unique, and
// `len` is the sum of chain lengths.
fn check_structure<S: KeyHasher>(sut: &SeparateChainingMap<i32, S>) -> Result<(), TestCaseError> {
    prop_assert!(is_prime(sut.capacity()));
    let cap = sut.capacity() as u64;
    let mut seen = BTreeSet::new();
    let mut total = 0;
    for (i, chain) in sut.buckets.iter().enumerate() {
        total += chain.nodes.len();
        for n in &chain.nodes {
            prop_assert_eq!((sut.hasher().hash_key(&n.key) % cap) as usize, i);
            prop_assert!(seen.insert(n.key.clone()), "duplicate key {:?}", n.key);
        }
    }
    prop_assert_eq!(total, sut.len());
    Ok(())
}

fn run_state_machine<S: KeyHasher>(
    hasher: S,
    pool: Vec<String>,
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut sut: SeparateChainingMap<i32, S> =
        SeparateChainingMap::with_capacity_and_hasher(3, hasher).expect("valid capacity");
    let mut model: HashMap<String, i32> = HashMap::new();

    for op in ops {
        match op {
            OpI::Put(i, v) => {
                let k = &pool[i];
                prop_assert_eq!(sut.put(k.clone(), v), model.insert(k.clone(), v));
                prop_assert!(sut.len() <= sut.capacity());
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.remove(k), model.remove(k));
            }
            OpI::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k), model.get(k));
                prop_assert_eq!(sut.contains_key(k), model.contains_key(k));
            }
            OpI::Resize(c) => {
                let before = sut.capacity();
                sut.resize_table(c);
                if c == 0 {
                    prop_assert_eq!(sut.capacity(), before);
                } else {
                    prop_assert!(sut.capacity() >= c);
                }
            }
            OpI::Clear => {
                let before = sut.capacity();
                sut.clear();
                model.clear();
                prop_assert_eq!(sut.capacity(), before);
                prop_assert_eq!(sut.empty_buckets(), before);
            }
            OpI::Iterate => {
                let s_pairs: BTreeSet<(String, i32)> =
                    sut.iter().map(|(k, v)| (k.to_string(), *v)).collect();
                let m_pairs: BTreeSet<(String, i32)> =
                    model.iter().map(|(k, v)| (k.clone(), *v)).collect();
                prop_assert_eq!(s_pairs, m_pairs);
            }
        }

        check_structure(&sut)?;
        prop_assert_eq!(sut.len(), model.len());
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_state_machine(CharSum, pool, ops)?;
    }

    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run_state_machine(|_: &str| 0u64, pool, ops)?;
    }
}

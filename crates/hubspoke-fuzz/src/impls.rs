//! `Fuzz` implementations for standard library types
//!
//! Copyright (c) 2025 Hubspoke Team
//! Licensed under the Apache-2.0 license

use crate::error::{GenerationError, Result};
use crate::fuzzer::Fuzzer;
use crate::Fuzz;
use rand::Rng;
use std::any::type_name;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::hash::Hash;

const FLOAT_RANGE: f64 = 1.0e6;

macro_rules! fuzz_standard {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Fuzz for $ty {
                fn fuzz_no_custom(f: &mut Fuzzer<'_>) -> Result<Self> {
                    Ok(f.rng().gen())
                }
            }
        )*
    };
}

fuzz_standard!(bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

// Floats stay finite so structural equality stays reflexive
impl Fuzz for f64 {
    fn fuzz_no_custom(f: &mut Fuzzer<'_>) -> Result<Self> {
        Ok(f.rng().gen_range(-FLOAT_RANGE..FLOAT_RANGE))
    }
}

impl Fuzz for f32 {
    fn fuzz_no_custom(f: &mut Fuzzer<'_>) -> Result<Self> {
        Ok(f.rng().gen_range(-FLOAT_RANGE as f32..FLOAT_RANGE as f32))
    }
}

impl Fuzz for String {
    fn fuzz_no_custom(f: &mut Fuzzer<'_>) -> Result<Self> {
        Ok(f.string())
    }
}

impl Fuzz for () {
    fn fuzz_no_custom(_: &mut Fuzzer<'_>) -> Result<Self> {
        Ok(())
    }
}

impl<T: Fuzz> Fuzz for Option<T> {
    fn fuzz_no_custom(f: &mut Fuzzer<'_>) -> Result<Self> {
        if f.at_depth_limit() || f.should_be_none() {
            return Ok(None);
        }
        f.generate().map(Some)
    }
}

impl<T: Fuzz> Fuzz for Box<T> {
    fn fuzz_no_custom(f: &mut Fuzzer<'_>) -> Result<Self> {
        if f.past_depth_ceiling() {
            return Err(GenerationError::DepthExceeded {
                type_name: type_name::<T>(),
                max_depth: f.config().max_depth,
            });
        }
        f.generate().map(Box::new)
    }
}

impl<T: Fuzz> Fuzz for Vec<T> {
    fn fuzz_no_custom(f: &mut Fuzzer<'_>) -> Result<Self> {
        if f.at_depth_limit() {
            return Ok(Vec::new());
        }
        let len = f.element_count();
        (0..len).map(|_| f.generate()).collect()
    }
}

impl<T: Fuzz + Ord> Fuzz for BTreeSet<T> {
    fn fuzz_no_custom(f: &mut Fuzzer<'_>) -> Result<Self> {
        if f.at_depth_limit() {
            return Ok(BTreeSet::new());
        }
        let len = f.element_count();
        (0..len).map(|_| f.generate()).collect()
    }
}

impl<K: Fuzz + Ord, V: Fuzz> Fuzz for BTreeMap<K, V> {
    fn fuzz_no_custom(f: &mut Fuzzer<'_>) -> Result<Self> {
        if f.at_depth_limit() {
            return Ok(BTreeMap::new());
        }
        let len = f.element_count();
        (0..len)
            .map(|_| -> Result<(K, V)> { Ok((f.generate()?, f.generate()?)) })
            .collect()
    }
}

impl<K: Fuzz + Eq + Hash, V: Fuzz> Fuzz for HashMap<K, V> {
    fn fuzz_no_custom(f: &mut Fuzzer<'_>) -> Result<Self> {
        if f.at_depth_limit() {
            return Ok(HashMap::new());
        }
        let len = f.element_count();
        (0..len)
            .map(|_| -> Result<(K, V)> { Ok((f.generate()?, f.generate()?)) })
            .collect()
    }
}

macro_rules! fuzz_tuple {
    ($($name:ident),+) => {
        impl<$($name: Fuzz),+> Fuzz for ($($name,)+) {
            fn fuzz_no_custom(f: &mut Fuzzer<'_>) -> Result<Self> {
                Ok(($(f.generate::<$name>()?,)+))
            }
        }
    };
}

fuzz_tuple!(A);
fuzz_tuple!(A, B);
fuzz_tuple!(A, B, C);
fuzz_tuple!(A, B, C, D);

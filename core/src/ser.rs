//! A small serialization helper shared by the analyzer and generator
//! output types.
//!
//! `SPEC_FULL.md` §6 stipulates that sets are emitted as lexicographically
//! sorted sequences for deterministic interop output; `HashSet` iteration
//! order is not stable across runs, so every `HashSet<String>` field that
//! is part of a result type routes through this.

use std::collections::HashSet;

use serde::{Serialize, Serializer};

pub(crate) fn sorted_string_set<S>(set: &HashSet<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut sorted: Vec<&str> = set.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    sorted.serialize(serializer)
}

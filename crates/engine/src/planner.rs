// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Dependency Planner (spec.md §4.3): expands a requested scanner set to
//! its transitive closure and orders it into waves via Kahn's algorithm, so
//! the Run Scheduler can execute each wave with bounded parallelism while
//! every scanner's dependencies have already reached a terminal state.
//!
//! Waves are deterministic: ties within a wave break alphabetically (spec.md
//! §8 property 4 — `Plan` is a pure function of the registered graph and the
//! requested set).

use std::collections::{BTreeMap, BTreeSet};

use zero_core::ScannerName;

use crate::error::EngineError;
use crate::registry::FrozenRegistry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub waves: Vec<Vec<ScannerName>>,
}

impl Plan {
    pub fn all_scanners(&self) -> impl Iterator<Item = &ScannerName> {
        self.waves.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.all_scanners().count()
    }

    pub fn is_empty(&self) -> bool {
        self.waves.is_empty()
    }
}

/// Build a [`Plan`] covering `requested` plus every scanner it transitively
/// depends on.
pub fn plan(registry: &FrozenRegistry, requested: &BTreeSet<ScannerName>) -> Result<Plan, EngineError> {
    let closure = transitive_closure(registry, requested);

    let mut indegree: BTreeMap<ScannerName, usize> = closure.iter().map(|n| (n.clone(), 0)).collect();
    let mut dependents: BTreeMap<ScannerName, Vec<ScannerName>> =
        closure.iter().map(|n| (n.clone(), Vec::new())).collect();

    // Allow expect here: closure members come from the frozen registry's own
    // dependency edges, and indegree/dependents were seeded for every one.
    #[allow(clippy::expect_used)]
    for name in &closure {
        let scanner = registry.get(name).expect("closure member is registered");
        for dep in scanner.dependencies() {
            *indegree.get_mut(name).expect("indegree seeded for every closure member") += 1;
            dependents
                .get_mut(&dep)
                .expect("dependents seeded for every closure member")
                .push(name.clone());
        }
    }

    let mut remaining = indegree;
    let mut waves = Vec::new();
    while !remaining.is_empty() {
        let mut ready: Vec<ScannerName> =
            remaining.iter().filter(|(_, &degree)| degree == 0).map(|(name, _)| name.clone()).collect();
        if ready.is_empty() {
            // Unreachable once the registry has been frozen (freeze already
            // rejects cycles), kept as a defensive bound in case a future
            // caller plans against an unfrozen graph.
            #[allow(clippy::expect_used)]
            let stuck = remaining.keys().next().expect("remaining is non-empty").clone();
            return Err(EngineError::DependencyCycle(stuck.to_string()));
        }
        ready.sort();
        for name in &ready {
            remaining.remove(name);
        }
        for name in &ready {
            for dependent in &dependents[name] {
                if let Some(degree) = remaining.get_mut(dependent) {
                    *degree -= 1;
                }
            }
        }
        waves.push(ready);
    }

    Ok(Plan { waves })
}

fn transitive_closure(registry: &FrozenRegistry, requested: &BTreeSet<ScannerName>) -> BTreeSet<ScannerName> {
    let mut closure = BTreeSet::new();
    let mut stack: Vec<ScannerName> = requested.iter().cloned().collect();
    while let Some(name) = stack.pop() {
        if !closure.insert(name.clone()) {
            continue;
        }
        if let Some(scanner) = registry.get(&name) {
            stack.extend(scanner.dependencies());
        }
    }
    closure
}

#[cfg(test)]
#[path = "planner_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Scanner Registry (spec.md §4.1): a process-lifetime, write-once
//! catalog of scanner collaborators.
//!
//! Registration happens once at startup; [`ScannerRegistry::freeze`] checks
//! the whole dependency graph for dangling references and cycles and
//! returns a [`FrozenRegistry`] that the planner and scheduler consume for
//! the rest of the process's life (spec.md §9: "global mutable state frozen
//! at startup").

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use zero_core::ScannerName;
use zero_scanners::ScannerDescriptor;

use crate::error::EngineError;

#[derive(Default)]
pub struct ScannerRegistry {
    scanners: BTreeMap<ScannerName, Arc<dyn ScannerDescriptor>>,
}

impl ScannerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, scanner: Arc<dyn ScannerDescriptor>) -> Result<(), EngineError> {
        let name = scanner.name();
        if self.scanners.contains_key(&name) {
            return Err(EngineError::DuplicateScanner(name.to_string()));
        }
        self.scanners.insert(name, scanner);
        Ok(())
    }

    /// Validate the graph — every dependency resolves, no cycles — and
    /// return a [`FrozenRegistry`]. The registry is consumed: there is no
    /// way back to a mutable `ScannerRegistry` once frozen.
    pub fn freeze(self) -> Result<FrozenRegistry, EngineError> {
        for (name, scanner) in &self.scanners {
            for dep in scanner.dependencies() {
                if !self.scanners.contains_key(&dep) {
                    return Err(EngineError::DanglingDependency {
                        scanner: name.to_string(),
                        dependency: dep.to_string(),
                    });
                }
            }
        }
        detect_cycle(&self.scanners)?;
        Ok(FrozenRegistry { scanners: self.scanners })
    }
}

fn detect_cycle(scanners: &BTreeMap<ScannerName, Arc<dyn ScannerDescriptor>>) -> Result<(), EngineError> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Visiting,
        Done,
    }
    let mut marks: BTreeMap<ScannerName, Mark> = BTreeMap::new();

    fn visit(
        name: &ScannerName,
        scanners: &BTreeMap<ScannerName, Arc<dyn ScannerDescriptor>>,
        marks: &mut BTreeMap<ScannerName, Mark>,
    ) -> Result<(), EngineError> {
        match marks.get(name) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::Visiting) => return Err(EngineError::DependencyCycle(name.to_string())),
            None => {}
        }
        marks.insert(name.clone(), Mark::Visiting);
        if let Some(scanner) = scanners.get(name) {
            for dep in scanner.dependencies() {
                visit(&dep, scanners, marks)?;
            }
        }
        marks.insert(name.clone(), Mark::Done);
        Ok(())
    }

    for name in scanners.keys() {
        visit(name, scanners, &mut marks)?;
    }
    Ok(())
}

/// The immutable, validated scanner catalog consumed by the planner and
/// scheduler.
pub struct FrozenRegistry {
    scanners: BTreeMap<ScannerName, Arc<dyn ScannerDescriptor>>,
}

impl FrozenRegistry {
    pub fn get(&self, name: &ScannerName) -> Option<&Arc<dyn ScannerDescriptor>> {
        self.scanners.get(name)
    }

    pub fn contains(&self, name: &ScannerName) -> bool {
        self.scanners.contains_key(name)
    }

    /// Every registered name, alphabetical (spec.md §4.1: `List()`).
    pub fn names(&self) -> impl Iterator<Item = &ScannerName> {
        self.scanners.keys()
    }

    /// Every registered name paired with its descriptor, alphabetical — for
    /// `List()` callers that want more than the name.
    pub fn entries(&self) -> impl Iterator<Item = (&ScannerName, &Arc<dyn ScannerDescriptor>)> {
        self.scanners.iter()
    }

    pub fn known_names(&self) -> BTreeSet<ScannerName> {
        self.scanners.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.scanners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scanners.is_empty()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;

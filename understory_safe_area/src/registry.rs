// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An explicit registry of safe-area elements.
//!
//! The application's composition root owns one of these, inserts its elements
//! at construction time and ticks them together against shared collaborators.

use core::time::Duration;

use hashbrown::HashMap;

use crate::provider::{ContainerProvider, InsetProvider};
use crate::safe_area::{SafeArea, TickOutcome};

/// Handle to an element in a [`SafeAreaRegistry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SafeAreaId(u64);

impl SafeAreaId {
    /// Raw value of the handle.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Owns a set of [`SafeArea`] elements keyed by [`SafeAreaId`].
///
/// Ids are never reused within one registry.
#[derive(Clone, Debug, Default)]
pub struct SafeAreaRegistry {
    areas: HashMap<SafeAreaId, SafeArea>,
    next_id: u64,
}

impl SafeAreaRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an element and returns its handle.
    pub fn insert(&mut self, area: SafeArea) -> SafeAreaId {
        let id = SafeAreaId(self.next_id);
        self.next_id += 1;
        self.areas.insert(id, area);
        id
    }

    /// Removes an element.
    pub fn remove(&mut self, id: SafeAreaId) -> Option<SafeArea> {
        self.areas.remove(&id)
    }

    /// Returns the element for `id`.
    #[must_use]
    pub fn get(&self, id: SafeAreaId) -> Option<&SafeArea> {
        self.areas.get(&id)
    }

    /// Returns the element for `id` mutably.
    pub fn get_mut(&mut self, id: SafeAreaId) -> Option<&mut SafeArea> {
        self.areas.get_mut(&id)
    }

    /// Number of registered elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// Iterates over every element in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (SafeAreaId, &SafeArea)> {
        self.areas.iter().map(|(id, area)| (*id, area))
    }

    /// Ticks every element against the same collaborators.
    ///
    /// Returns how many elements changed their target this tick.
    pub fn tick_all(
        &mut self,
        insets: &dyn InsetProvider,
        container: &dyn ContainerProvider,
        dt: Duration,
    ) -> usize {
        let mut changed = 0;
        for area in self.areas.values_mut() {
            let outcome = area.tick(insets, container, dt);
            if !matches!(outcome, TickOutcome::Skipped(_)) && area.has_changed_since_last_tick() {
                changed += 1;
            }
        }
        changed
    }
}

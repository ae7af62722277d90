//! Binding registry: logical buffer names to slots and expected sizes
//!
//! A lightweight size-only safety net for blocks whose declaration text
//! is unavailable, and the single place binding indices are assigned so
//! no magic numbers leak into call sites. Entries are registered once at
//! startup through `&mut`, then the registry is shared immutably; the
//! borrow checker enforces the freeze.

use log::info;

use crate::core::error::Error;
use crate::core::types::Result;

/// Conventional binding index ranges
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BindingClass {
    /// 0-9: engine-level blocks, always available
    Base,
    /// 10-19: pass and post-processing blocks
    Pass,
    /// 20-29: per-effect configuration, rarely updated
    EffectConfig,
    /// 30-39: per-effect runtime state, updated per frame
    EffectRuntime,
}

impl BindingClass {
    /// Class owning `slot`, or None outside the conventional ranges
    pub fn of(slot: u32) -> Option<BindingClass> {
        match slot {
            0..=9 => Some(BindingClass::Base),
            10..=19 => Some(BindingClass::Pass),
            20..=29 => Some(BindingClass::EffectConfig),
            30..=39 => Some(BindingClass::EffectRuntime),
            _ => None,
        }
    }

    /// Slot range owned by this class
    pub fn range(&self) -> std::ops::RangeInclusive<u32> {
        match self {
            BindingClass::Base => 0..=9,
            BindingClass::Pass => 10..=19,
            BindingClass::EffectConfig => 20..=29,
            BindingClass::EffectRuntime => 30..=39,
        }
    }
}

/// One registered binding: logical name, slot index, expected byte size
#[derive(Clone, Debug)]
pub struct BindingEntry {
    pub name: &'static str,
    pub slot: u32,
    pub expected_size: usize,
}

/// Flat table of binding entries, immutable after startup
#[derive(Debug, Default)]
pub struct BindingRegistry {
    entries: Vec<BindingEntry>,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a binding. Errors on a duplicate name or slot.
    pub fn register(&mut self, name: &'static str, slot: u32, expected_size: usize) -> Result<()> {
        if self.entries.iter().any(|e| e.name == name) {
            return Err(Error::Binding(format!("binding '{name}' already registered")));
        }
        if let Some(taken) = self.entries.iter().find(|e| e.slot == slot) {
            return Err(Error::Binding(format!(
                "slot {slot} already taken by '{}'",
                taken.name
            )));
        }
        info!("registered binding '{name}': slot={slot}, size={expected_size} bytes");
        self.entries.push(BindingEntry {
            name,
            slot,
            expected_size,
        });
        Ok(())
    }

    /// Check a calculated size against the registered expectation.
    ///
    /// A disagreement means the consuming shader would read garbage past
    /// the buffer end, so this errors immediately rather than warning.
    pub fn check(&self, name: &str, calculated_size: usize) -> Result<()> {
        let entry = self
            .get(name)
            .ok_or_else(|| Error::Binding(format!("unknown binding '{name}'")))?;
        if calculated_size != entry.expected_size {
            return Err(Error::SizeMismatch {
                name: name.to_string(),
                calculated: calculated_size,
                expected: entry.expected_size,
            });
        }
        Ok(())
    }

    /// Look up an entry by logical name
    pub fn get(&self, name: &str) -> Option<&BindingEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in registration order
    pub fn iter(&self) -> impl Iterator<Item = &BindingEntry> {
        self.entries.iter()
    }
}

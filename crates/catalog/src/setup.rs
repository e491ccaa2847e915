//! Data patches: install and revert batches of attribute declarations.
//!
//! The host's EAV setup is abstracted behind [`AttributeInstaller`]. A
//! [`DataPatch`] is a named batch of declarations with optional dependencies on
//! other patches; [`PatchRunner`] applies registered patches in dependency order
//! exactly once and reverts them in reverse.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shopattr_core::{AttributeCode, DomainError, DomainResult, Entity};

use crate::schema::{self, AttributeDefinition};

pub const PRODUCT_ATTRIBUTES_PATCH: &str = "add_product_attributes";
pub const MODULE_ATTRIBUTES_PATCH: &str = "add_module_attributes";

/// Seam to the host catalog's attribute setup.
pub trait AttributeInstaller {
    /// Register a new attribute. Registering an existing code is a `Conflict`.
    fn add_attribute(&mut self, definition: &AttributeDefinition) -> DomainResult<()>;

    /// Drop an attribute. Dropping an unknown code is a no-op.
    fn remove_attribute(&mut self, code: &AttributeCode) -> DomainResult<()>;

    fn has_attribute(&self, code: &AttributeCode) -> bool;
}

/// In-memory attribute registry.
///
/// Intended for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryAttributeStore {
    attributes: BTreeMap<AttributeCode, AttributeDefinition>,
}

impl InMemoryAttributeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, code: &str) -> Option<&AttributeDefinition> {
        self.attributes.iter().find(|(c, _)| c.as_str() == code).map(|(_, d)| d)
    }

    pub fn codes(&self) -> impl Iterator<Item = &AttributeCode> {
        self.attributes.keys()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl AttributeInstaller for InMemoryAttributeStore {
    fn add_attribute(&mut self, definition: &AttributeDefinition) -> DomainResult<()> {
        let code = definition.id();
        if self.attributes.contains_key(code) {
            return Err(DomainError::conflict(format!("attribute {code} already exists")));
        }
        self.attributes.insert(code.clone(), definition.clone());
        Ok(())
    }

    fn remove_attribute(&mut self, code: &AttributeCode) -> DomainResult<()> {
        self.attributes.remove(code);
        Ok(())
    }

    fn has_attribute(&self, code: &AttributeCode) -> bool {
        self.attributes.contains_key(code)
    }
}

/// Named batch of attribute declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPatch {
    name: String,
    dependencies: Vec<String>,
    definitions: Vec<AttributeDefinition>,
    replace_existing: bool,
}

impl DataPatch {
    /// Build a patch; every declaration must validate and codes must be unique.
    pub fn new(name: impl Into<String>, definitions: Vec<AttributeDefinition>) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("patch name cannot be empty"));
        }

        let mut seen = HashSet::new();
        for def in &definitions {
            def.validate()?;
            if !seen.insert(def.code()) {
                return Err(DomainError::validation(format!(
                    "patch {name} declares {} twice",
                    def.code()
                )));
            }
        }

        Ok(Self {
            name,
            dependencies: Vec::new(),
            definitions,
            replace_existing: false,
        })
    }

    /// Require `patch` to be applied before this one.
    pub fn depends_on(mut self, patch: impl Into<String>) -> Self {
        self.dependencies.push(patch.into());
        self
    }

    /// Drop any existing attribute with the same code before adding.
    pub fn replacing_existing(mut self) -> Self {
        self.replace_existing = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    pub fn definitions(&self) -> &[AttributeDefinition] {
        &self.definitions
    }

    /// Status, custom value and Google Shopping attributes (replace semantics).
    pub fn product_attributes() -> DomainResult<Self> {
        Ok(Self::new(PRODUCT_ATTRIBUTES_PATCH, schema::product_attributes()?)?.replacing_existing())
    }

    /// Store-specific attributes; installs after [`Self::product_attributes`].
    pub fn module_attributes() -> DomainResult<Self> {
        Ok(Self::new(MODULE_ATTRIBUTES_PATCH, schema::module_attributes()?)?.depends_on(PRODUCT_ATTRIBUTES_PATCH))
    }

    pub fn apply<I: AttributeInstaller + ?Sized>(&self, installer: &mut I) -> DomainResult<()> {
        for def in &self.definitions {
            if self.replace_existing {
                installer.remove_attribute(def.code())?;
            }
            installer.add_attribute(def)?;
        }
        Ok(())
    }

    pub fn revert<I: AttributeInstaller + ?Sized>(&self, installer: &mut I) -> DomainResult<()> {
        for def in &self.definitions {
            installer.remove_attribute(def.code())?;
        }
        Ok(())
    }
}

/// Record of a patch that has been applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedPatch {
    pub name: String,
    pub applied_at: DateTime<Utc>,
}

/// Applies registered patches once each, dependencies first.
#[derive(Debug, Default)]
pub struct PatchRunner {
    patches: Vec<DataPatch>,
    applied: Vec<AppliedPatch>,
}

impl PatchRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runner preloaded with the product and module attribute patches.
    pub fn with_default_patches() -> DomainResult<Self> {
        let mut runner = Self::new();
        runner.register(DataPatch::product_attributes()?)?;
        runner.register(DataPatch::module_attributes()?)?;
        Ok(runner)
    }

    /// Resume from a previously persisted ledger.
    pub fn with_history(mut self, applied: Vec<AppliedPatch>) -> Self {
        self.applied = applied;
        self
    }

    pub fn register(&mut self, patch: DataPatch) -> DomainResult<()> {
        if self.patches.iter().any(|p| p.name == patch.name) {
            return Err(DomainError::conflict(format!("patch {} already registered", patch.name)));
        }
        self.patches.push(patch);
        Ok(())
    }

    pub fn applied(&self) -> &[AppliedPatch] {
        &self.applied
    }

    pub fn is_applied(&self, name: &str) -> bool {
        self.applied.iter().any(|a| a.name == name)
    }

    /// Apply every pending patch; returns the names applied by this call.
    ///
    /// Stops at the first failing patch. Patches applied before the failure stay
    /// recorded.
    pub fn apply_all<I: AttributeInstaller + ?Sized>(
        &mut self,
        installer: &mut I,
        applied_at: DateTime<Utc>,
    ) -> DomainResult<Vec<String>> {
        let order = self.resolve_order()?;
        let mut newly_applied = Vec::new();

        for idx in order {
            let patch = &self.patches[idx];
            if self.is_applied(&patch.name) {
                tracing::debug!(patch = %patch.name, "skipping already applied patch");
                continue;
            }

            patch.apply(installer)?;
            tracing::info!(
                patch = %patch.name,
                attributes = patch.definitions.len(),
                "applied data patch"
            );

            newly_applied.push(patch.name.clone());
            self.applied.push(AppliedPatch {
                name: patch.name.clone(),
                applied_at,
            });
        }

        Ok(newly_applied)
    }

    /// Revert one applied patch. Fails with `Conflict` while a dependent is applied.
    pub fn revert<I: AttributeInstaller + ?Sized>(&mut self, installer: &mut I, name: &str) -> DomainResult<()> {
        if !self.is_applied(name) {
            return Err(DomainError::not_found(format!("applied patch {name}")));
        }

        if let Some(dependent) = self
            .patches
            .iter()
            .find(|p| self.is_applied(&p.name) && p.dependencies.iter().any(|d| d == name))
        {
            return Err(DomainError::conflict(format!(
                "patch {} depends on {name}",
                dependent.name
            )));
        }

        let patch = self
            .patches
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| DomainError::not_found(format!("registered patch {name}")))?;

        patch.revert(installer)?;
        self.applied.retain(|a| a.name != name);
        tracing::info!(patch = %name, "reverted data patch");
        Ok(())
    }

    /// Revert every applied patch, most recent first; returns the names reverted.
    pub fn revert_all<I: AttributeInstaller + ?Sized>(&mut self, installer: &mut I) -> DomainResult<Vec<String>> {
        let names: Vec<String> = self.applied.iter().rev().map(|a| a.name.clone()).collect();
        for name in &names {
            self.revert(installer, name)?;
        }
        Ok(names)
    }

    /// Indices of registered patches, dependencies before dependents.
    ///
    /// Ties keep registration order.
    pub fn resolve_order(&self) -> DomainResult<Vec<usize>> {
        #[derive(Clone, Copy, PartialEq, Eq)]
        enum Mark {
            Unvisited,
            Visiting,
            Done,
        }

        fn visit(
            idx: usize,
            patches: &[DataPatch],
            marks: &mut [Mark],
            order: &mut Vec<usize>,
        ) -> DomainResult<()> {
            match marks[idx] {
                Mark::Done => return Ok(()),
                Mark::Visiting => {
                    return Err(DomainError::invariant(format!(
                        "dependency cycle through patch {}",
                        patches[idx].name
                    )));
                }
                Mark::Unvisited => {}
            }

            marks[idx] = Mark::Visiting;
            for dep in &patches[idx].dependencies {
                let dep_idx = patches.iter().position(|p| &p.name == dep).ok_or_else(|| {
                    DomainError::validation(format!(
                        "patch {} depends on unknown patch {dep}",
                        patches[idx].name
                    ))
                })?;
                visit(dep_idx, patches, marks, order)?;
            }
            marks[idx] = Mark::Done;
            order.push(idx);
            Ok(())
        }

        let mut marks = vec![Mark::Unvisited; self.patches.len()];
        let mut order = Vec::with_capacity(self.patches.len());
        for idx in 0..self.patches.len() {
            visit(idx, &self.patches, &mut marks, &mut order)?;
        }
        Ok(order)
    }
}

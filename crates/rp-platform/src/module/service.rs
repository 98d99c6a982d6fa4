//! Module Service
//!
//! Create / update / delete for the module tree. On top of the shared
//! uniqueness checks it keeps `path` and `level` consistent: re-parenting a
//! module rewrites its whole subtree, and deleting a module removes its
//! descendants in the same commit.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::dto::{CreateModuleRequest, ModuleDto};
use super::entity::Module;
use crate::shared::error::{PlatformError, Result};
use crate::shared::ids::parse_id_list;
use crate::shared::tsid::TsidGenerator;
use crate::store::Filter;
use crate::usecase::{Aggregate, CrudOperations, ExecutionContext, Repository, UnitOfWork};

pub struct ModuleService {
    crud: CrudOperations<Module>,
}

impl ModuleService {
    pub fn new(repository: Arc<dyn Repository<Module>>, unit_of_work: Arc<dyn UnitOfWork>) -> Self {
        Self {
            crud: CrudOperations::new(repository, unit_of_work),
        }
    }

    /// Returns the new module's id.
    pub async fn create(&self, request: Option<CreateModuleRequest>, ctx: &ExecutionContext) -> Result<String> {
        let mut module: Module = request
            .map(Module::from)
            .ok_or_else(|| PlatformError::null_entity(Module::ENTITY_TYPE))?;
        module.validate()?;

        let parent = match module.parent_id.as_deref() {
            Some(parent_id) => Some(self.load_parent(parent_id, &module.application_id).await?),
            None => None,
        };

        module.set_id(TsidGenerator::generate());
        module.place_under(parent.as_ref());

        self.crud.insert(module, ctx).await
    }

    pub async fn update(&self, dto: Option<ModuleDto>, ctx: &ExecutionContext) -> Result<()> {
        let mut module: Module = dto
            .map(Module::from)
            .ok_or_else(|| PlatformError::null_entity(Module::ENTITY_TYPE))?;
        let stored = self.crud.prepare_update(&mut module, ctx).await?;

        if module.application_id != stored.application_id {
            return Err(PlatformError::validation(format!(
                "Module {} cannot move from application {} to {}",
                module.id, stored.application_id, module.application_id
            )));
        }

        let mut subtree = Vec::new();
        if module.parent_id == stored.parent_id {
            module.path = stored.path.clone();
            module.level = stored.level;
        } else {
            let parent = match module.parent_id.as_deref() {
                Some(parent_id) => {
                    let parent = self.load_parent(parent_id, &module.application_id).await?;
                    if parent.id == stored.id || stored.is_ancestor_of(&parent) {
                        return Err(PlatformError::validation(format!(
                            "Module {} cannot be moved under its own subtree ({})",
                            module.id, parent.id
                        )));
                    }
                    Some(parent)
                }
                None => None,
            };
            module.place_under(parent.as_ref());
            subtree = self.rebase_descendants(&stored, &module, ctx).await?;
        }

        let mut tx = self.crud.unit_of_work().begin(ctx);
        self.crud.repository().update(&mut tx, &module)?;
        for descendant in &subtree {
            self.crud.repository().update(&mut tx, descendant)?;
        }
        self.crud.unit_of_work().commit(tx).await?;

        info!(
            entity_type = Module::ENTITY_TYPE,
            id = %module.id,
            moved = subtree.len(),
            principal_id = %ctx.principal_id,
            "Updated"
        );
        Ok(())
    }

    /// `ids` is comma-separated; blank input does nothing. Descendants of
    /// every matched module are removed with it.
    pub async fn delete(&self, ids: &str, ctx: &ExecutionContext) -> Result<()> {
        let ids = parse_id_list(ids);
        if ids.is_empty() {
            debug!(entity_type = Module::ENTITY_TYPE, "Delete called with no ids");
            return Ok(());
        }

        let found = self.crud.repository().find_by_ids(&ids).await?;
        if found.is_empty() {
            debug!(entity_type = Module::ENTITY_TYPE, requested = ids.len(), "Nothing to delete");
            return Ok(());
        }

        let mut doomed: Vec<Module> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let applications: HashSet<&str> = found.iter().map(|m| m.application_id.as_str()).collect();

        for application_id in applications {
            for candidate in self.modules_of(application_id).await? {
                let hit = found
                    .iter()
                    .any(|root| root.id == candidate.id || root.is_ancestor_of(&candidate));
                if hit && seen.insert(candidate.id.clone()) {
                    doomed.push(candidate);
                }
            }
        }

        self.crud.remove_all(&doomed, ctx).await
    }

    pub async fn get(&self, id: &str) -> Result<Option<ModuleDto>> {
        Ok(self.crud.repository().find_by_id(id).await?.map(ModuleDto::from))
    }

    /// Every live module, grouped by application, each tree in depth-first order.
    pub async fn list(&self) -> Result<Vec<ModuleDto>> {
        let mut modules = self.crud.repository().find_all().await?;
        modules.sort_by(|a, b| a.application_id.cmp(&b.application_id));

        let mut out = Vec::with_capacity(modules.len());
        let mut start = 0;
        while start < modules.len() {
            let application_id = modules[start].application_id.clone();
            let end = modules[start..]
                .iter()
                .position(|m| m.application_id != application_id)
                .map(|offset| start + offset)
                .unwrap_or(modules.len());
            out.extend(tree_order(modules[start..end].to_vec()));
            start = end;
        }

        Ok(out.into_iter().map(ModuleDto::from).collect())
    }

    /// One application's modules in depth-first order.
    pub async fn list_by_application(&self, application_id: &str) -> Result<Vec<ModuleDto>> {
        let modules = self.modules_of(application_id).await?;
        Ok(tree_order(modules).into_iter().map(ModuleDto::from).collect())
    }

    async fn modules_of(&self, application_id: &str) -> Result<Vec<Module>> {
        self.crud
            .repository()
            .find_where(Filter::new().eq("applicationId", application_id))
            .await
    }

    async fn load_parent(&self, parent_id: &str, application_id: &str) -> Result<Module> {
        let parent = self
            .crud
            .repository()
            .find_by_id(parent_id)
            .await?
            .ok_or_else(|| PlatformError::validation(format!("Parent module {} does not exist", parent_id)))?;

        if parent.application_id != application_id {
            return Err(PlatformError::validation(format!(
                "Parent module {} belongs to application {}, not {}",
                parent_id, parent.application_id, application_id
            )));
        }
        Ok(parent)
    }

    /// Descendants of `stored` re-rooted under `moved`'s new path.
    async fn rebase_descendants(&self, stored: &Module, moved: &Module, ctx: &ExecutionContext) -> Result<Vec<Module>> {
        let mut rebased = Vec::new();
        for mut descendant in self.modules_of(&stored.application_id).await? {
            if !stored.is_ancestor_of(&descendant) {
                continue;
            }
            let suffix = descendant.path[stored.path.len()..].to_string();
            descendant.path = format!("{}{}", moved.path, suffix);
            descendant.level = descendant.level - stored.level + moved.level;

            let previous = descendant.audit.clone();
            descendant.audit.stamp_modified(&previous, ctx);
            rebased.push(descendant);
        }
        Ok(rebased)
    }
}

/// Depth-first order; siblings by sort id, then name. Modules whose parent is
/// not in the set are treated as roots.
fn tree_order(modules: Vec<Module>) -> Vec<Module> {
    let ids: HashSet<String> = modules.iter().map(|m| m.id.clone()).collect();
    let mut children: HashMap<Option<String>, Vec<Module>> = HashMap::new();
    for module in modules {
        let parent = module.parent_id.clone().filter(|parent| ids.contains(parent));
        children.entry(parent).or_default().push(module);
    }
    for siblings in children.values_mut() {
        siblings.sort_by(|a, b| a.sort_id.cmp(&b.sort_id).then_with(|| a.name.cmp(&b.name)));
        siblings.reverse();
    }

    let mut out = Vec::with_capacity(ids.len());
    let mut stack: Vec<Module> = children.remove(&None).unwrap_or_default();
    while let Some(module) = stack.pop() {
        if let Some(kids) = children.remove(&Some(module.id.clone())) {
            stack.extend(kids);
        }
        out.push(module);
    }

    // Rows whose parent links loop back on themselves never hang off a root.
    let mut stranded: Vec<Module> = children.into_values().flatten().collect();
    if !stranded.is_empty() {
        warn!(count = stranded.len(), "Modules with cyclic parent links listed after the tree");
        stranded.sort_by(|a, b| a.sort_id.cmp(&b.sort_id).then_with(|| a.name.cmp(&b.name)));
        out.extend(stranded);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, parent: Option<&str>, sort_id: i32) -> Module {
        let mut module = Module::new("app", "", id);
        module.id = id.into();
        module.parent_id = parent.map(String::from);
        module.sort_id = sort_id;
        module
    }

    #[test]
    fn test_tree_order_depth_first_by_sort_id() {
        let modules = vec![
            node("B2", Some("B"), 2),
            node("A", None, 1),
            node("B", None, 0),
            node("B1", Some("B"), 1),
            node("A1", Some("A"), 0),
        ];

        let order: Vec<String> = tree_order(modules).into_iter().map(|m| m.id).collect();
        assert_eq!(order, vec!["B", "B1", "B2", "A", "A1"]);
    }

    #[test]
    fn test_tree_order_keeps_cyclic_rows() {
        let modules = vec![
            node("R", None, 0),
            node("X", Some("Y"), 1),
            node("Y", Some("X"), 0),
        ];

        let order: Vec<String> = tree_order(modules).into_iter().map(|m| m.id).collect();
        assert_eq!(order, vec!["R", "Y", "X"]);
    }

    #[test]
    fn test_tree_order_orphans_become_roots() {
        let order: Vec<String> = tree_order(vec![node("X", Some("gone"), 0)])
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(order, vec!["X"]);
    }
}

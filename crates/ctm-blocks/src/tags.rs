use std::collections::{HashMap, HashSet};

use super::types::BlockId;

/// Interned render tag handle. Resolve names once with [`RenderTags::id`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TagId(pub u16);

/// Named sets of blocks used by tag-based model connectors.
#[derive(Default, Clone, Debug)]
pub struct RenderTags {
    names: Vec<String>,
    by_name: HashMap<String, TagId>,
    members: Vec<HashSet<BlockId>>,
}

impl RenderTags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self, name: &str) -> Option<TagId> {
        self.by_name.get(name).copied()
    }

    pub fn name(&self, tag: TagId) -> Option<&str> {
        self.names.get(tag.0 as usize).map(|s| s.as_str())
    }

    /// Returns the id for `name`, creating an empty tag on first use.
    pub fn intern(&mut self, name: &str) -> TagId {
        if let Some(id) = self.id(name) {
            return id;
        }
        let id = TagId(self.names.len() as u16);
        self.names.push(name.to_string());
        self.by_name.insert(name.to_string(), id);
        self.members.push(HashSet::new());
        id
    }

    pub fn insert(&mut self, name: &str, block: BlockId) -> TagId {
        let id = self.intern(name);
        self.members[id.0 as usize].insert(block);
        id
    }

    #[inline]
    pub fn is_in_tag(&self, tag: TagId, block: BlockId) -> bool {
        self.members
            .get(tag.0 as usize)
            .is_some_and(|m| m.contains(&block))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

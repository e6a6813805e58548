//! Solver inputs: flags and barriers

use crate::shared::models::element::{Eid, ElementType, NetworkElementRef, UserIds};

/// Origin or destination marker of a trace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    pub element: NetworkElementRef,
    pub user_ids: UserIds,
    pub label: Option<String>,
}

impl Flag {
    pub fn new(element: NetworkElementRef, user_ids: UserIds) -> Self {
        Self {
            element,
            user_ids,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn element_type(&self) -> ElementType {
        self.element.element_type
    }
}

/// Barriers of one element type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementBarriers {
    /// Element ids resolved by the locator
    ByEid(Vec<Eid>),
    /// Every element owned by the listed features of one class
    ByFeature { class_id: i32, oids: Vec<i32> },
}

impl ElementBarriers {
    pub fn is_empty(&self) -> bool {
        match self {
            ElementBarriers::ByEid(eids) => eids.is_empty(),
            ElementBarriers::ByFeature { oids, .. } => oids.is_empty(),
        }
    }
}

/// Feature selection blocking traversal, by class and object id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSetBarriers {
    pub features: Vec<(i32, i32)>,
}

impl SelectionSetBarriers {
    pub fn add(&mut self, class_id: i32, oid: i32) {
        if !self.features.contains(&(class_id, oid)) {
            self.features.push((class_id, oid));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn contains(&self, class_id: i32, oid: i32) -> bool {
        self.features.contains(&(class_id, oid))
    }
}

impl FromIterator<(i32, i32)> for SelectionSetBarriers {
    fn from_iter<I: IntoIterator<Item = (i32, i32)>>(iter: I) -> Self {
        let mut set = SelectionSetBarriers::default();
        for (class_id, oid) in iter {
            set.add(class_id, oid);
        }
        set
    }
}

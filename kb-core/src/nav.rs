use serde::{Deserialize, Serialize};

use crate::route::{PathError, Target};

/// A top-bar link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavEntry {
    pub label: String,
    pub target: Target,
}

impl NavEntry {
    pub fn new(label: impl Into<String>, target: &str) -> Result<Self, PathError> {
        Ok(Self {
            label: label.into(),
            target: Target::parse(target)?,
        })
    }
}

/// A leaf link inside a [`SidebarGroup`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarItem {
    pub label: String,
    pub target: Target,
}

impl SidebarItem {
    pub fn new(label: impl Into<String>, target: &str) -> Result<Self, PathError> {
        Ok(Self {
            label: label.into(),
            target: Target::parse(target)?,
        })
    }
}

/// A labeled, collapsible cluster of sidebar links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarGroup {
    pub label: String,
    #[serde(rename = "collapsed", default)]
    pub collapsed_by_default: bool,
    #[serde(default)]
    pub items: Vec<SidebarItem>,
}

impl SidebarGroup {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            collapsed_by_default: false,
            items: Vec::new(),
        }
    }

    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed_by_default = collapsed;
        self
    }

    pub fn item(mut self, item: SidebarItem) -> Self {
        self.items.push(item);
        self
    }
}

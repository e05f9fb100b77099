use serde::{Deserialize, Serialize};

use crate::model::ids::{ModuleId, PathId};

/// Curated sequence of modules for a particular study goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPath {
    pub id: PathId,
    pub name: String,
    pub description: String,
    pub estimated_time: String,
    pub modules: Vec<ModuleId>,
    #[serde(default)]
    pub focus_areas: Vec<String>,
}

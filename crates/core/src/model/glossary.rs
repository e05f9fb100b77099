use serde::{Deserialize, Serialize};

use crate::model::ids::{GlossaryTermId, ModuleId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlossaryTerm {
    pub id: GlossaryTermId,
    pub term: String,
    pub definition: String,
    #[serde(default)]
    pub related_modules: Vec<ModuleId>,
}

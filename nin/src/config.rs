use crate::observability::labels::Labels;
use crate::NinValidator;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use serde_with::DefaultOnNull;

/// What to do with year codes whose leading digit has no century in the decoding table.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CenturyPolicy {
    /// Leave the year empty. The identifier can still be valid.
    #[default]
    Undetermined,
    /// Add 1000 to the code, as legacy registry tools do (`504` becomes `1504`).
    LegacyOffset,
}

#[serde_as]
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct NinValidatorConfig {
    #[serde(default)]
    pub century_policy: CenturyPolicy,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub labels: Labels,
}

impl NinValidatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn century_policy(&self, century_policy: CenturyPolicy) -> Self {
        self.mutate_clone(|x| x.century_policy = century_policy)
    }

    pub fn labels(&self, labels: Labels) -> Self {
        self.mutate_clone(|x| x.labels = labels)
    }

    pub fn build(&self) -> NinValidator {
        NinValidator::new(self)
    }

    fn mutate_clone(&self, modify: impl FnOnce(&mut Self)) -> Self {
        let mut clone = self.clone();
        modify(&mut clone);
        clone
    }
}

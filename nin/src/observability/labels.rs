use metrics::{IntoLabels, Label};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Holder of multiple [Label] providing some methods to easily clone and adds new labels in it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Labels(BTreeMap<String, String>);

pub const NO_LABEL: Labels = Labels(BTreeMap::new());

impl Labels {
    pub fn new(labels: &[(impl Into<String> + Clone, impl Into<String> + Clone)]) -> Self {
        Labels(
            labels
                .iter()
                .map(|(key, value)| (key.clone().into(), value.clone().into()))
                .collect(),
        )
    }

    /// Clone the actual [Labels] with additional key-value labels. Keys already present are
    /// overridden by the additional value.
    pub fn clone_with_labels(&self, additional_labels: Labels) -> Labels {
        let mut labels = self.0.clone();
        labels.extend(additional_labels.0);
        Labels(labels)
    }
}

impl IntoLabels for Labels {
    fn into_labels(self) -> Vec<Label> {
        self.0
            .into_iter()
            .map(|(key, value)| Label::new(key, value))
            .collect()
    }
}

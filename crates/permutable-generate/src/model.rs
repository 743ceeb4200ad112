use serde::{Deserialize, Serialize};

/// Options for consuming a permutation sequence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Stop after this many records. The full product is produced when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

impl GenerateOptions {
    /// Number of records a consumer should pull.
    pub fn max_records(&self) -> usize {
        self.limit
            .map(|limit| usize::try_from(limit).unwrap_or(usize::MAX))
            .unwrap_or(usize::MAX)
    }
}

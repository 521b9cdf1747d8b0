use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Two placed buildings whose footprints overlap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overlap {
    /// Instance placed earlier in the layout.
    pub first: Uuid,
    /// Instance placed later in the layout.
    pub second: Uuid,
    pub first_type: String,
    pub second_type: String,
    /// Shared region in grid units: [min_x, min_y, max_x, max_y]
    pub bbox: [f64; 4],
}

impl Overlap {
    pub fn message(&self) -> String {
        format!(
            "{} overlaps {} in [{}, {}] .. [{}, {}]",
            self.first_type, self.second_type, self.bbox[0], self.bbox[1], self.bbox[2], self.bbox[3]
        )
    }

    pub fn involves(&self, id: Uuid) -> bool {
        self.first == id || self.second == id
    }
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Document {
  pub id: String,
  pub title: String,
  pub description: String,
}

impl Document {
  /// Fixed placeholder catalogue served by `GET /documents`.
  pub fn samples() -> Vec<Document> {
    (1..=3)
      .map(|n| Document {
        id: format!("doc{}", n),
        title: format!("Document {}", n),
        description: format!("Sample document {}", n),
      })
      .collect()
  }
}

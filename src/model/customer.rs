//! Customer lookup record

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A customer as read from the store.
///
/// Customers are a read-only lookup list here: they populate the selection
/// control on the invoice forms and the joined listing columns. Mutation of
/// customers is out of scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

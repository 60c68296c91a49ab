//! Doctor Entity

use kernel::id::{DoctorId, UserId};
use serde::Serialize;

/// Default specialty assigned when a doctor row is created by registration
/// rather than by a staff member filling in the form.
pub const DEFAULT_SPECIALTY: &str = "General";

/// Doctor record, as loaded from the `doctors` table
///
/// `user_id` is set only for doctors created by registration; it links the
/// row to the login account and is immutable once written. Doctors added
/// directly by staff have no linked account.
#[derive(Debug, Clone, Serialize)]
pub struct Doctor {
    pub id: DoctorId,
    pub name: String,
    pub specialty: String,
    #[serde(skip)]
    pub user_id: Option<UserId>,
}

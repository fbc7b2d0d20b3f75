//! sea-orm entities for the relations owned by the admin service.

pub mod companies;
pub mod profiles;
pub mod user_permissions;

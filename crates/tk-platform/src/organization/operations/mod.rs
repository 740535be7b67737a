//! Organization use cases

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

pub use create::{CreateOrganization, CreateOrganizationInput};
pub use delete::{DeleteOrganization, DeleteOrganizationInput};
pub use get::{GetOrganization, GetOrganizationInput};
pub use list::{ListOrganizations, ListOrganizationsInput};
pub use update::{UpdateOrganization, UpdateOrganizationInput};

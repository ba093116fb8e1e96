//! # Data Models
//!
//! This module contains all the SeaORM entities used throughout the
//! back-office service.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod floor;
pub mod house;
pub mod house_image;
pub mod house_staff;
pub mod master_request;
pub mod message;
pub mod payment_details;
pub mod permission;
pub mod role;
pub mod role_permission;
pub mod section;
pub mod user;

pub use floor::Entity as Floor;
pub use house::Entity as House;
pub use house_image::Entity as HouseImage;
pub use house_staff::Entity as HouseStaff;
pub use master_request::Entity as MasterRequest;
pub use message::Entity as Message;
pub use payment_details::Entity as PaymentDetails;
pub use permission::Entity as Permission;
pub use role::Entity as Role;
pub use role_permission::Entity as RolePermission;
pub use section::Entity as Section;
pub use user::Entity as User;

/// Basic service information response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    /// The name of the service
    pub service: String,
    /// The version of the service
    pub version: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            service: "backoffice".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

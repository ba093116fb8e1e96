//! Data access layer. Each repository borrows the shared connection and
//! owns the persistence rules for one aggregate.

pub mod house;
pub mod payment_details;
pub mod role;
pub mod user;

pub use house::{HouseDetail, HouseEditorState, HouseRepository, StaffMember};
pub use payment_details::PaymentDetailsRepository;
pub use role::{PermissionMatrix, RoleRepository};
pub use user::{
    hash_password, verify_password, UserGridFilter, UserGridRow, UserRepository,
};

pub mod user;
pub mod address;

pub use user::Entity as User;
pub use address::Entity as Address;

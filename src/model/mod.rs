mod movement;
mod product;
mod role;
mod session;
mod user;

pub use movement::{
    Movement, MovementType, ProductRef, DEFAULT_ACTOR, DEFAULT_PRODUCT_CODE, DEFAULT_PRODUCT_NAME,
};
pub use product::{Category, Product, StockLevel, DEFAULT_CATEGORY};
pub use role::{canonical_role, default_roles, display_name, Role, DEFAULT_ROLES, ROLE_PREFIX};
pub use session::{Session, SessionUser};
pub use user::User;

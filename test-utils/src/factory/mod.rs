//! Factory methods for creating test data.
//!
//! Factories insert entities with sensible defaults, reducing boilerplate in tests.
//! Each entity has a `Factory` struct for customization and a `create_*` convenience
//! function for quick default creation.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let user = factory::user::create_user(db).await?;
//! let product = factory::product::ProductFactory::new(db)
//!     .price(120_000)
//!     .stock(3)
//!     .build()
//!     .await?;
//!
//! let (customer, product, order) = factory::helpers::create_order_with_dependencies(db).await?;
//! ```
//!
//! # Available Factories
//!
//! - `user` - Customers and admins
//! - `brand`, `category`, `product` - Catalog entities
//! - `voucher` - Discount vouchers
//! - `order` - Orders with a single line item
//! - `notification` - User notifications
//! - `news`, `activity`, `advertisement` - Admin content
//! - `helpers` - Unique ids and multi-entity setups

pub mod activity;
pub mod advertisement;
pub mod brand;
pub mod category;
pub mod helpers;
pub mod news;
pub mod notification;
pub mod order;
pub mod product;
pub mod user;
pub mod voucher;

pub use brand::create_brand;
pub use category::create_category;
pub use order::create_order;
pub use product::create_product;
pub use user::{create_admin, create_user};
pub use voucher::create_voucher;

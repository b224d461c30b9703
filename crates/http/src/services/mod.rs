//! One service per backend resource
//!
//! Services hold no state of their own. They fix the path, verb and parameter
//! shape of each call and hand the backend's JSON back untouched.

pub mod auth;
pub mod blog;
pub mod cart;
pub mod discount;
pub mod feedback;
pub mod food;
pub mod order;
pub mod product;
mod resource;
pub mod shipping;
pub mod user;
pub mod wishlist;

pub use auth::AuthService;
pub use blog::BlogService;
pub use cart::CartService;
pub use discount::DiscountService;
pub use feedback::{ComplaintService, FeedbackService};
pub use food::{FoodService, MealSetService};
pub use order::OrderService;
pub use product::{CategoryService, ProductService};
pub use shipping::ShippingService;
pub use user::UserService;
pub use wishlist::WishlistService;

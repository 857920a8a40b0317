//! Ready-made [`Provider`](crate::Provider) implementations.

mod countries;
mod prefix;

pub use self::countries::COUNTRIES;
pub use self::prefix::PrefixProvider;

pub mod audit;
pub mod dispatch;
pub mod reconcile;
pub mod sales;
pub mod shared;
pub mod summary;

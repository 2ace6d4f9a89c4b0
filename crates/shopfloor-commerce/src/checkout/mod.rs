//! Checkout module.
//!
//! Contains the sale payload, submission, and operator notifications.

mod notification;
mod payload;
mod submission;

pub use notification::{Notification, NotificationKind};
pub use payload::{CustomerPayload, LineItemPayload, SalePayload};
pub use submission::{failure_message, PendingSale, SALES_PATH, SALE_FAILED, SALE_RECORDED};

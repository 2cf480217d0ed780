#![warn(clippy::uninlined_format_args)]

pub mod amount;
pub mod contributions_presenter;
pub mod error_presenter;
pub mod log_presenter;
pub mod messages;
pub mod reply_presenter;
pub mod settlement_presenter;

pub use contributions_presenter::ContributionsPresenter;
pub use error_presenter::format_failure;
pub use log_presenter::LogPresenter;
pub use reply_presenter::ReplyPresenter;
pub use settlement_presenter::SettlementPresenter;

#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Mailgun templated-message notification channel
//!
//! Builds messages rendered from templates stored at Mailgun, routes
//! notifications to a recipient address and hands the encoded message to a
//! [`Transport`](domain::delivery::Transport).

pub mod domain;
pub mod infrastructure;

//! Firebase Cloud Messaging provider for pushlink
//!
//! This crate implements the `pushlink_common::MessagingProvider` trait
//! against the Firebase REST surface:
//!
//! - device identity tokens via the Firebase Installations API followed by
//!   an FCM registration request
//! - topic subscription via the Instance ID API, authenticated with a
//!   service-account OAuth2 bearer or a legacy server key
//! - a dispatch surface through which the embedding runtime delivers the
//!   four notification-lifecycle events to the registered sink
//!
//! # Example
//!
//! ```rust,no_run
//! use pushlink_config::MessagingConfig;
//! use pushlink_fcm::FcmProvider;
//! use std::sync::Arc;
//!
//! let config = MessagingConfig {
//!     project_id: Some("my-project".to_string()),
//!     api_key: Some("AIza...".to_string()),
//!     app_id: Some("1:123:android:abc".to_string()),
//!     ..MessagingConfig::default()
//! };
//! let provider: Arc<FcmProvider> = Arc::new(FcmProvider::new(config));
//! ```

pub mod auth;
pub mod client;
pub mod provider;

pub use client::{FcmClient, FcmError};
pub use provider::FcmProvider;

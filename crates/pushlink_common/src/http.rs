// --- File: crates/pushlink_common/src/http.rs ---

// HTTP utilities shared by the pushlink crates. The backend registration
// client and the FCM provider both build on these helpers.

pub mod client;

//! In-memory integration tests.
//!
//! Every service is wired to the in-memory backends through one shared
//! session handle, the way the binary wires the HTTP adapters:
//! - `session_flow_tests`: Sign-in, restore, and sign-out
//! - `task_flow_tests`: Group task lifecycle and listing
//! - `notification_flow_tests`: Feed, read marking, and polling
//! - `report_flow_tests`: Statistics and CSV export

mod test_helpers;

mod in_memory {
    pub mod helpers;

    mod notification_flow_tests;
    mod report_flow_tests;
    mod session_flow_tests;
    mod task_flow_tests;
}

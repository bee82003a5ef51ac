//! End-to-end tests driving the NetShare router against PostgreSQL.
//!
//! Set `NETSHARE_TEST_DATABASE_URL` to run them; otherwise each test
//! returns early.

mod helpers;

mod device_test;
mod file_test;
mod invitation_test;
mod network_test;
mod share_test;

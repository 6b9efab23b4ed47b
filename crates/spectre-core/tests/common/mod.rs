// Each integration test binary uses a different subset of these helpers.
#![allow(dead_code)]

pub mod fake_ghost;
pub mod test_server;

//! Shared test utilities for the CLI E2E tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     illa().assert().success();
//! }
//! ```

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use predicates::prelude::*;

    pub use super::illa;
}

/// The `illa` binary with a predictable environment.
///
/// Colors are disabled and `ILLA_LOG` is cleared so output does not depend on
/// the shell running the tests.
pub fn illa() -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("illa");
    cmd.env("NO_COLOR", "1").env_remove("ILLA_LOG");
    cmd
}

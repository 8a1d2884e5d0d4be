//! The `illa` root command.
//!
//! No subcommands are registered yet: invoking `illa` prints help, and any
//! other word is reported as an unknown command.

use crate::command::CommandDescriptor;

/// Invocation name of the binary.
pub const NAME: &str = "illa";

pub const SHORT_DESCRIPTION: &str = "ILLA CLI";

pub const LONG_DESCRIPTION: &str = "Deploy a modern low-code platform in 5 Seconds!";

pub const USAGE: &str = "illa <command> [options]";

/// Build the root command descriptor.
pub fn construct() -> CommandDescriptor {
    CommandDescriptor::new(NAME)
        .short(SHORT_DESCRIPTION)
        .long(LONG_DESCRIPTION)
        .usage(USAGE)
        .version(clap::crate_version!())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construct_metadata() {
        let root = construct();

        assert_eq!(root.invocation_name(), "illa");
        assert_eq!(root.short_description(), "ILLA CLI");
        assert_eq!(
            root.long_description(),
            "Deploy a modern low-code platform in 5 Seconds!"
        );
        assert_eq!(root.usage_line(), Some("illa <command> [options]"));
        assert_eq!(root.version_string(), Some(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_construct_is_deterministic() {
        let first = construct();
        let second = construct();

        assert_eq!(first.invocation_name(), second.invocation_name());
        assert_eq!(first.short_description(), second.short_description());
        assert_eq!(first.long_description(), second.long_description());
    }

    #[test]
    fn test_root_has_no_children_or_handler() {
        let root = construct();

        assert!(root.children().is_empty());
        assert!(!root.has_handler());
        assert!(root.validate().is_ok());
    }
}

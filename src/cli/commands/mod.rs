//! One module per subcommand, each exposing an `execute` function.

pub mod add;
pub mod completions;
pub mod delete;
pub mod edit;
pub mod export;
pub mod get;
pub mod import_cmd;
pub mod init;
pub mod list;
pub mod rotate;
pub mod version;

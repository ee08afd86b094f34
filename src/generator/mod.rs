pub mod config;
pub mod json;
pub mod node_manip;
pub mod yaml;

// Re-export the build pipeline
pub use config::formats::RenderError;
pub use config::subexport::{build_adapter, default_group_name, render};
pub use config::userinfo::{subscription_info, subscription_userinfo};

// Re-export node manipulation functions
pub use node_manip::{expand_server, expand_server_with, expand_servers_indexed, relay_name, ExpandedNames};

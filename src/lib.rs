pub mod constants;
pub mod generator;
pub mod models;
pub mod parser;
pub mod settings;
pub mod template;
pub mod utils;

// Re-export the main model types for easier access
pub use models::{
    Adapter, ClientTarget, Group, GroupType, Proxy, ProxyType, RuleGroup, RuleGroupType, Server,
    SubscribeUser, TagMap,
};

// Re-export the pipeline entry points
pub use generator::{build_adapter, render, RenderError};
pub use parser::{parse_option, ProtocolError, ProtocolOption};
pub use settings::Settings;

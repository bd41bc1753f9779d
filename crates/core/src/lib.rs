pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod policies;
pub mod session;

pub use catalog::{Catalog, NameMatch};
pub use config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat, StoreConfig};
pub use domain::order::{Order, OrderId, OrderStatus};
pub use domain::product::{Product, ProductId};
pub use domain::profile::UserProfile;
pub use errors::AgentError;
pub use policies::{SizeChart, StorePolicies};
pub use session::{QueryLogEntry, Session};

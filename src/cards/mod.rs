//! Card system: templates, instances, and the catalog.
//!
//! ## Key Types
//!
//! - `CardTemplate`: Static card data (powers, roles, recovery, price)
//! - `CardInstance`: One dealt copy of a template, identified by `InstanceId`
//! - `CardCatalog`: Template pool that deals fresh instances

pub mod catalog;
pub mod definition;
pub mod instance;

pub use catalog::CardCatalog;
pub use definition::{
    CardRoles, CardTemplate, CardType, Element, PoolTargets, DEFAULT_TRADE_VALUE,
};
pub use instance::{CardInstance, InstanceAllocator, InstanceId};

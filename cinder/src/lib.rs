pub mod bound;
pub mod codec;
pub mod facade;
pub mod policy;
pub mod ports;

pub use bound::BoundList;
pub use codec::JsonCodec;
pub use facade::KeyValueFacade;
pub use policy::ExpirationPolicy;
pub use ports::{StoreClient, ValueCodec};

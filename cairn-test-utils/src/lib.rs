pub mod builder;
pub mod constant;
pub mod context;
pub mod error;
pub mod fixtures;
pub mod introspect;
pub mod scratch;
pub mod seed;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{fixtures::postcode as postcode_factory, TestBuilder, TestContext, TestError};
}

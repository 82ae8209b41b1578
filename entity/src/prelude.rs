pub use super::ccg::Entity as Ccg;
pub use super::constituency::Entity as Constituency;
pub use super::county::Entity as County;
pub use super::district::Entity as District;
pub use super::nuts::Entity as Nuts;
pub use super::outcode::Entity as Outcode;
pub use super::parish::Entity as Parish;
pub use super::place::Entity as Place;
pub use super::postcode::Entity as Postcode;
pub use super::terminated_postcode::Entity as TerminatedPostcode;
pub use super::ward::Entity as Ward;

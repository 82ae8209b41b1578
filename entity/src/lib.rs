pub mod prelude;

pub mod ccg;
pub mod constituency;
pub mod county;
pub mod district;
pub mod nuts;
pub mod outcode;
pub mod parish;
pub mod place;
pub mod postcode;
pub mod terminated_postcode;
pub mod ward;

pub mod boundary;
pub mod country;
pub mod dataset;
pub mod record;
pub mod validate;

pub mod domain;
pub mod error;
pub mod props;
pub mod protocol;

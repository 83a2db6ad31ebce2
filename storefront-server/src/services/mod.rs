//! Business services that span more than one table

pub mod pricing;

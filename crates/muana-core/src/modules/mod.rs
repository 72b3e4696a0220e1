pub mod event;
pub mod histogram;
pub mod matcher;
pub mod report;
pub mod serialization;

//! SeaORM entity definitions for the Stele collections

pub mod config_archive;
pub mod config_record;

pub mod observation_table;
pub mod query;

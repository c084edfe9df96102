/// Tag listing command
pub mod tags;

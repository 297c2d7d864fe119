pub mod field;
pub mod logger;
pub mod path_planning;

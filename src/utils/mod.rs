pub mod backup;
pub mod db_utils;
pub mod scheduler;
pub mod validation;
pub mod write_lock;

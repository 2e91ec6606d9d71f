pub mod canonical;
pub mod session_id;

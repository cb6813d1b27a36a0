pub mod external;
pub mod storage;
pub mod sync;

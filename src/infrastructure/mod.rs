pub mod mediaconvert;
pub mod storage;

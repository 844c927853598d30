pub mod bench;
pub mod measure;
pub mod timing;
pub mod vsync;

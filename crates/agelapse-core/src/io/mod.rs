pub mod avi_writer;
pub mod crop;
pub mod discover;
pub mod image_io;
pub mod timeline;
pub mod video;

pub mod input;
pub mod options;
pub mod tour_file;

pub mod target_path;

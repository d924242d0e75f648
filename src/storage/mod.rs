pub mod write_json;

pub mod machine_friendly;

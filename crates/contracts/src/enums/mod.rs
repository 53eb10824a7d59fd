pub mod dataset_id;

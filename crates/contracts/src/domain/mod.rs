pub mod a001_trained_model;

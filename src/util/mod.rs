pub mod figment;

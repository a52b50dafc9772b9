pub mod nihss;

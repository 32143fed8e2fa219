pub mod reformulate;

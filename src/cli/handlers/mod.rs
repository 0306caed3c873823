pub mod evaluate;
pub mod info;

pub mod body;
pub mod descriptor;

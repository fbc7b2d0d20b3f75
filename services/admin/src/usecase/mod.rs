pub mod company;
pub mod provision;
pub mod tables;
pub mod verify;

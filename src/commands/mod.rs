pub mod demand;
pub mod init;
pub mod risk;

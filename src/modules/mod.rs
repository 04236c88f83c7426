pub mod admin;
pub mod backend;
pub mod contact;
pub mod portfolio;
pub mod site;
